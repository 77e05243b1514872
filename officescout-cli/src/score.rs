//! Score command implementation for the officescout CLI.

use std::io::{BufReader, Write};
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::debug;
use officescout_core::source::DEFAULT_FALLBACK_ORIGIN;
use officescout_core::table::{Record, Table, records_to_table};
use officescout_core::{
    COUNT_COLUMN, Geocoder, Office, ProximityRecord, Radius, VenueQuery, VenueSource, count_nearby,
    resolve_origin,
};
use officescout_data::geocode::DEFAULT_GEOCODE_URL;
use officescout_data::venues::DEFAULT_FOURSQUARE_URL;
use officescout_data::{FoursquareConfig, FoursquareVenueSource, HttpGeocoder, HttpGeocoderConfig};
use officescout_scorer::{WeightSpec, give_points};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_SCORE_ADDRESS, ARG_SCORE_CATEGORY, ARG_SCORE_CLIENT_ID, ARG_SCORE_CLIENT_SECRET,
    ARG_SCORE_FOURSQUARE_URL, ARG_SCORE_GEOCODE_URL, ARG_SCORE_OFFICES, ARG_SCORE_RADIUS_KM,
    CliError, ENV_SCORE_ADDRESS, ENV_SCORE_CATEGORIES, ENV_SCORE_CLIENT_ID,
    ENV_SCORE_CLIENT_SECRET, ENV_SCORE_OFFICES,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score candidate offices by counting, for each venue \
                 category, the venues within a radius of every office and \
                 turning the counts into weighted points. Venues are searched \
                 around a geocoded address; the offices are read from a JSON \
                 array of records.",
    about = "Score offices by nearby venues"
)]
#[ortho_config(prefix = "OFFICESCOUT")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON array of office records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) offices: Option<Utf8PathBuf>,
    /// Address the venue searches are centred on.
    #[arg(long = ARG_SCORE_ADDRESS, value_name = "address")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Venue category to count, as `label=category_id:weight`. Repeatable.
    #[arg(long = ARG_SCORE_CATEGORY, value_name = "label=id:weight")]
    #[serde(default)]
    pub(crate) categories: Option<Vec<String>>,
    /// Counting radius around each office in kilometres (default 1).
    #[arg(long = ARG_SCORE_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
    /// Foursquare application client identifier.
    #[arg(long = ARG_SCORE_CLIENT_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) foursquare_client_id: Option<String>,
    /// Foursquare application client secret.
    #[arg(long = ARG_SCORE_CLIENT_SECRET, value_name = "secret")]
    #[serde(default)]
    pub(crate) foursquare_client_secret: Option<String>,
    /// Base URL of the geocoding service (e.g. "https://geocode.xyz").
    #[arg(long = ARG_SCORE_GEOCODE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocode_url: Option<String>,
    /// Base URL of the Foursquare API (e.g. "https://api.foursquare.com").
    #[arg(long = ARG_SCORE_FOURSQUARE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) foursquare_url: Option<String>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// One venue category to count and score.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySpec {
    /// Column name the counts are stored under.
    pub(crate) label: String,
    /// Provider category identifier.
    pub(crate) category_id: String,
    /// Points awarded for two or more nearby venues.
    pub(crate) weight: f64,
}

impl FromStr for CategorySpec {
    type Err = CliError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| CliError::InvalidCategory {
            spec: spec.to_owned(),
            reason,
        };
        let (label, rest) = spec
            .split_once('=')
            .ok_or_else(|| invalid("expected label=category_id:weight"))?;
        let (category_id, raw_weight) = rest
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected a :weight suffix"))?;
        if label.trim().is_empty() {
            return Err(invalid("label is empty"));
        }
        if category_id.trim().is_empty() {
            return Err(invalid("category id is empty"));
        }
        let weight = raw_weight
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid("weight is not a number"))?;
        Ok(Self {
            label: label.trim().to_owned(),
            category_id: category_id.trim().to_owned(),
            weight,
        })
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    /// Path to the offices JSON file.
    pub(crate) offices: Utf8PathBuf,
    /// Address the venue searches are centred on.
    pub(crate) address: String,
    /// Categories in the order their columns appear.
    pub(crate) categories: Vec<CategorySpec>,
    /// Weights keyed by category label.
    pub(crate) weights: WeightSpec,
    /// Counting radius around each office.
    pub(crate) radius: Radius,
    /// Geocoding service settings.
    pub(crate) geocoder: HttpGeocoderConfig,
    /// Foursquare credentials and settings.
    pub(crate) foursquare: FoursquareConfig,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.offices, ARG_SCORE_OFFICES)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Labels of the count columns, in category order.
    fn labels(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|category| category.label.as_str())
            .collect()
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let offices = args.offices.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_OFFICES,
            env: ENV_SCORE_OFFICES,
        })?;
        let address = args.address.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_ADDRESS,
            env: ENV_SCORE_ADDRESS,
        })?;
        let categories = args
            .categories
            .unwrap_or_default()
            .iter()
            .map(|spec| spec.parse::<CategorySpec>())
            .collect::<Result<Vec<_>, _>>()?;
        if categories.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_SCORE_CATEGORY,
                env: ENV_SCORE_CATEGORIES,
            });
        }
        let weights = WeightSpec::new(
            categories
                .iter()
                .map(|category| (category.label.clone(), category.weight)),
        )?;
        let radius = args.radius_km.map_or(Ok(Radius::DEFAULT), Radius::new)?;
        let client_id = args.foursquare_client_id.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_CLIENT_ID,
            env: ENV_SCORE_CLIENT_ID,
        })?;
        let client_secret = args
            .foursquare_client_secret
            .ok_or(CliError::MissingArgument {
                field: ARG_SCORE_CLIENT_SECRET,
                env: ENV_SCORE_CLIENT_SECRET,
            })?;

        let geocode_url = args
            .geocode_url
            .unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_owned());
        let foursquare_url = args
            .foursquare_url
            .unwrap_or_else(|| DEFAULT_FOURSQUARE_URL.to_owned());

        Ok(Self {
            offices,
            address,
            categories,
            weights,
            radius,
            geocoder: HttpGeocoderConfig::new(geocode_url),
            foursquare: FoursquareConfig::new(client_id, client_secret)
                .with_base_url(foursquare_url),
        })
    }
}

/// Builds the geo collaborators for the current score invocation.
pub(crate) trait SourceBuilder {
    fn geocoder(&self, config: &ScoreConfig) -> Result<Box<dyn Geocoder>, CliError>;
    fn venue_source(&self, config: &ScoreConfig) -> Result<Box<dyn VenueSource>, CliError>;
}

pub(crate) struct DefaultSourceBuilder;

impl SourceBuilder for DefaultSourceBuilder {
    fn geocoder(&self, config: &ScoreConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder = HttpGeocoder::with_config(config.geocoder.clone()).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.geocoder.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }

    fn venue_source(&self, config: &ScoreConfig) -> Result<Box<dyn VenueSource>, CliError> {
        let venue_source = FoursquareVenueSource::with_config(config.foursquare.clone())
            .map_err(|source| CliError::BuildVenueSource {
                base_url: config.foursquare.base_url.clone(),
                source,
            })?;
        Ok(Box::new(venue_source))
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_score_with(args, &DefaultSourceBuilder, &mut stdout)
}

pub(crate) fn run_score_with(
    args: ScoreArgs,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let table = execute_score(args, builder)?;
    write_scores(writer, &table)
}

fn execute_score(args: ScoreArgs, builder: &dyn SourceBuilder) -> Result<Table, CliError> {
    let config = resolve_score_config(args)?;
    let offices = load_offices(&config.offices)?;
    let geocoder = builder.geocoder(&config)?;
    let venue_source = builder.venue_source(&config)?;
    score_offices(&config, &offices, geocoder.as_ref(), venue_source.as_ref())
}

fn resolve_score_config(args: ScoreArgs) -> Result<ScoreConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads offices from a JSON array of records.
pub(crate) fn load_offices(path: &Utf8Path) -> Result<Vec<Office>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenOffices {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let records: Vec<Value> =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseOffices {
            path: path.to_path_buf(),
            source,
        })?;
    if records.is_empty() {
        return Err(CliError::NoOffices {
            path: path.to_path_buf(),
        });
    }
    let offices = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Office::from_record(record).map_err(|source| CliError::InvalidOffice {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("loaded {} offices from {path}", offices.len());
    Ok(offices)
}

/// Count venues per category around every office and score the counts.
///
/// Each category contributes one count column named after its label, next
/// to the shared office label column. Venues are searched around the
/// geocoded address, or [`DEFAULT_FALLBACK_ORIGIN`] when the service rejects
/// it.
pub(crate) fn score_offices(
    config: &ScoreConfig,
    offices: &[Office],
    geocoder: &dyn Geocoder,
    venue_source: &dyn VenueSource,
) -> Result<Table, CliError> {
    let origin = resolve_origin(geocoder, &config.address, DEFAULT_FALLBACK_ORIGIN).map_err(
        |source| CliError::Geocode {
            address: config.address.clone(),
            source,
        },
    )?;

    let mut merged: Option<Table> = None;
    for category in &config.categories {
        let query = VenueQuery::new(origin, category.category_id.as_str());
        let venues = venue_source
            .fetch_venues(&query)
            .map_err(|source| CliError::FetchVenues {
                label: category.label.clone(),
                source,
            })?;
        let records: Vec<Record> = count_nearby(offices, &venues, config.radius)
            .iter()
            .map(ProximityRecord::to_record)
            .collect();
        let mut counts = records_to_table(&records)?;
        counts.rename_column(COUNT_COLUMN, &category.label)?;
        debug!(
            "counted {} {} venues around {} offices",
            venues.len(),
            category.label,
            offices.len()
        );
        merged = Some(match merged.take() {
            None => counts,
            Some(mut table) => {
                let column = counts.remove_column(&category.label)?;
                table.push_column(category.label.as_str(), column.into_cells())?;
                table
            }
        });
    }

    let mut table = merged.unwrap_or_default();
    table.cast_to_integer(&config.labels())?;
    give_points(table, &config.weights).map_err(CliError::from)
}

fn write_scores(writer: &mut dyn Write, table: &Table) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(&table.to_records()).map_err(CliError::SerializeScores)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteScoreOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteScoreOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
