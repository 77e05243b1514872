//! Error types emitted by the officescout CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use officescout_core::table::TableError;
use officescout_core::{GeoSourceError, InputShapeError, RadiusError};
use officescout_data::ClientBuildError;
use officescout_scorer::{PointsError, WeightSpecError};
use thiserror::Error;

/// Errors emitted by the officescout CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Command-line name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A `--category` value did not have the `label=id:weight` shape.
    #[error("invalid category {spec:?}: {reason}")]
    InvalidCategory {
        /// Value as given.
        spec: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The category weights were rejected.
    #[error("invalid category weights: {0}")]
    Weights(#[from] WeightSpecError),
    /// The counting radius was rejected.
    #[error("invalid radius: {0}")]
    Radius(#[from] RadiusError),
    /// Opening the offices file failed.
    #[error("failed to open offices file at {path:?}: {source}")]
    OpenOffices {
        /// Path of the offices file.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The offices file is not a JSON array of records.
    #[error("failed to parse offices JSON at {path:?}: {source}")]
    ParseOffices {
        /// Path of the offices file.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// An office record lacked a required field.
    #[error("office {index} in {path:?} is malformed: {source}")]
    InvalidOffice {
        /// Path of the offices file.
        path: Utf8PathBuf,
        /// Zero-based position of the record.
        index: usize,
        /// Which field was missing.
        #[source]
        source: InputShapeError,
    },
    /// The offices file held an empty array.
    #[error("offices file {path:?} contains no offices")]
    NoOffices {
        /// Path of the offices file.
        path: Utf8PathBuf,
    },
    /// Constructing the geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        /// Configured service root.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// Constructing the venue source failed.
    #[error("failed to build venue source for {base_url:?}: {source}")]
    BuildVenueSource {
        /// Configured service root.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// Geocoding the search address failed.
    #[error("failed to geocode {address:?}: {source}")]
    Geocode {
        /// Address as configured.
        address: String,
        /// Collaborator failure.
        #[source]
        source: GeoSourceError,
    },
    /// Fetching venues for a category failed.
    #[error("failed to fetch venues for {label}: {source}")]
    FetchVenues {
        /// Category label.
        label: String,
        /// Collaborator failure.
        #[source]
        source: GeoSourceError,
    },
    /// Building or transforming the count table failed.
    #[error(transparent)]
    Table(#[from] TableError),
    /// Scoring the count table failed.
    #[error("failed to score offices: {0}")]
    Points(#[from] PointsError),
    /// Serializing the scored table failed.
    #[error("failed to serialize scores: {0}")]
    SerializeScores(#[source] serde_json::Error),
    /// Writing the score output failed.
    #[error("failed to write score output: {0}")]
    WriteScoreOutput(#[source] std::io::Error),
}
