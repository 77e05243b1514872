//! Test helpers for composing score inputs and stubbed collaborators.

use super::*;
use crate::score::{ScoreArgs, ScoreConfig, SourceBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use officescout_core::{GeoSourceError, Geocoder, Venue, VenueQuery, VenueSource};
use officescout_data::test_support::{StubGeocoder, StubVenueSource};
use std::rc::Rc;
use tempfile::TempDir;

pub(super) const COFFEE_ID: &str = "4bf58dd8d48988d1e0931735";
pub(super) const SCHOOL_ID: &str = "4bf58dd8d48988d13b941735";

/// Where the stub geocoder places every address.
pub(super) const POBLENOU: Coord<f64> = Coord { x: 2.19, y: 41.40 };

pub(super) const OFFICES_JSON: &str = r#"[
    { "_id": "1", "name": "Poblenou", "geojson": { "type": "Point", "coordinates": [2.19, 41.40] } },
    { "_id": "2", "name": "Gracia", "geojson": { "type": "Point", "coordinates": [2.156, 41.403] } }
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Two coffee shops beside Poblenou.
pub(super) fn coffee_venues() -> Vec<Venue> {
    vec![
        Venue::new("Nomad Roaster's Home", 41.4000, 2.1905),
        Venue::new("Espai Joliu", 41.4005, 2.1900),
    ]
}

/// One school beside Gracia.
pub(super) fn school_venues() -> Vec<Venue> {
    vec![Venue::new("Escola Reina Violant", 41.4032, 2.1565)]
}

/// Fully populated arguments scoring coffee at 10 and schools at 4.
pub(super) fn score_args(offices: &Utf8Path) -> ScoreArgs {
    ScoreArgs {
        offices: Some(offices.to_path_buf()),
        address: Some("Carrer de Pallars 99, Barcelona".to_owned()),
        categories: Some(vec![
            format!("coffee={COFFEE_ID}:10"),
            format!("schools={SCHOOL_ID}:4"),
        ]),
        foursquare_client_id: Some("client-id".to_owned()),
        foursquare_client_secret: Some("client-secret".to_owned()),
        ..ScoreArgs::default()
    }
}

pub(super) fn score_config(offices: &Utf8Path) -> ScoreConfig {
    ScoreConfig::try_from(score_args(offices)).expect("complete arguments should convert")
}

/// Venue source sharing its recorded queries with the test.
#[derive(Debug, Clone)]
pub(super) struct SharedVenues(pub(super) Rc<StubVenueSource>);

impl VenueSource for SharedVenues {
    fn fetch_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>, GeoSourceError> {
        self.0.fetch_venues(query)
    }
}

#[derive(Debug, Clone)]
pub(super) struct StubSourceBuilder {
    pub(super) geocoder: StubGeocoder,
    pub(super) venues: SharedVenues,
}

impl StubSourceBuilder {
    pub(super) fn new(geocoder: StubGeocoder, venues: StubVenueSource) -> Self {
        Self {
            geocoder,
            venues: SharedVenues(Rc::new(venues)),
        }
    }

    /// Geocodes to Poblenou and serves coffee shops and schools.
    pub(super) fn barcelona() -> Self {
        Self::new(
            StubGeocoder::found(POBLENOU),
            StubVenueSource::new()
                .with_category(COFFEE_ID, coffee_venues())
                .with_category(SCHOOL_ID, school_venues()),
        )
    }

    pub(super) fn queries(&self) -> Vec<VenueQuery> {
        self.venues.0.queries()
    }
}

impl SourceBuilder for StubSourceBuilder {
    fn geocoder(&self, _config: &ScoreConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(self.geocoder.clone()))
    }

    fn venue_source(&self, _config: &ScoreConfig) -> Result<Box<dyn VenueSource>, CliError> {
        Ok(Box::new(self.venues.clone()))
    }
}
