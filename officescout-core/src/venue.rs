use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::office::{InputShapeError, first_present};
use crate::path::{self, PathSegment};

/// A point of interest used as a proximity signal.
///
/// Venues are produced by an external places service and may contain
/// duplicates; the core never deduplicates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Display name reported by the places service.
    pub name: String,
    /// Latitude in decimal degrees.
    #[serde(alias = "latitud", alias = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(alias = "longitud", alias = "lng")]
    pub longitude: f64,
}

impl Venue {
    /// Construct a venue from its parts.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Position as a coordinate with `x = longitude` and `y = latitude`.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Parse a venue from a flat JSON record.
    ///
    /// Latitude is read from `latitude`, `latitud` or `lat`; longitude from
    /// `longitude`, `longitud` or `lng`.
    ///
    /// # Errors
    /// Returns [`InputShapeError`] naming the first missing or non-numeric
    /// field.
    pub fn from_record(record: &Value) -> Result<Self, InputShapeError> {
        let name = path::lookup_str(record, &[PathSegment::Key("name")])
            .map_err(|source| InputShapeError::new("venue", "name", source))?;
        let latitude = read_degrees(record, &["latitude", "latitud", "lat"], "latitude")?;
        let longitude = read_degrees(record, &["longitude", "longitud", "lng"], "longitude")?;
        Ok(Self::new(name, latitude, longitude))
    }
}

fn read_degrees(
    record: &Value,
    keys: &[&str],
    field: &'static str,
) -> Result<f64, InputShapeError> {
    first_present(record, keys).map_err(|source| InputShapeError::new("venue", field, source))?;
    let key = keys
        .iter()
        .copied()
        .find(|key| record.get(*key).is_some())
        .unwrap_or_default();
    path::lookup_f64(record, &[PathSegment::Key(key)])
        .map_err(|source| InputShapeError::new("venue", field, source))
}
