use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::path::{self, PathError, PathSegment};

/// A candidate location being scored.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use officescout_core::Office;
///
/// let office = Office::new("5f1", "Acme", Coord { x: -122.4, y: 37.8 });
/// assert_eq!(office.label(), "Acme 5f1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    /// Identifier distinguishing offices that share a name.
    pub id: String,
    /// Display name, not necessarily unique.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
}

/// A record did not carry a field the core requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} record is missing {field}: {source}")]
pub struct InputShapeError {
    /// Record kind, such as `office` or `venue`.
    pub kind: &'static str,
    /// Name of the missing or malformed field.
    pub field: &'static str,
    /// Underlying lookup failure.
    #[source]
    pub source: PathError,
}

impl InputShapeError {
    pub(crate) const fn new(kind: &'static str, field: &'static str, source: PathError) -> Self {
        Self {
            kind,
            field,
            source,
        }
    }
}

impl Office {
    /// Construct an office from its parts.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }

    /// Label used to key the office in score tables: `"{name} {id}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.id)
    }

    /// Parse an office from a loosely shaped JSON record.
    ///
    /// The identifier is read from `_id` or `id` (strings and integers are
    /// both accepted) and the position from a GeoJSON point stored under
    /// `geojson` or `location`, whose `coordinates` are `[longitude, latitude]`.
    ///
    /// # Errors
    /// Returns [`InputShapeError`] naming the first missing field.
    ///
    /// # Examples
    /// ```
    /// use officescout_core::Office;
    /// use serde_json::json;
    ///
    /// let record = json!({
    ///     "_id": "5f1",
    ///     "name": "Acme",
    ///     "geojson": { "type": "Point", "coordinates": [-122.4, 37.8] }
    /// });
    /// let office = Office::from_record(&record)?;
    /// assert_eq!(office.location.y, 37.8);
    /// # Ok::<(), officescout_core::InputShapeError>(())
    /// ```
    pub fn from_record(record: &Value) -> Result<Self, InputShapeError> {
        let id = read_id(record)?;
        let name = path::lookup_str(record, &[PathSegment::Key("name")])
            .map_err(|source| InputShapeError::new("office", "name", source))?;
        let point = first_present(record, &["geojson", "location"])
            .map_err(|source| InputShapeError::new("office", "location", source))?;
        let coordinate = |index: usize, field: &'static str| {
            path::lookup_f64(
                point,
                &[PathSegment::Key("coordinates"), PathSegment::Index(index)],
            )
            .map_err(|source| InputShapeError::new("office", field, source))
        };
        let longitude = coordinate(0, "longitude")?;
        let latitude = coordinate(1, "latitude")?;
        Ok(Self::new(
            id,
            name,
            Coord {
                x: longitude,
                y: latitude,
            },
        ))
    }
}

fn read_id(record: &Value) -> Result<String, InputShapeError> {
    let value = first_present(record, &["_id", "id"])
        .map_err(|source| InputShapeError::new("office", "id", source))?;
    match value {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        // Extended JSON object identifiers: { "$oid": "..." }.
        Value::Object(_) => path::lookup_str(value, &[PathSegment::Key("$oid")])
            .map(str::to_owned)
            .map_err(|source| InputShapeError::new("office", "id", source)),
        _ => Err(InputShapeError::new(
            "office",
            "id",
            PathError::UnexpectedType {
                path: String::from("$.id"),
                expected: "a string or integer",
            },
        )),
    }
}

/// Return the first of `keys` present on `record`.
pub(crate) fn first_present<'v>(record: &'v Value, keys: &[&str]) -> Result<&'v Value, PathError> {
    keys.iter()
        .find_map(|key| record.get(*key))
        .ok_or_else(|| PathError::NotFound {
            path: path::render(&[PathSegment::Key(keys.first().copied().unwrap_or_default())]),
        })
}
