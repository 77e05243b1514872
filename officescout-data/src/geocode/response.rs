//! Decoding of geocode.xyz JSON bodies.

use geo::Coord;
use officescout_core::path::{self, PathError, PathSegment};
use officescout_core::{GeoSourceError, Geocoded};
use serde_json::Value;

/// Message used when a rejection carries no explanation.
const UNEXPLAINED_REJECTION: &str = "address could not be geocoded";

/// Interpret a geocode.xyz response body.
///
/// `"success": false` yields [`Geocoded::Rejected`] with the service's
/// message. Otherwise `longt` and `latt` must be present; the service sends
/// them as decimal strings but bare numbers are accepted too.
///
/// # Errors
/// Returns [`GeoSourceError::Response`] when a coordinate is absent or has
/// the wrong type and [`GeoSourceError::Parse`] when a coordinate string is
/// not a finite number.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use officescout_core::Geocoded;
/// use officescout_data::geocode::parse_geocode_response;
/// use serde_json::json;
///
/// let body = json!({ "longt": "-122.41942", "latt": "37.77493" });
/// let geocoded = parse_geocode_response(&body)?;
/// assert_eq!(geocoded, Geocoded::Found(Coord { x: -122.41942, y: 37.77493 }));
/// # Ok::<(), officescout_core::GeoSourceError>(())
/// ```
pub fn parse_geocode_response(body: &Value) -> Result<Geocoded, GeoSourceError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Ok(Geocoded::Rejected {
            message: rejection_message(body),
        });
    }
    let longitude = read_degrees(body, "longt")?;
    let latitude = read_degrees(body, "latt")?;
    Ok(Geocoded::Found(Coord {
        x: longitude,
        y: latitude,
    }))
}

fn rejection_message(body: &Value) -> String {
    ["message", "description"]
        .into_iter()
        .find_map(|key| {
            path::lookup_str(body, &[PathSegment::Key("error"), PathSegment::Key(key)]).ok()
        })
        .unwrap_or(UNEXPLAINED_REJECTION)
        .to_owned()
}

fn read_degrees(body: &Value, key: &str) -> Result<f64, GeoSourceError> {
    let segment = [PathSegment::Key(key)];
    let parsed = match path::lookup(body, &segment)? {
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| GeoSourceError::Parse {
                message: format!("{key} {text:?} is not a number: {err}"),
            })?,
        Value::Number(number) => number.as_f64().ok_or_else(|| GeoSourceError::Parse {
            message: format!("{key} {number} is not representable"),
        })?,
        _ => {
            return Err(PathError::UnexpectedType {
                path: path::render(&segment),
                expected: "a number or numeric string",
            }
            .into());
        }
    };
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(GeoSourceError::Parse {
            message: format!("{key} is not finite"),
        })
    }
}
