//! Decoding of Foursquare `venues/explore` bodies.
//!
//! Venues sit at `response.groups[0].items[*].venue`, each carrying `name`
//! and `location.lat` / `location.lng`. Every read goes through the path
//! walker so a missing member is reported with its full path, for example
//! `$.response.groups[0].items[3].venue.location`.

use log::warn;
use officescout_core::path::{self, PathSegment};
use officescout_core::{GeoSourceError, Venue};
use serde_json::Value;

use PathSegment::{Index, Key};

/// Status code Foursquare reports in `meta.code` for a successful call.
const META_OK: u64 = 200;

/// Extract the venues from an explore response body.
///
/// Only the first group is read. A `response.warning.text`, which the
/// service sends when results are sparse, is logged.
///
/// # Errors
/// Returns [`GeoSourceError::Service`] when `meta.code` reports a failure
/// and [`GeoSourceError::Response`] when any expected member is missing or
/// has the wrong type.
///
/// # Examples
/// ```
/// use officescout_data::venues::parse_explore_response;
/// use serde_json::json;
///
/// let body = json!({
///     "meta": { "code": 200 },
///     "response": { "groups": [{ "items": [
///         { "venue": { "name": "Blue Bottle", "location": { "lat": 37.78, "lng": -122.39 } } }
///     ] }] }
/// });
/// let venues = parse_explore_response(&body)?;
/// assert_eq!(venues[0].name, "Blue Bottle");
/// # Ok::<(), officescout_core::GeoSourceError>(())
/// ```
pub fn parse_explore_response(body: &Value) -> Result<Vec<Venue>, GeoSourceError> {
    check_meta(body)?;
    if let Ok(text) = path::lookup_str(body, &[Key("response"), Key("warning"), Key("text")]) {
        warn!("venue search warning: {text}");
    }
    let items = path::lookup_array(
        body,
        &[Key("response"), Key("groups"), Index(0), Key("items")],
    )?;
    (0..items.len())
        .map(|item| read_venue(body, item))
        .collect()
}

/// Turn a failing `meta.code` into [`GeoSourceError::Service`].
///
/// Foursquare repeats the HTTP status in `meta.code` and explains it in
/// `meta.errorDetail`. Bodies without `meta` pass.
pub(super) fn check_meta(body: &Value) -> Result<(), GeoSourceError> {
    let Ok(code) = path::lookup(body, &[Key("meta"), Key("code")]) else {
        return Ok(());
    };
    if code.as_u64() == Some(META_OK) {
        return Ok(());
    }
    let detail = ["errorDetail", "errorType"]
        .into_iter()
        .find_map(|key| path::lookup_str(body, &[Key("meta"), Key(key)]).ok())
        .unwrap_or_default();
    Err(GeoSourceError::Service {
        code: code.to_string(),
        message: detail.to_owned(),
    })
}

fn read_venue(body: &Value, item: usize) -> Result<Venue, GeoSourceError> {
    let at = |tail: &[PathSegment<'static>]| {
        let mut segments = vec![
            Key("response"),
            Key("groups"),
            Index(0),
            Key("items"),
            Index(item),
            Key("venue"),
        ];
        segments.extend_from_slice(tail);
        segments
    };
    let name = path::lookup_str(body, &at(&[Key("name")]))?;
    let latitude = path::lookup_f64(body, &at(&[Key("location"), Key("lat")]))?;
    let longitude = path::lookup_f64(body, &at(&[Key("location"), Key("lng")]))?;
    Ok(Venue::new(name, latitude, longitude))
}
