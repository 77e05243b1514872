//! Count venues within a great-circle radius of each office.
//!
//! Distances use the haversine formula on a sphere with the mean Earth
//! radius, computed by [`geo::Haversine`]. Both sides of the comparison are
//! `Coord`s with `x = longitude` and `y = latitude`, so office positions
//! stored in GeoJSON order need no reordering here.

use geo::{Coord, Distance, Haversine, Point};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Office, Venue};

/// Column holding office labels in proximity tables.
pub const LABEL_COLUMN: &str = "office";

/// Column holding venue counts in proximity tables.
pub const COUNT_COLUMN: &str = "count";

/// Search radius in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Radius(f64);

/// Errors returned by [`Radius::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RadiusError {
    /// The radius was zero or negative.
    #[error("radius must be positive, got {0} km")]
    NonPositive(f64),
    /// The radius was NaN or infinite.
    #[error("radius must be finite")]
    NonFinite,
}

impl Radius {
    /// One kilometre.
    pub const DEFAULT: Self = Self(1.0);

    /// Validate and construct a radius in kilometres.
    ///
    /// # Errors
    /// Returns [`RadiusError`] for non-finite or non-positive values.
    pub fn new(km: f64) -> Result<Self, RadiusError> {
        if !km.is_finite() {
            return Err(RadiusError::NonFinite);
        }
        if km <= 0.0 {
            return Err(RadiusError::NonPositive(km));
        }
        Ok(Self(km))
    }

    /// Radius in kilometres.
    #[must_use]
    pub const fn km(self) -> f64 {
        self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Radius {
    type Error = RadiusError;

    fn try_from(km: f64) -> Result<Self, Self::Error> {
        Self::new(km)
    }
}

impl From<Radius> for f64 {
    fn from(radius: Radius) -> Self {
        radius.0
    }
}

/// Number of venues near one office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityRecord {
    /// Office label, `"{name} {id}"`.
    pub office_label: String,
    /// Venues within the radius.
    pub count: u64,
}

impl ProximityRecord {
    /// Flatten into a `{ "office": ..., "count": ... }` record.
    #[must_use]
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            LABEL_COLUMN.to_owned(),
            Value::String(self.office_label.clone()),
        );
        record.insert(COUNT_COLUMN.to_owned(), Value::from(self.count));
        record
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use officescout_core::haversine_km;
///
/// let d = haversine_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.005, y: 0.0 });
/// assert!((d - 0.556).abs() < 0.001);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "metres are converted to kilometres"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / 1000.0
}

/// Count venues whose distance from `origin` is at most `radius_km`.
///
/// The boundary is inclusive. Accepts any non-negative radius, including
/// zero, which counts venues at exactly the same position.
#[must_use]
pub fn count_within(origin: Coord<f64>, venues: &[Venue], radius_km: f64) -> u64 {
    venues
        .iter()
        .filter(|venue| haversine_km(origin, venue.coord()) <= radius_km)
        .fold(0, |count, _| count + 1)
}

/// Count, per office, the venues within `radius`.
///
/// Returns one record per office in input order. Every office is compared
/// against every venue.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use officescout_core::{Office, Radius, Venue, count_nearby};
///
/// let offices = [Office::new("1", "A", Coord { x: 0.0, y: 0.0 })];
/// let venues = [Venue::new("v1", 0.0, 0.005)];
/// let records = count_nearby(&offices, &venues, Radius::DEFAULT);
/// assert_eq!(records[0].count, 1);
/// assert_eq!(records[0].office_label, "A 1");
/// ```
#[must_use]
pub fn count_nearby(offices: &[Office], venues: &[Venue], radius: Radius) -> Vec<ProximityRecord> {
    debug!(
        "counting {} venues around {} offices within {} km",
        venues.len(),
        offices.len(),
        radius.km()
    );
    offices
        .iter()
        .map(|office| record_for(office, venues, radius))
        .collect()
}

/// Parallel form of [`count_nearby`] distributing offices across threads.
///
/// Results are identical to the sequential version and keep input order.
#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
#[must_use]
pub fn count_nearby_parallel(
    offices: &[Office],
    venues: &[Venue],
    radius: Radius,
) -> Vec<ProximityRecord> {
    use rayon::prelude::*;

    offices
        .par_iter()
        .map(|office| record_for(office, venues, radius))
        .collect()
}

fn record_for(office: &Office, venues: &[Venue], radius: Radius) -> ProximityRecord {
    ProximityRecord {
        office_label: office.label(),
        count: count_within(office.location, venues, radius.km()),
    }
}
