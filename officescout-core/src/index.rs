//! R\*-tree accelerated venue counting.
//!
//! [`VenueIndex`] answers the same question as
//! [`count_nearby`](crate::count_nearby) without comparing every office with
//! every venue. Each query first selects candidates inside a bounding box
//! that is guaranteed to contain the whole search circle, then applies the
//! exact haversine check to the candidates. Counts are therefore identical
//! to the linear scan.
//!
//! The box is computed from spherical bounding coordinates. When it would
//! reach a pole or cross the antimeridian, the query degrades to a linear
//! scan.

use std::fmt;

use geo::Coord;
use rstar::{AABB, RTree, primitives::GeomWithData};

use crate::proximity::{ProximityRecord, Radius, haversine_km};
use crate::{Office, Venue};

/// Slightly below the mean Earth radius so boxes err on the large side.
const BOUNDING_EARTH_RADIUS_KM: f64 = 6371.0;

/// Padding added to every box edge, in degrees.
const BOX_MARGIN_DEG: f64 = 1e-9;

type IndexedVenue = GeomWithData<[f64; 2], usize>;

/// Spatial index over a fixed set of venues.
pub struct VenueIndex {
    venues: Vec<Venue>,
    tree: RTree<IndexedVenue>,
    /// Venues with coordinates outside the valid WGS84 range; always scanned.
    outliers: Vec<usize>,
}

impl fmt::Debug for VenueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VenueIndex")
            .field("entries", &self.tree.size())
            .field("outliers", &self.outliers.len())
            .finish_non_exhaustive()
    }
}

impl VenueIndex {
    /// Build an index over `venues`.
    #[must_use]
    pub fn new(venues: Vec<Venue>) -> Self {
        let (valid, outliers): (Vec<usize>, Vec<usize>) =
            (0..venues.len()).partition(|&i| venues.get(i).is_some_and(is_valid_position));
        let entries = valid
            .into_iter()
            .filter_map(|i| {
                venues
                    .get(i)
                    .map(|venue| GeomWithData::new([venue.longitude, venue.latitude], i))
            })
            .collect();
        Self {
            venues,
            tree: RTree::bulk_load(entries),
            outliers,
        }
    }

    /// Number of indexed venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Report whether the index holds no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Count venues within `radius_km` of `origin`, boundary inclusive.
    #[must_use]
    pub fn count_within(&self, origin: Coord<f64>, radius_km: f64) -> u64 {
        let within = |venue: &Venue| haversine_km(origin, venue.coord()) <= radius_km;
        let Some(envelope) = search_envelope(origin, radius_km) else {
            return self.venues.iter().filter(|v| within(v)).fold(0, |n, _| n + 1);
        };
        let boxed = self
            .tree
            .locate_in_envelope(&envelope)
            .filter_map(|entry| self.venues.get(entry.data))
            .filter(|v| within(v));
        let stray = self
            .outliers
            .iter()
            .filter_map(|&i| self.venues.get(i))
            .filter(|v| within(v));
        boxed.chain(stray).fold(0, |n, _| n + 1)
    }

    /// Indexed counterpart of [`count_nearby`](crate::count_nearby).
    #[must_use]
    pub fn count_nearby(&self, offices: &[Office], radius: Radius) -> Vec<ProximityRecord> {
        offices
            .iter()
            .map(|office| ProximityRecord {
                office_label: office.label(),
                count: self.count_within(office.location, radius.km()),
            })
            .collect()
    }
}

fn is_valid_position(venue: &Venue) -> bool {
    venue.latitude.is_finite()
        && venue.longitude.is_finite()
        && (-90.0..=90.0).contains(&venue.latitude)
        && (-180.0..=180.0).contains(&venue.longitude)
}

/// Box containing every point within `radius_km` of `origin`.
///
/// Returns `None` when no box without wrap-around exists.
#[expect(
    clippy::float_arithmetic,
    reason = "bounding coordinates are derived with spherical trigonometry"
)]
fn search_envelope(origin: Coord<f64>, radius_km: f64) -> Option<AABB<[f64; 2]>> {
    if !(origin.x.is_finite() && origin.y.is_finite() && radius_km.is_finite()) {
        return None;
    }
    let angular = radius_km / BOUNDING_EARTH_RADIUS_KM;
    if angular >= std::f64::consts::FRAC_PI_2 {
        return None;
    }
    let lat = origin.y.to_radians();
    let lat_min = (lat - angular).to_degrees() - BOX_MARGIN_DEG;
    let lat_max = (lat + angular).to_degrees() + BOX_MARGIN_DEG;
    if lat_min <= -90.0 || lat_max >= 90.0 {
        return None;
    }
    let ratio = angular.sin() / lat.cos();
    if ratio >= 1.0 {
        return None;
    }
    let delta_lon = ratio.asin().to_degrees() + BOX_MARGIN_DEG;
    let lon_min = origin.x - delta_lon;
    let lon_max = origin.x + delta_lon;
    if lon_min < -180.0 || lon_max > 180.0 {
        return None;
    }
    Some(AABB::from_corners([lon_min, lat_min], [lon_max, lat_max]))
}
