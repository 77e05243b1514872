//! Collaborators that supply coordinates and venues to the core.
//!
//! The [`Geocoder`] trait resolves a free-text address to a coordinate and
//! the [`VenueSource`] trait lists venues of a category around an origin.
//! Both are synchronous so the counting and scoring pipeline stays free of
//! async plumbing; HTTP-backed implementations live in `officescout-data`.

mod error;

use geo::Coord;
use log::warn;

use crate::Venue;

pub use error::GeoSourceError;

/// Position used when the geocoding service rejects an address.
///
/// Longitude -122.366760, latitude 37.820100 (Treasure Island, San
/// Francisco).
pub const DEFAULT_FALLBACK_ORIGIN: Coord<f64> = Coord {
    x: -122.366_760,
    y: 37.820_100,
};

/// Default venue search radius in metres.
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 5000;

/// Default maximum number of venues per search.
pub const DEFAULT_VENUE_LIMIT: u32 = 100;

/// Outcome of a geocoding request that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Geocoded {
    /// The address resolved to a coordinate.
    Found(Coord<f64>),
    /// The service answered but reported that it could not resolve the
    /// address.
    Rejected {
        /// Explanation returned by the service, if any.
        message: String,
    },
}

/// Resolve a free-text address to a coordinate.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use officescout_core::source::{GeoSourceError, Geocoded, Geocoder};
///
/// struct Fixed;
///
/// impl Geocoder for Fixed {
///     fn geocode(&self, _address: &str) -> Result<Geocoded, GeoSourceError> {
///         Ok(Geocoded::Found(Coord { x: 2.17, y: 41.38 }))
///     }
/// }
///
/// assert!(matches!(Fixed.geocode("Barcelona"), Ok(Geocoded::Found(_))));
/// ```
pub trait Geocoder {
    /// Look up `address`.
    ///
    /// Implementations return [`Geocoded::Rejected`] only when the service
    /// explicitly reports failure; transport and decoding problems are
    /// errors.
    fn geocode(&self, address: &str) -> Result<Geocoded, GeoSourceError>;
}

/// Parameters of a venue search.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueQuery {
    /// Centre of the search.
    pub origin: Coord<f64>,
    /// Provider-specific category identifier.
    pub category: String,
    /// Search radius in metres.
    pub radius_meters: u32,
    /// Maximum number of venues to return.
    pub limit: u32,
}

impl VenueQuery {
    /// Build a query with the default radius and limit.
    pub fn new(origin: Coord<f64>, category: impl Into<String>) -> Self {
        Self {
            origin,
            category: category.into(),
            radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            limit: DEFAULT_VENUE_LIMIT,
        }
    }

    /// Override the search radius.
    #[must_use]
    pub fn with_radius_meters(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Override the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Fetch venues of a category near an origin.
pub trait VenueSource {
    /// Return the venues matching `query` as a flat list.
    fn fetch_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>, GeoSourceError>;
}

/// Geocode `address`, substituting `fallback` when the service rejects it.
///
/// Only [`Geocoded::Rejected`] triggers the fallback. Timeouts, transport
/// failures and malformed responses are returned as errors.
///
/// # Errors
/// Propagates any [`GeoSourceError`] from the geocoder.
pub fn resolve_origin<G>(
    geocoder: &G,
    address: &str,
    fallback: Coord<f64>,
) -> Result<Coord<f64>, GeoSourceError>
where
    G: Geocoder + ?Sized,
{
    match geocoder.geocode(address)? {
        Geocoded::Found(coord) => Ok(coord),
        Geocoded::Rejected { message } => {
            warn!(
                "geocoding rejected {address:?} ({message}); using fallback {:?}",
                (fallback.x, fallback.y)
            );
            Ok(fallback)
        }
    }
}
