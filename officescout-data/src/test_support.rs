//! Deterministic test doubles for the geo collaborators.
//!
//! [`StubGeocoder`] and [`StubVenueSource`] return pre-configured answers
//! without making HTTP requests, so pipelines built on the
//! [`Geocoder`] and [`VenueSource`] traits can be exercised offline.

use std::cell::RefCell;
use std::collections::BTreeMap;

use geo::Coord;
use officescout_core::{GeoSourceError, Geocoded, Geocoder, Venue, VenueQuery, VenueSource};

/// Stub `Geocoder` answering every address the same way.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use officescout_core::{Geocoded, Geocoder};
/// use officescout_data::test_support::StubGeocoder;
///
/// let geocoder = StubGeocoder::found(Coord { x: 2.17, y: 41.38 });
/// assert_eq!(
///     geocoder.geocode("Barcelona"),
///     Ok(Geocoded::Found(Coord { x: 2.17, y: 41.38 }))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: Result<Geocoded, GeoSourceError>,
}

impl StubGeocoder {
    /// Resolve every address to `coord`.
    #[must_use]
    pub const fn found(coord: Coord<f64>) -> Self {
        Self {
            response: Ok(Geocoded::Found(coord)),
        }
    }

    /// Reject every address with `message`.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            response: Ok(Geocoded::Rejected {
                message: message.into(),
            }),
        }
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: GeoSourceError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, _address: &str) -> Result<Geocoded, GeoSourceError> {
        self.response.clone()
    }
}

/// Stub `VenueSource` serving fixed venues per category.
///
/// Unknown categories yield no venues. Every query is recorded so tests can
/// check the origin and parameters the caller used.
#[derive(Debug, Default)]
pub struct StubVenueSource {
    venues: BTreeMap<String, Vec<Venue>>,
    error: Option<GeoSourceError>,
    queries: RefCell<Vec<VenueQuery>>,
}

impl StubVenueSource {
    /// Create a source with no venues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `venues` for `category`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>, venues: Vec<Venue>) -> Self {
        self.venues.insert(category.into(), venues);
        self
    }

    /// Fail every query with `error`.
    #[must_use]
    pub fn with_error(error: GeoSourceError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Queries received so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<VenueQuery> {
        self.queries.borrow().clone()
    }
}

impl VenueSource for StubVenueSource {
    fn fetch_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>, GeoSourceError> {
        self.queries.borrow_mut().push(query.clone());
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.venues.get(&query.category).cloned().unwrap_or_default())
    }
}
