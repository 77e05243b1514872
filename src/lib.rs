//! Facade crate for the officescout proximity scoring workspace.
//!
//! This crate re-exports the core domain types and the scoring engine, and
//! exposes the HTTP geocoding and venue collaborators behind the `http`
//! feature flag.

#![forbid(unsafe_code)]

pub use officescout_core::table::{Cell, Record, Table, TableError, records_to_table};
pub use officescout_core::{
    GeoSourceError, Geocoded, Geocoder, InputShapeError, Office, ProximityRecord, Radius,
    RadiusError, Venue, VenueIndex, VenueQuery, VenueSource, count_nearby, count_within,
    haversine_km, resolve_origin,
};
pub use officescout_scorer::{PointsError, WeightSpec, WeightSpecError, give_points};

#[cfg(feature = "parallel")]
pub use officescout_core::count_nearby_parallel;

#[cfg(feature = "http")]
pub use officescout_data::{
    ClientBuildError, FoursquareConfig, FoursquareVenueSource, HttpGeocoder, HttpGeocoderConfig,
};
