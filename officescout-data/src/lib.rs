//! HTTP collaborators supplying coordinates and venues to the core.
//!
//! Responsibilities:
//! - Implement [`officescout_core::Geocoder`] against geocode.xyz
//!   ([`geocode::HttpGeocoder`]).
//! - Implement [`officescout_core::VenueSource`] against the Foursquare
//!   `venues/explore` API ([`venues::FoursquareVenueSource`]).
//! - Decode service responses with the core path walker so missing members
//!   surface as [`officescout_core::path::PathError`]s.
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `officescout-core` and
//!   `officescout-scorer`).
//! - Do not read credentials from the environment; callers pass them in.
//!
//! Invariants:
//! - No retries: every failure is reported to the caller as is.
//! - No global mutable state.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geocode;
mod http;
pub mod venues;

#[doc(hidden)]
pub mod test_support;

pub use geocode::{HttpGeocoder, HttpGeocoderConfig};
pub use http::{ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use venues::{FoursquareConfig, FoursquareVenueSource};
