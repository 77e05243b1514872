//! Core domain types and pure transforms for office proximity scoring.
//!
//! The crate counts, for each candidate [`Office`], the [`Venue`]s that lie
//! within a great-circle radius, and provides the typed [`table::Table`]
//! those counts are scored in. Nothing here performs I/O: venues and
//! coordinates arrive through the [`source`] traits, implemented by
//! `officescout-data`.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use officescout_core::table::{Cell, records_to_table};
//! use officescout_core::{Office, Radius, Venue, count_nearby};
//!
//! # fn main() -> Result<(), officescout_core::table::TableError> {
//! let offices = [Office::new("1", "A", Coord { x: 0.0, y: 0.0 })];
//! let venues = [Venue::new("v1", 0.0, 0.005)];
//! let records: Vec<_> = count_nearby(&offices, &venues, Radius::DEFAULT)
//!     .iter()
//!     .map(|r| r.to_record())
//!     .collect();
//! let table = records_to_table(&records)?;
//! assert_eq!(table.cell("count", 0), Some(&Cell::Integer(1)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod index;
mod office;
pub mod path;
mod proximity;
pub mod source;
pub mod table;
mod venue;

pub use index::VenueIndex;
pub use office::{InputShapeError, Office};
#[cfg(feature = "parallel")]
pub use proximity::count_nearby_parallel;
pub use proximity::{
    COUNT_COLUMN, LABEL_COLUMN, ProximityRecord, Radius, RadiusError, count_nearby, count_within,
    haversine_km,
};
pub use source::{GeoSourceError, Geocoded, Geocoder, VenueQuery, VenueSource, resolve_origin};
pub use venue::Venue;
