//! Walk nested JSON records by key and index.
//!
//! Upstream services answer with deeply nested documents. [`lookup`] follows
//! a sequence of [`PathSegment`]s through objects and arrays and stops at the
//! first absent segment, returning a [`PathError`] that names the path walked
//! so far instead of panicking.
//!
//! # Examples
//!
//! ```
//! use officescout_core::path::{PathSegment, lookup_str};
//! use serde_json::json;
//!
//! let item = json!({ "venue": { "name": "Blue Bottle" } });
//! let name = lookup_str(&item, &[PathSegment::Key("venue"), PathSegment::Key("name")])?;
//! assert_eq!(name, "Blue Bottle");
//! # Ok::<(), officescout_core::path::PathError>(())
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// One step through a nested record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Member of a JSON object.
    Key(&'a str),
    /// Element of a JSON array.
    Index(usize),
}

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Errors raised while walking a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A key or index along the path was absent.
    #[error("no value at {path}")]
    NotFound {
        /// Rendered path up to and including the missing segment.
        path: String,
    },
    /// The value at the end of the path had the wrong JSON type.
    #[error("value at {path} is not {expected}")]
    UnexpectedType {
        /// Rendered path of the offending value.
        path: String,
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
}

/// Render a path as `$.a.b[0]`.
#[must_use]
pub fn render(path: &[PathSegment<'_>]) -> String {
    path.iter().fold(String::from("$"), |mut acc, segment| {
        acc.push_str(&segment.to_string());
        acc
    })
}

/// Follow `path` through `value`, short-circuiting on the first absence.
///
/// # Errors
/// Returns [`PathError::NotFound`] naming the walked prefix when a key is
/// missing, an index is out of bounds, or a segment is applied to a scalar.
pub fn lookup<'v>(value: &'v Value, path: &[PathSegment<'_>]) -> Result<&'v Value, PathError> {
    path.iter()
        .enumerate()
        .try_fold(value, |current, (depth, segment)| {
            let next = match segment {
                PathSegment::Key(key) => current.get(*key),
                PathSegment::Index(index) => current.get(*index),
            };
            next.ok_or_else(|| PathError::NotFound {
                path: render(path.get(..=depth).unwrap_or(path)),
            })
        })
}

/// Follow `path` and read a string.
///
/// # Errors
/// Returns [`PathError`] when the path is absent or the value is not a string.
pub fn lookup_str<'v>(value: &'v Value, path: &[PathSegment<'_>]) -> Result<&'v str, PathError> {
    lookup(value, path)?
        .as_str()
        .ok_or_else(|| PathError::UnexpectedType {
            path: render(path),
            expected: "a string",
        })
}

/// Follow `path` and read a number as `f64`.
///
/// # Errors
/// Returns [`PathError`] when the path is absent or the value is not numeric.
pub fn lookup_f64(value: &Value, path: &[PathSegment<'_>]) -> Result<f64, PathError> {
    lookup(value, path)?
        .as_f64()
        .ok_or_else(|| PathError::UnexpectedType {
            path: render(path),
            expected: "a number",
        })
}

/// Follow `path` and read an array.
///
/// # Errors
/// Returns [`PathError`] when the path is absent or the value is not an array.
pub fn lookup_array<'v>(
    value: &'v Value,
    path: &[PathSegment<'_>],
) -> Result<&'v [Value], PathError> {
    lookup(value, path)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| PathError::UnexpectedType {
            path: render(path),
            expected: "an array",
        })
}
