//! Error types raised while validating weights and scoring tables.

use officescout_core::table::TableError;
use thiserror::Error;

/// Errors raised when building a [`WeightSpec`](crate::WeightSpec).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightSpecError {
    /// The weight was NaN or infinite.
    #[error("weight for column {column:?} must be finite")]
    NonFinite {
        /// Column the weight applies to.
        column: String,
    },
    /// The weight was below zero.
    #[error("weight {weight} for column {column:?} must not be negative")]
    Negative {
        /// Column the weight applies to.
        column: String,
        /// Rejected weight.
        weight: f64,
    },
    /// The same column appeared more than once.
    #[error("column {column:?} is weighted more than once")]
    DuplicateColumn {
        /// Repeated column name.
        column: String,
    },
}

/// Errors raised by [`give_points`](crate::give_points).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointsError {
    /// A weighted column is not present in the table.
    #[error("cannot score missing column {column:?}")]
    MissingColumn {
        /// Requested column name.
        column: String,
    },
    /// A weighted column holds a cell that is not an integer.
    #[error("column {column:?} row {row} holds a {found} value; cast it to integer first")]
    NonIntegerColumn {
        /// Offending column.
        column: String,
        /// Zero-based row of the first non-integer cell.
        row: usize,
        /// Type of the offending cell.
        found: &'static str,
    },
    /// Writing a points column failed.
    #[error(transparent)]
    Table(#[from] TableError),
}
