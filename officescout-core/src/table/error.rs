use thiserror::Error;

/// Errors raised by table transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A transform referenced a column the table does not have.
    #[error("column {column:?} does not exist")]
    MissingColumn {
        /// Requested column name.
        column: String,
    },
    /// A column with the requested name already exists.
    #[error("column {column:?} already exists")]
    DuplicateColumn {
        /// Conflicting column name.
        column: String,
    },
    /// A new column did not have one cell per row.
    #[error("column {column:?} has {found} cells but the table has {expected} rows")]
    LengthMismatch {
        /// Name of the rejected column.
        column: String,
        /// Row count of the table.
        expected: usize,
        /// Cell count of the rejected column.
        found: usize,
    },
    /// A cell could not be cast to an integer without loss.
    #[error("cannot convert {value} in column {column:?} row {row} to an integer: {reason}")]
    Conversion {
        /// Column being cast.
        column: String,
        /// Zero-based row of the offending cell.
        row: usize,
        /// Rendered cell value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A record held an array or object where a scalar was expected.
    #[error("record {row} holds a nested value under {column:?}")]
    NestedValue {
        /// Key holding the nested value.
        column: String,
        /// Zero-based index of the record.
        row: usize,
    },
}
