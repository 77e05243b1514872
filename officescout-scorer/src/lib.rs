//! Weighted suitability points for office proximity tables.
//!
//! [`give_points`] turns integer count columns of an
//! [`officescout_core::table::Table`] into float `{column}_points` columns
//! using a tiered rule:
//!
//! | count     | points                      |
//! |-----------|-----------------------------|
//! | below 1   | `0`                         |
//! | exactly 1 | [`PARTIAL_SHARE`] × weight  |
//! | above 1   | weight                      |
//!
//! A single nearby venue earns most of the weight; any further venue earns
//! the rest. Negative counts score zero rather than being rejected.
//!
//! # Examples
//!
//! ```
//! use officescout_core::table::{Cell, Table};
//! use officescout_scorer::{WeightSpec, give_points};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = Table::new();
//! table.push_column("count", vec![Cell::Integer(0), Cell::Integer(1), Cell::Integer(5)])?;
//! let scored = give_points(table, &WeightSpec::new([("count", 10.0)])?)?;
//! assert_eq!(scored.cell("count_points", 1), Some(&Cell::Float(7.0)));
//! assert_eq!(scored.cell("count_points", 2), Some(&Cell::Float(10.0)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use log::debug;
use officescout_core::table::{Cell, Table};

mod error;
mod weights;

pub use error::{PointsError, WeightSpecError};
pub use weights::WeightSpec;

/// Share of the weight awarded for exactly one nearby venue.
pub const PARTIAL_SHARE: f64 = 0.7;

/// Suffix appended to a count column's name to form its points column.
pub const POINTS_SUFFIX: &str = "_points";

/// Name of the points column derived from `column`.
///
/// ```
/// assert_eq!(officescout_scorer::points_column_name("coffee"), "coffee_points");
/// ```
#[must_use]
pub fn points_column_name(column: &str) -> String {
    format!("{column}{POINTS_SUFFIX}")
}

/// Points earned by `count` venues for a column weighted at `weight`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the partial tier is a fixed share of the weight"
)]
pub const fn tier_points(count: i64, weight: f64) -> f64 {
    match count {
        i64::MIN..=0 => 0.0,
        1 => PARTIAL_SHARE * weight,
        _ => weight,
    }
}

/// Add a `{column}_points` column for every weighted column of `table`.
///
/// Points columns are appended in [`WeightSpec`] order; an existing column
/// of the same name has its cells replaced in place. Every weighted column
/// is validated before any points column is written, so an error leaves no
/// partial result. Other columns and the row order are untouched.
///
/// # Errors
/// Returns [`PointsError::MissingColumn`] when a weighted column is absent
/// and [`PointsError::NonIntegerColumn`] when one holds a non-integer cell.
pub fn give_points(mut table: Table, weights: &WeightSpec) -> Result<Table, PointsError> {
    let scored = weights
        .iter()
        .map(|(column, weight)| score_column(&table, column, weight))
        .collect::<Result<Vec<_>, _>>()?;
    for (name, cells) in scored {
        table.set_column(name, cells)?;
    }
    debug!(
        "scored {} columns across {} offices",
        weights.len(),
        table.len()
    );
    Ok(table)
}

fn score_column(
    table: &Table,
    column: &str,
    weight: f64,
) -> Result<(String, Vec<Cell>), PointsError> {
    let source = table
        .column(column)
        .ok_or_else(|| PointsError::MissingColumn {
            column: column.to_owned(),
        })?;
    let cells = source
        .cells()
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            cell.as_integer()
                .map(|count| Cell::Float(tier_points(count, weight)))
                .ok_or_else(|| PointsError::NonIntegerColumn {
                    column: column.to_owned(),
                    row,
                    found: cell.type_name(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((points_column_name(column), cells))
}
