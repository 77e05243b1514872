//! Integer cast rules.
//!
//! A cast never loses information silently:
//! - integers are kept as they are;
//! - booleans become `0` or `1`;
//! - floats must be finite, integral and inside the `i64` range;
//! - text is trimmed and parsed as a base-10 integer, or as a float that
//!   satisfies the float rule (so `"3.0"` is accepted and `"3.5"` is not);
//! - nulls are rejected.

use super::Cell;

/// Smallest `f64` that converts to `i64` without overflow.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

/// First `f64` above `i64::MAX`.
const I64_MAX_EXCLUSIVE_F64: f64 = 9_223_372_036_854_775_808.0;

/// Convert one cell, returning the rejection reason on failure.
pub(super) fn cast_cell(cell: &Cell) -> Result<i64, &'static str> {
    match cell {
        Cell::Integer(value) => Ok(*value),
        Cell::Bool(flag) => Ok(i64::from(*flag)),
        Cell::Float(value) => cast_float(*value),
        Cell::Text(text) => cast_text(text),
        Cell::Null => Err("value is missing"),
    }
}

fn cast_text(text: &str) -> Result<i64, &'static str> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| "text is not numeric")
        .and_then(cast_float)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is checked to be integral and in range before casting"
)]
fn cast_float(value: f64) -> Result<i64, &'static str> {
    if !value.is_finite() {
        return Err("value is not finite");
    }
    if value.fract() != 0.0 {
        return Err("value has a fractional part");
    }
    if !(I64_MIN_F64..I64_MAX_EXCLUSIVE_F64).contains(&value) {
        return Err("value is outside the 64-bit integer range");
    }
    Ok(value as i64)
}
