//! Validated per-column scoring weights.

use crate::WeightSpecError;

/// Ordered mapping from count column to the weight it scores at.
///
/// Weights are finite and non-negative, and each column appears once.
/// Iteration follows construction order, which is also the order points
/// columns are appended in.
///
/// # Examples
///
/// ```
/// use officescout_scorer::WeightSpec;
///
/// let weights = WeightSpec::new([("coffee", 10.0), ("schools", 4.0)])?;
/// assert_eq!(weights.weight("schools"), Some(4.0));
/// assert_eq!(weights.columns().collect::<Vec<_>>(), ["coffee", "schools"]);
/// # Ok::<(), officescout_scorer::WeightSpecError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightSpec {
    entries: Vec<(String, f64)>,
}

impl WeightSpec {
    /// Validate `entries` and build a weight specification.
    ///
    /// # Errors
    /// Returns [`WeightSpecError`] for a non-finite or negative weight, or a
    /// column named twice.
    pub fn new<I, S>(entries: I) -> Result<Self, WeightSpecError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut spec = Self::default();
        for (column, weight) in entries {
            spec.push(column.into(), weight)?;
        }
        Ok(spec)
    }

    fn push(&mut self, column: String, weight: f64) -> Result<(), WeightSpecError> {
        if !weight.is_finite() {
            return Err(WeightSpecError::NonFinite { column });
        }
        if weight < 0.0 {
            return Err(WeightSpecError::Negative { column, weight });
        }
        if self.weight(&column).is_some() {
            return Err(WeightSpecError::DuplicateColumn { column });
        }
        self.entries.push((column, weight));
        Ok(())
    }

    /// Weight assigned to `column`, if any.
    #[must_use]
    pub fn weight(&self, column: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, weight)| *weight)
    }

    /// Weighted column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(column, weight)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Number of weighted columns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no column is weighted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
