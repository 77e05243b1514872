//! Typed, column-oriented tables for proximity counts and points.
//!
//! A [`Table`] holds named [`Column`]s of equal length. Column names are
//! unique and keep their insertion order. Transforms either succeed as a
//! whole or leave the table untouched.
//!
//! # Examples
//!
//! ```
//! use officescout_core::table::{Cell, Table};
//!
//! # fn main() -> Result<(), officescout_core::table::TableError> {
//! let mut table = Table::new();
//! table.push_column("office", vec![Cell::from("A 1"), Cell::from("B 2")])?;
//! table.push_column("num_venues", vec![Cell::from("3"), Cell::from("0")])?;
//! table.rename_column("num_venues", "coffee")?;
//! table.cast_to_integer(&["coffee"])?;
//! assert_eq!(table.cell("coffee", 0), Some(&Cell::Integer(3)));
//! # Ok(())
//! # }
//! ```

mod cast;
mod cell;
mod error;
mod records;

pub use cell::Cell;
pub use error::TableError;
pub use records::{Record, records_to_table};

/// A named sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cells in row order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the column and return its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Create a table with no rows and no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with `rows` rows and no columns yet.
    ///
    /// Every column pushed afterwards must carry exactly `rows` cells. Only a
    /// table with zero rows and no columns adopts the length of its first
    /// column.
    #[must_use]
    pub const fn with_rows(rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows
    }

    /// Report whether the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Look up a single cell.
    #[must_use]
    pub fn cell(&self, column: &str, row: usize) -> Option<&Cell> {
        self.column(column).and_then(|c| c.cells.get(row))
    }

    fn position(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|column| column.name == name)
            .ok_or_else(|| TableError::MissingColumn {
                column: name.to_owned(),
            })
    }

    fn check_length(&self, name: &str, cells: &[Cell]) -> Result<(), TableError> {
        // Only an empty, unsized table adopts the length of its first column.
        let unsized_table = self.columns.is_empty() && self.rows == 0;
        if unsized_table || cells.len() == self.rows {
            return Ok(());
        }
        Err(TableError::LengthMismatch {
            column: name.to_owned(),
            expected: self.rows,
            found: cells.len(),
        })
    }

    /// Append a new column.
    ///
    /// # Errors
    /// Returns [`TableError::DuplicateColumn`] when the name is taken and
    /// [`TableError::LengthMismatch`] when `cells` does not have one entry per
    /// row.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Cell>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(TableError::DuplicateColumn { column: name });
        }
        self.check_length(&name, &cells)?;
        self.rows = cells.len();
        self.columns.push(Column { name, cells });
        Ok(())
    }

    /// Replace the cells of an existing column, or append it when absent.
    ///
    /// # Errors
    /// Returns [`TableError::LengthMismatch`] when `cells` does not have one
    /// entry per row.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Cell>,
    ) -> Result<(), TableError> {
        let name = name.into();
        match self.position(&name) {
            Ok(index) => {
                self.check_length(&name, &cells)?;
                if let Some(column) = self.columns.get_mut(index) {
                    column.cells = cells;
                }
                Ok(())
            }
            Err(_) => self.push_column(name, cells),
        }
    }

    /// Remove a column and return it.
    ///
    /// # Errors
    /// Returns [`TableError::MissingColumn`] when the column is absent.
    pub fn remove_column(&mut self, name: &str) -> Result<Column, TableError> {
        let index = self.position(name)?;
        Ok(self.columns.remove(index))
    }

    /// Rename a column.
    ///
    /// Renaming a column to its current name is a no-op.
    ///
    /// # Errors
    /// Returns [`TableError::MissingColumn`] when `old` is absent, which makes
    /// repeating a rename fail, and [`TableError::DuplicateColumn`] when `new`
    /// already names another column.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<(), TableError> {
        let index = self.position(old)?;
        if old == new {
            return Ok(());
        }
        if self.column(new).is_some() {
            return Err(TableError::DuplicateColumn {
                column: new.to_owned(),
            });
        }
        if let Some(column) = self.columns.get_mut(index) {
            new.clone_into(&mut column.name);
        }
        Ok(())
    }

    /// Cast the named columns to integers.
    ///
    /// See the `cast` rules: integers, booleans, integral floats and numeric
    /// text convert; fractional, non-finite, non-numeric and null cells are
    /// rejected. Either every named column is converted or none is.
    ///
    /// # Errors
    /// Returns [`TableError::MissingColumn`] for an absent column and
    /// [`TableError::Conversion`] for the first cell that cannot be cast.
    pub fn cast_to_integer(&mut self, names: &[&str]) -> Result<(), TableError> {
        let mut converted = Vec::with_capacity(names.len());
        for name in names {
            let index = self.position(name)?;
            let cells = self
                .columns
                .get(index)
                .map(cast_column)
                .transpose()?
                .unwrap_or_default();
            converted.push((index, cells));
        }
        for (index, cells) in converted {
            if let Some(column) = self.columns.get_mut(index) {
                column.cells = cells;
            }
        }
        Ok(())
    }
}

fn cast_column(column: &Column) -> Result<Vec<Cell>, TableError> {
    column
        .cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            cast::cast_cell(cell)
                .map(Cell::Integer)
                .map_err(|reason| TableError::Conversion {
                    column: column.name.clone(),
                    row,
                    value: cell.to_string(),
                    reason,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn counts() -> Table {
        let mut table = Table::new();
        table
            .push_column("office", vec![Cell::from("A 1"), Cell::from("B 2")])
            .expect("first column");
        table
            .push_column("num_venues", vec![Cell::from("1"), Cell::from("4")])
            .expect("second column");
        table
    }

    #[rstest]
    fn rename_moves_cells_to_new_name(mut counts: Table) {
        counts
            .rename_column("num_venues", "coffee")
            .expect("rename succeeds");
        assert!(counts.column("num_venues").is_none());
        assert_eq!(counts.cell("coffee", 1), Some(&Cell::from("4")));
        let names: Vec<_> = counts.column_names().collect();
        assert_eq!(names, ["office", "coffee"]);
    }

    #[rstest]
    fn repeated_rename_fails(mut counts: Table) {
        counts
            .rename_column("num_venues", "coffee")
            .expect("first rename");
        let err = counts
            .rename_column("num_venues", "coffee")
            .expect_err("old name is gone");
        assert_eq!(
            err,
            TableError::MissingColumn {
                column: "num_venues".into()
            }
        );
    }

    #[rstest]
    fn rename_onto_existing_column_fails(mut counts: Table) {
        let err = counts
            .rename_column("num_venues", "office")
            .expect_err("name is taken");
        assert!(matches!(err, TableError::DuplicateColumn { .. }));
    }

    #[rstest]
    fn rename_to_same_name_is_noop(mut counts: Table) {
        let before = counts.clone();
        counts
            .rename_column("office", "office")
            .expect("same name is allowed");
        assert_eq!(counts, before);
    }

    #[rstest]
    fn cast_converts_numeric_text(mut counts: Table) {
        counts.cast_to_integer(&["num_venues"]).expect("numeric text");
        assert_eq!(counts.cell("num_venues", 0), Some(&Cell::Integer(1)));
        assert_eq!(counts.cell("num_venues", 1), Some(&Cell::Integer(4)));
    }

    #[rstest]
    fn cast_is_all_or_nothing(mut counts: Table) {
        counts
            .push_column("schools", vec![Cell::Integer(2), Cell::Float(0.5)])
            .expect("third column");
        let before = counts.clone();
        let err = counts
            .cast_to_integer(&["num_venues", "schools"])
            .expect_err("0.5 is fractional");
        assert_eq!(
            err,
            TableError::Conversion {
                column: "schools".into(),
                row: 1,
                value: "0.5".into(),
                reason: "value has a fractional part",
            }
        );
        assert_eq!(counts, before);
    }

    #[rstest]
    fn cast_reports_missing_column(mut counts: Table) {
        let err = counts
            .cast_to_integer(&["airports"])
            .expect_err("no such column");
        assert!(matches!(err, TableError::MissingColumn { .. }));
    }

    #[rstest]
    fn push_rejects_wrong_length(mut counts: Table) {
        let err = counts
            .push_column("short", vec![Cell::Integer(1)])
            .expect_err("one cell for two rows");
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "short".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[rstest]
    fn presized_table_rejects_shorter_first_column() {
        let mut table = Table::with_rows(3);
        let err = table
            .push_column("office", vec![Cell::from("A 1"), Cell::from("B 2")])
            .expect_err("two cells for three rows");
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "office".into(),
                expected: 3,
                found: 2
            }
        );
        assert_eq!(table.len(), 3);
    }

    #[rstest]
    fn unsized_table_adopts_first_column_length() {
        let mut table = Table::new();
        table
            .push_column("office", vec![Cell::from("A 1"), Cell::from("B 2")])
            .expect("first column sets the length");
        assert_eq!(table.len(), 2);
    }

    #[rstest]
    fn set_column_replaces_in_place(mut counts: Table) {
        counts
            .set_column("office", vec![Cell::from("C 3"), Cell::from("D 4")])
            .expect("replace");
        let names: Vec<_> = counts.column_names().collect();
        assert_eq!(names, ["office", "num_venues"]);
        assert_eq!(counts.cell("office", 0), Some(&Cell::from("C 3")));
    }

    #[rstest]
    fn remove_returns_column(mut counts: Table) {
        let column = counts.remove_column("num_venues").expect("present");
        assert_eq!(column.name(), "num_venues");
        assert_eq!(column.into_cells().len(), 2);
        assert!(counts.remove_column("num_venues").is_err());
    }
}
