use serde_json::{Map, Value};

use super::{Cell, Table, TableError};

/// Flat key-value record as produced by JSON decoding.
pub type Record = Map<String, Value>;

/// Build a table from flat records.
///
/// Columns are the union of keys across records in first-seen order. A
/// record lacking a key contributes [`Cell::Null`] to that column. JSON
/// numbers become [`Cell::Integer`] when they fit in `i64` and
/// [`Cell::Float`] otherwise.
///
/// # Errors
/// Returns [`TableError::NestedValue`] when a record holds an array or an
/// object.
///
/// # Examples
/// ```
/// use officescout_core::table::{Cell, records_to_table};
/// use serde_json::json;
///
/// let records = [json!({ "office": "A 1", "count": 2 }), json!({ "office": "B 2" })]
///     .into_iter()
///     .filter_map(|v| v.as_object().cloned())
///     .collect::<Vec<_>>();
/// let table = records_to_table(&records)?;
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.cell("count", 1), Some(&Cell::Null));
/// # Ok::<(), officescout_core::table::TableError>(())
/// ```
pub fn records_to_table(records: &[Record]) -> Result<Table, TableError> {
    let mut names: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let mut table = Table::with_rows(records.len());
    for name in names {
        let cells = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                record
                    .get(name)
                    .map_or(Ok(Cell::Null), |value| json_to_cell(value, name, row))
            })
            .collect::<Result<Vec<_>, _>>()?;
        table.push_column(name, cells)?;
    }
    Ok(table)
}

fn json_to_cell(value: &Value, column: &str, row: usize) -> Result<Cell, TableError> {
    match value {
        Value::Null => Ok(Cell::Null),
        Value::Bool(flag) => Ok(Cell::Bool(*flag)),
        Value::Number(number) => Ok(number.as_i64().map_or_else(
            || Cell::Float(number.as_f64().unwrap_or(f64::NAN)),
            Cell::Integer,
        )),
        Value::String(text) => Ok(Cell::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => Err(TableError::NestedValue {
            column: column.to_owned(),
            row,
        }),
    }
}

impl Table {
    /// Turn each row back into a record, including null cells.
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        (0..self.len())
            .map(|row| {
                self.columns()
                    .iter()
                    .filter_map(|column| {
                        column
                            .cells()
                            .get(row)
                            .map(|cell| (column.name().to_owned(), cell.to_json()))
                    })
                    .collect()
            })
            .collect()
    }
}
