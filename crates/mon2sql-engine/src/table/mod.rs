//! # Column Typing
//!
//! A second, column-wise pass over parsed records. Single-line coercion only
//! sees one value at a time, so a column holding `12.5` next to `3`, or a
//! timestamp next to `N/A`, ends up with mixed types. [`RecordTable`] settles
//! each column on one [`ColumnType`]:
//!
//! 1. All present values already integers → `Integer`; all timestamps → `Timestamp`.
//! 2. Otherwise, if any value reads as a timestamp → `Timestamp`, the rest `Null`.
//! 3. Otherwise, if any value reads as a number → `Integer` when every present
//!    value is a whole number, else `Float` (non-numbers become `Null`).
//! 4. Otherwise → `Text`.
//!
//! Columns appear in the order their key was first seen across records.

mod format;

use indexmap::{IndexMap, IndexSet};

use crate::models::{FieldValue, Record, Timestamp};

pub use format::format_float;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Timestamp,
    Text,
}

/// One value of a typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// The record never had this key.
    Absent,
    /// The key was present but its value does not fit the column type.
    Null,
    Integer(i64),
    Float(f64),
    Timestamp(Timestamp),
    Text(String),
}

impl Cell {
    /// Absent, null, or not-a-number.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Absent | Cell::Null => true,
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Text for tabular display; missing values are empty.
    pub fn display_text(&self) -> String {
        match self {
            Cell::Absent | Cell::Null => String::new(),
            Cell::Float(f) if f.is_nan() => String::new(),
            Cell::Integer(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Timestamp(ts) => ts.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    cells: Vec<Cell>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }
}

/// Column-wise typed view of a record set, one row per record.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    columns: IndexMap<String, Column>,
    rows: usize,
}

impl RecordTable {
    pub fn from_records(records: &[Record]) -> Self {
        let names: IndexSet<&str> = records.iter().flat_map(Record::keys).collect();

        let columns = names
            .into_iter()
            .map(|name| {
                let values: Vec<Option<&FieldValue>> =
                    records.iter().map(|record| record.get(name)).collect();
                let (column_type, cells) = type_column(&values);
                log::debug!("Column {name} typed as {column_type:?}");
                (
                    name.to_string(),
                    Column {
                        name: name.to_string(),
                        column_type,
                        cells,
                    },
                )
            })
            .collect();

        Self {
            columns,
            rows: records.len(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Row indices, in record order.
    pub fn rows(&self) -> std::ops::Range<usize> {
        0..self.rows
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// The cell at `row` in column `name`; `None` if there is no such column.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        self.column(name).and_then(|column| column.get(row))
    }
}

fn type_column(values: &[Option<&FieldValue>]) -> (ColumnType, Vec<Cell>) {
    let mut present = values.iter().flatten();

    if present.clone().all(|v| matches!(v, FieldValue::Integer(_))) {
        return (
            ColumnType::Integer,
            map_cells(values, |v| v.as_integer().map(Cell::Integer)),
        );
    }
    if present.all(|v| matches!(v, FieldValue::Timestamp(_))) {
        return (
            ColumnType::Timestamp,
            map_cells(values, |v| v.as_timestamp().copied().map(Cell::Timestamp)),
        );
    }

    let timestamps: Vec<Option<Timestamp>> =
        values.iter().map(|v| v.and_then(read_timestamp)).collect();
    if timestamps.iter().any(Option::is_some) {
        return (
            ColumnType::Timestamp,
            zip_cells(values, timestamps, Cell::Timestamp),
        );
    }

    let numbers: Vec<Option<Number>> = values.iter().map(|v| v.and_then(read_number)).collect();
    if numbers.iter().any(Option::is_some) {
        let all_whole = values
            .iter()
            .zip(&numbers)
            .filter(|(value, _)| value.is_some())
            .all(|(_, number)| number.and_then(Number::as_whole).is_some());

        return if all_whole {
            let wholes: Vec<Option<i64>> =
                numbers.iter().map(|n| n.and_then(Number::as_whole)).collect();
            (ColumnType::Integer, zip_cells(values, wholes, Cell::Integer))
        } else {
            let floats: Vec<Option<f64>> =
                numbers.iter().map(|n| n.map(Number::as_f64)).collect();
            (ColumnType::Float, zip_cells(values, floats, Cell::Float))
        };
    }

    (
        ColumnType::Text,
        map_cells(values, |v| Some(Cell::Text(v.to_string()))),
    )
}

/// Absent stays absent; a present value that `convert` rejects becomes null.
fn map_cells(
    values: &[Option<&FieldValue>],
    convert: impl Fn(&FieldValue) -> Option<Cell>,
) -> Vec<Cell> {
    values
        .iter()
        .map(|value| match value {
            None => Cell::Absent,
            Some(v) => convert(v).unwrap_or(Cell::Null),
        })
        .collect()
}

fn zip_cells<T>(
    values: &[Option<&FieldValue>],
    converted: Vec<Option<T>>,
    wrap: fn(T) -> Cell,
) -> Vec<Cell> {
    values
        .iter()
        .zip(converted)
        .map(|(value, converted)| match (value, converted) {
            (None, _) => Cell::Absent,
            (Some(_), Some(v)) => wrap(v),
            (Some(_), None) => Cell::Null,
        })
        .collect()
}

fn read_timestamp(value: &FieldValue) -> Option<Timestamp> {
    match value {
        FieldValue::Timestamp(ts) => Some(*ts),
        FieldValue::Text(s) => Timestamp::parse_iso8601(s),
        FieldValue::Integer(_) => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_whole(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Float(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn read_number(value: &FieldValue) -> Option<Number> {
    match value {
        FieldValue::Integer(i) => Some(Number::Int(*i)),
        FieldValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>().map(Number::Int).ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Number::Float)
            })
        }
        FieldValue::Timestamp(_) => None,
    }
}

#[cfg(test)]
mod tests;
