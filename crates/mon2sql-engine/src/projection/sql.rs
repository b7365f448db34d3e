use std::fmt;

use crate::models::Record;
use crate::table::{Cell, Column, ColumnType, RecordTable, format_float};

use super::schema::DestinationSchema;

/// What happened to each record during projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    pub emitted: usize,
    /// Records with no column the destination accepts.
    pub dropped_no_columns: usize,
    /// Records failing the validity gate.
    pub skipped_invalid: usize,
}

impl fmt::Display for ProjectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} without destination columns, {} missing a valid batch count",
            self.emitted, self.dropped_no_columns, self.skipped_invalid
        )
    }
}

/// SQL statements ready to run in order: a `TRUNCATE` followed by one
/// `INSERT` per accepted record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlScript {
    pub statements: Vec<String>,
    pub stats: ProjectionStats,
}

impl SqlScript {
    pub fn to_sql(&self) -> String {
        self.statements.join("\n")
    }

    /// Statements after the leading `TRUNCATE`.
    pub fn inserts(&self) -> &[String] {
        self.statements.get(1..).unwrap_or_default()
    }
}

impl fmt::Display for SqlScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Renders `records` as SQL for `schema`.
///
/// Each record contributes the columns it actually has, in its own key
/// order, limited to those the schema allows. Values come from the typed
/// table so a column renders consistently across rows. A record is left out
/// when none of its keys are allowed, or when its validity column is absent,
/// null, or not a number.
///
/// String values are wrapped in single quotes without escaping. The consumer
/// of this output reads them back that way.
pub fn project(records: &[Record], schema: &DestinationSchema) -> SqlScript {
    let table = RecordTable::from_records(records);
    let mut stats = ProjectionStats::default();
    let mut statements = vec![format!("TRUNCATE TABLE {};", schema.table)];

    for (row, record) in records.iter().enumerate() {
        let name = record.source_table_name().unwrap_or_default();

        let columns: Vec<&Column> = record
            .keys()
            .filter(|key| schema.allows(key))
            .filter_map(|key| table.column(key))
            .collect();
        if columns.is_empty() {
            log::debug!("Dropping {name}: no destination columns");
            stats.dropped_no_columns += 1;
            continue;
        }

        let validity = table
            .cell(row, &schema.validity_column)
            .unwrap_or(&Cell::Absent);
        if validity.is_missing() {
            log::debug!("Skipping {name}: no usable {}", schema.validity_column);
            stats.skipped_invalid += 1;
            continue;
        }

        let names: Vec<&str> = columns.iter().map(|column| column.name()).collect();
        let values: Vec<String> = columns
            .iter()
            .map(|column| {
                render_cell(
                    column.get(row).unwrap_or(&Cell::Absent),
                    column.column_type(),
                )
            })
            .collect();

        statements.push(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            schema.table,
            names.join(", "),
            values.join(", ")
        ));
        stats.emitted += 1;
    }

    log::info!("Projected {} records into {}: {stats}", records.len(), schema.table);
    SqlScript { statements, stats }
}

/// Renders one value as a SQL literal for a column of type `column_type`.
///
/// Missing values become the placeholder word the loader expects for that
/// column type: `nan` for floats, `NaT` for timestamps, `None` otherwise.
pub fn render_cell(cell: &Cell, column_type: ColumnType) -> String {
    match cell {
        Cell::Absent | Cell::Null => match column_type {
            ColumnType::Float => "nan".to_string(),
            ColumnType::Timestamp => "NaT".to_string(),
            ColumnType::Integer | ColumnType::Text => "None".to_string(),
        },
        Cell::Integer(i) => i.to_string(),
        Cell::Float(f) => format_float(*f),
        Cell::Timestamp(ts) => ts.to_string(),
        Cell::Text(s) => format!("'{s}'"),
    }
}
