use std::fmt;

use crate::table::RecordTable;

use super::schema::DEFAULT_VALIDITY_COLUMN;

/// Columns shown when nothing else is configured.
pub const DEFAULT_DISPLAY_COLUMNS: &[&str] = &[
    "source_table_name",
    "last_successful_merge_time",
    "max_integration_time_in_ms",
    "avg_batch_size_in_bytes",
    "avg_event_count_per_batch",
    "total_batches_queued",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub columns: Vec<String>,
    pub validity_column: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            validity_column: DEFAULT_VALIDITY_COLUMN.to_string(),
        }
    }
}

/// Rows and columns of a [`RecordTable`] picked for a person to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Requested columns the table does not have.
    pub missing_columns: Vec<String>,
    /// Rows dropped for lacking a validity value.
    pub removed_rows: usize,
}

impl DisplayView {
    pub fn build(table: &RecordTable, options: &DisplayOptions) -> Self {
        let validity = table.column(&options.validity_column);
        if validity.is_none() {
            log::debug!(
                "Column {} not found, showing every row",
                options.validity_column
            );
        }
        let kept: Vec<usize> = table
            .rows()
            .filter(|&row| {
                validity
                    .and_then(|column| column.get(row))
                    .is_none_or(|cell| !cell.is_missing())
            })
            .collect();

        let (columns, missing_columns): (Vec<String>, Vec<String>) = options
            .columns
            .iter()
            .cloned()
            .partition(|name| table.column(name).is_some());
        if !missing_columns.is_empty() {
            log::warn!(
                "Some display columns were not found: {}",
                missing_columns.join(", ")
            );
        }

        let rows = kept
            .iter()
            .map(|&row| {
                columns
                    .iter()
                    .map(|name| {
                        table
                            .cell(row, name)
                            .map(|cell| cell.display_text())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows,
            missing_columns,
            removed_rows: table.len() - kept.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Left-aligned columns separated by two spaces, header first.
impl fmt::Display for DisplayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .map(|row| row.get(i).map_or(0, |cell| cell.chars().count()))
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        write_row(f, &header, &widths)?;
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(f, &cells, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}
