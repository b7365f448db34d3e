use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{Cell, ColumnType, RecordTable};
use crate::models::{Record, Timestamp};

fn orders() -> Record {
    Record::new("orders")
}

#[test]
fn integer_column_stays_integer() {
    let table = RecordTable::from_records(&[
        orders().with("total_batches_created", 5i64),
        Record::new("customers").with("total_batches_created", 7i64),
    ]);

    let column = table.column("total_batches_created").unwrap();
    assert_eq!(column.column_type(), ColumnType::Integer);
    assert_eq!(column.cells(), &[Cell::Integer(5), Cell::Integer(7)]);
}

#[test]
fn fractional_text_promotes_column_to_float() {
    let table = RecordTable::from_records(&[
        orders().with("avg_event_count_per_batch", "12.5"),
        Record::new("customers").with("avg_event_count_per_batch", 3i64),
    ]);

    let column = table.column("avg_event_count_per_batch").unwrap();
    assert_eq!(column.column_type(), ColumnType::Float);
    assert_eq!(column.cells(), &[Cell::Float(12.5), Cell::Float(3.0)]);
}

#[test]
fn whole_number_text_settles_on_integer() {
    let table = RecordTable::from_records(&[
        orders().with("retries", "4.0"),
        Record::new("customers").with("retries", 2i64),
        Record::new("audit"),
    ]);

    let column = table.column("retries").unwrap();
    assert_eq!(column.column_type(), ColumnType::Integer);
    assert_eq!(
        column.cells(),
        &[Cell::Integer(4), Cell::Integer(2), Cell::Absent]
    );
}

#[test]
fn non_numeric_value_forces_float_with_null() {
    let table = RecordTable::from_records(&[
        orders().with("retries", 4i64),
        Record::new("customers").with("retries", "unknown"),
    ]);

    let column = table.column("retries").unwrap();
    assert_eq!(column.column_type(), ColumnType::Float);
    assert_eq!(column.cells(), &[Cell::Float(4.0), Cell::Null]);
}

#[test]
fn unparseable_timestamp_becomes_null() {
    let merged = Timestamp::parse_iso8601("2024-03-01T08:15:30Z").unwrap();
    let table = RecordTable::from_records(&[
        orders().with("last_successful_merge_time", merged),
        Record::new("customers").with("last_successful_merge_time", "N/A"),
    ]);

    let column = table.column("last_successful_merge_time").unwrap();
    assert_eq!(column.column_type(), ColumnType::Timestamp);
    assert_eq!(column.cells(), &[Cell::Timestamp(merged), Cell::Null]);
}

#[test]
fn text_column_keeps_text() {
    let table = RecordTable::from_records(&[
        orders().with("mapped_source_table", "SRC.ORDERS"),
        Record::new("customers").with("mapped_source_table", "SRC.CUSTOMERS"),
    ]);

    let column = table.column("source_table_name").unwrap();
    assert_eq!(column.column_type(), ColumnType::Text);
    assert_eq!(
        column.cells(),
        &[
            Cell::Text("orders".to_string()),
            Cell::Text("customers".to_string())
        ]
    );
}

#[test]
fn missing_keys_are_absent_not_null() {
    let table = RecordTable::from_records(&[
        orders().with("total_batches_created", 5i64),
        Record::new("customers"),
    ]);

    assert_eq!(table.cell(1, "total_batches_created"), Some(&Cell::Absent));
    assert_eq!(table.cell(0, "no_such_column"), None);
}

#[test]
fn columns_follow_first_appearance() {
    let table = RecordTable::from_records(&[
        orders().with("b", 1i64),
        Record::new("customers").with("a", 2i64).with("b", 3i64),
    ]);

    let names: Vec<_> = table.column_names().collect();
    assert_eq!(names, vec!["source_table_name", "b", "a"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows(), 0..2);
}

#[test]
fn empty_record_set_has_no_columns() {
    let table = RecordTable::from_records(&[]);

    assert!(table.is_empty());
    assert_eq!(table.columns().count(), 0);
}

#[rstest]
#[case(Cell::Absent, true)]
#[case(Cell::Null, true)]
#[case(Cell::Float(f64::NAN), true)]
#[case(Cell::Float(0.0), false)]
#[case(Cell::Integer(0), false)]
#[case(Cell::Text(String::new()), false)]
fn missing_cells(#[case] cell: Cell, #[case] missing: bool) {
    assert_eq!(cell.is_missing(), missing);
}

#[rstest]
#[case(Cell::Null, "")]
#[case(Cell::Float(f64::NAN), "")]
#[case(Cell::Float(3.0), "3.0")]
#[case(Cell::Integer(42), "42")]
#[case(Cell::Text("SRC.ORDERS".to_string()), "SRC.ORDERS")]
fn display_text(#[case] cell: Cell, #[case] expected: &str) {
    assert_eq!(cell.display_text(), expected);
}
