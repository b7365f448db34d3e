//! Scenario tests for the panel parser.
//!
//! Dumps are built line by line with the default layout so the 45-column
//! gutter never has to be typed out.


use std::io::{BufReader, Cursor, Read};

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{FieldValue, Record, Timestamp};
use crate::parsing::{
    FallbackEncoding, ModeReset, PanelLayout, ParseError, ParseOptions, parse_lines,
    parse_reader, parse_str,
};

fn prefix() -> String {
    PanelLayout::default().interior_prefix().to_string()
}

fn marker(name: &str) -> String {
    format!("{}   \"{name}\": {{           │", prefix())
}

fn row(body: &str) -> String {
    format!("{}{body}           │", prefix())
}

fn parse(lines: &[String]) -> crate::parsing::ParsedDump {
    let dump = parse_lines(lines, &ParseOptions::default());
    invariants::check(&dump);
    dump
}

#[test]
fn single_panel_with_one_field() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Total Batches Created\": 5"),
    ]);

    assert_eq!(
        dump.records,
        vec![Record::new("orders").with("total_batches_created", 5i64)]
    );
}

#[test]
fn panel_without_batch_count_is_still_parsed() {
    let dump = parse(&[marker("orders"), row("     \"Total Batches Queued\": 2,")]);

    assert_eq!(dump.records.len(), 1);
    assert!(!dump.records[0].contains_key("total_batches_created"));
}

#[test]
fn brace_value_opens_last_batch_block_without_storing() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Last Batch Info\": {"),
        row("       \"Event Count\": 3,"),
    ]);

    let record = &dump.records[0];
    assert!(!record.contains_key("last_batch_info"));
    assert!(!record.contains_key("last_batch_last_batch_info"));
    assert_eq!(
        record.get("last_batch_event_count"),
        Some(&FieldValue::Integer(3))
    );
}

#[test]
fn consecutive_markers_produce_bare_records() {
    let dump = parse(&[marker("orders"), marker("customers")]);

    assert_eq!(
        dump.records,
        vec![Record::new("orders"), Record::new("customers")]
    );
}

#[test]
fn line_without_colon_closes_last_batch_block() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Last Batch Info\": {"),
        row("       \"No Of Inserts\": 4,"),
        row("     }"),
        row("     \"No Of Inserts\": 40,"),
    ]);

    let record = &dump.records[0];
    assert_eq!(
        record.get("last_batch_no_of_inserts"),
        Some(&FieldValue::Integer(4))
    );
    assert_eq!(record.get("no_of_inserts"), Some(&FieldValue::Integer(40)));
}

#[test]
fn marker_key_with_data_is_stored_with_prefix() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Last Batch Info\": \"n/a\","),
        row("     \"Integration Task Time\": 12,"),
    ]);

    let keys: Vec<_> = dump.records[0].keys().collect();
    assert_eq!(
        keys,
        vec![
            "source_table_name",
            "last_batch_last_batch_info",
            "last_batch_integration_task_time",
        ]
    );
}

#[test]
fn integration_block_nested_in_last_batch_closes_first() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Last Batch Info\": {"),
        row("       \"Integration Task Time\": {"),
        row("         \"Merge Time In Ms\": 40"),
        row("       }"),
        row("       \"Upload Time In Ms\": 12"),
        row("     }"),
        row("     \"Avg Upload Time In Ms\": 9"),
    ]);

    let keys: Vec<_> = dump.records[0].keys().collect();
    assert_eq!(
        keys,
        vec![
            "source_table_name",
            "last_batch_merge_time_in_ms",
            "last_batch_upload_time_in_ms",
            "avg_upload_time_in_ms",
        ]
    );
}

#[rstest]
#[case(ModeReset::PerPanel, "event_count")]
#[case(ModeReset::Carry, "last_batch_event_count")]
fn mode_reset_policy_applies_to_next_panel(#[case] policy: ModeReset, #[case] key: &str) {
    let lines = [
        marker("orders"),
        row("     \"Last Batch Info\": {"),
        marker("customers"),
        row("     \"Event Count\": 1"),
    ];
    let options = ParseOptions {
        mode_reset: policy,
        ..ParseOptions::default()
    };

    let dump = parse_lines(&lines, &options);

    assert!(dump.records[1].contains_key(key), "{:?}", dump.records[1]);
}

#[test]
fn malformed_marker_opens_no_record() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Total Batches Created\": 1"),
        format!("{}   \"broken: {{    │", prefix()),
        row("     \"Total Batches Created\": 2"),
        marker("customers"),
    ]);

    assert_eq!(dump.stats.malformed_markers, 1);
    assert_eq!(
        dump.records,
        vec![
            Record::new("orders").with("total_batches_created", 1i64),
            Record::new("customers"),
        ]
    );
}

#[test]
fn unquoted_key_is_skipped_and_counted() {
    let dump = parse(&[marker("orders"), row("     Total: 5")]);

    assert_eq!(dump.stats.malformed_keys, 1);
    assert_eq!(dump.records, vec![Record::new("orders")]);
}

#[test]
fn values_are_coerced_in_order() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Wait Milliseconds\": 250,"),
        row("     \"Last Successful Merge Time\": \"2024-03-01T08:15:30Z\","),
        row("     \"Mapped Source Table\": \"SRC.ORDERS\","),
    ]);

    let record = &dump.records[0];
    assert_eq!(
        record.get("wait_milliseconds"),
        Some(&FieldValue::Integer(250))
    );
    assert_eq!(
        record.get("last_successful_merge_time"),
        Timestamp::parse_iso8601("2024-03-01T08:15:30+00:00")
            .map(FieldValue::Timestamp)
            .as_ref()
    );
    assert_eq!(
        record.get("mapped_source_table"),
        Some(&FieldValue::Text("SRC.ORDERS".to_string()))
    );
}

#[test]
fn only_trailing_commas_are_stripped_from_numbers() {
    let dump = parse(&[
        marker("orders"),
        row("     \"Total Batches Created\": 1,234,"),
    ]);

    assert_eq!(
        dump.records[0].get("total_batches_created"),
        Some(&FieldValue::Text("1,234".to_string()))
    );
}

#[test]
fn empty_input_yields_no_records() {
    let dump = parse_str("", &ParseOptions::default());
    assert!(dump.records.is_empty());
    assert_eq!(dump.stats.lines_read, 0);
}

#[test]
fn text_outside_panels_is_ignored() {
    let dump = parse(&[
        "monitor output v2".to_string(),
        row("     \"Queue\": 1"),
        String::new(),
    ]);

    assert!(dump.records.is_empty());
    assert_eq!(dump.stats.ignored_lines, 2);
    assert_eq!(dump.stats.blank_lines, 1);
}

fn latin1_dump() -> Vec<Vec<u8>> {
    vec![marker("orders").into_bytes(), b"caf\xe9 notes".to_vec()]
}

#[test]
fn latin1_lines_are_decoded() {
    let dump = parse_lines(latin1_dump(), &ParseOptions::default());

    assert_eq!(dump.stats.decode_errors, 0);
    assert_eq!(dump.stats.ignored_lines, 1);
    assert_eq!(dump.records, vec![Record::new("orders")]);
}

#[test]
fn undecodable_lines_are_dropped_without_fallback() {
    let options = ParseOptions {
        fallback_encoding: FallbackEncoding::None,
        ..ParseOptions::default()
    };

    let dump = parse_lines(latin1_dump(), &options);

    assert_eq!(dump.stats.decode_errors, 1);
    assert_eq!(dump.stats.lines_read, 2);
    assert_eq!(dump.records, vec![Record::new("orders")]);
}

/// Yields its data, then fails every read.
struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(std::io::Error::other("connection reset")),
            n => Ok(n),
        }
    }
}

#[test]
fn read_failure_keeps_completed_records() {
    let text = [
        marker("orders"),
        row("     \"Total Batches Created\": 5"),
        marker("customers"),
        row("     \"Total Batches Created\": 6"),
    ]
    .join("\n")
        + "\n";
    let reader = BufReader::new(FailingReader {
        data: Cursor::new(text.into_bytes()),
    });

    let err = parse_reader(reader, &ParseOptions::default()).unwrap_err();

    let ParseError::Read {
        line, completed, ..
    } = err;
    assert_eq!(line, 5);
    assert_eq!(
        completed,
        vec![Record::new("orders").with("total_batches_created", 5i64)]
    );
}

#[test]
fn reader_and_lines_agree() {
    let text = [
        marker("orders"),
        row("     \"Total Batches Created\": 5"),
        String::new(),
        marker("customers"),
    ]
    .join("\r\n");

    let from_reader = parse_reader(Cursor::new(text.as_bytes()), &ParseOptions::default()).unwrap();
    let from_str = parse_str(&text, &ParseOptions::default());

    assert_eq!(from_reader.records, from_str.records);
    assert_eq!(from_reader.stats, from_str.stats);
}
