use indexmap::IndexSet;

pub const DEFAULT_TABLE: &str = "public.process_queue_wait_times";

/// Rows without a usable value in this column are never inserted.
pub const DEFAULT_VALIDITY_COLUMN: &str = "total_batches_created";

/// Columns the default destination table accepts.
///
/// Keys from the last-batch block appear here with their `last_batch_`
/// prefix, including the block marker keys themselves.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "batch_queue_id",
    "wait_milliseconds",
    "source_table_name",
    "total_batches_created",
    "partition_pruned_batches",
    "last_successful_merge_time",
    "total_batches_ignored",
    "max_integration_time_in_ms",
    "avg_in_mem_compaction_time_in_ms",
    "avg_batch_size_in_bytes",
    "no_of_updates",
    "no_of_inserts",
    "total_events_merged",
    "no_of_ddls",
    "no_of_deletes",
    "no_of_pkupdates",
    "avg_event_count_per_batch",
    "min_integration_time_in_ms",
    "mapped_source_table",
    "total_batches_queued",
    "avg_compaction_time_in_ms",
    "avg_waiting_time_in_queue_in_ms",
    "avg_integration_time_in_ms",
    "total_batches_uploaded",
    "avg_merge_time_in_ms",
    "last_batch_no_of_updates",
    "last_batch_event_count",
    "last_batch_no_of_inserts",
    "last_batch_max_record_size",
    "last_batch_total_events_merged",
    "last_batch_no_of_ddls",
    "last_batch_sequence_number",
    "last_batch_size_in_bytes",
    "last_batch_compaction_time_in_ms",
    "last_batch_stage_resources_management_time_in_ms",
    "last_batch_upload_time_in_ms",
    "last_batch_merge_time_in_ms",
    "last_batch_in_memory_compaction_time_in_ms",
    "last_batch_pk_update_time_in_ms",
    "last_batch_ddl_execution_time_in_ms",
    "last_batch_total_integration_time_in_ms",
    "last_batch_no_of_deletes",
    "last_batch_no_of_pkupdates",
    "last_batch_accumulation_time_in_ms",
    "last_batch_avg_stage_resources_management_time_in_ms",
    "last_batch_avg_upload_time_in_ms",
    "last_batch_batch_event_count",
    "last_batch_max_record_size_in_batch",
    "last_batch_batch_sequence_number",
    "last_batch_batch_size_in_bytes",
    "last_batch_batch_accumulation_time_in_ms",
    "last_batch_avg_compaction_time_in_ms",
    "last_batch_avg_merge_time_in_ms",
    "last_batch_last_batch_info",
    "last_batch_integration_task_time",
];

/// The table SQL is written for: its name, the columns it accepts, and the
/// column a row must have a value in to be inserted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationSchema {
    pub table: String,
    pub columns: IndexSet<String>,
    pub validity_column: String,
}

impl DestinationSchema {
    pub fn new<I, S>(table: impl Into<String>, columns: I, validity_column: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            validity_column: validity_column.into(),
        }
    }

    /// Whether `column` may appear in an INSERT.
    pub fn allows(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}

impl Default for DestinationSchema {
    fn default() -> Self {
        Self::new(
            DEFAULT_TABLE,
            DEFAULT_COLUMNS.iter().copied(),
            DEFAULT_VALIDITY_COLUMN,
        )
    }
}
