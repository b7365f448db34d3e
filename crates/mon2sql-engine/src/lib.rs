pub mod models;
pub mod parsing;
pub mod projection;
pub mod table;

// Re-export key types for easier usage
pub use models::{FieldValue, Record, Timestamp};
pub use parsing::{
    FallbackEncoding, ModeReset, PanelLayout, ParseError, ParseOptions, ParseStats, ParsedDump,
    parse_lines, parse_reader, parse_str,
};
pub use projection::{
    DestinationSchema, DisplayOptions, DisplayView, ProjectionStats, SqlScript, project,
};
pub use table::{Cell, ColumnType, RecordTable};
