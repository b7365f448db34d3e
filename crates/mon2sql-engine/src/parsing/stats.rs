use std::fmt;

use super::builder::LineOutcome;

/// Per-parse diagnostic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines_read: usize,
    pub decode_errors: usize,
    pub blank_lines: usize,
    pub panels_opened: usize,
    pub malformed_markers: usize,
    pub malformed_keys: usize,
    pub block_exits: usize,
    pub fields_stored: usize,
    pub ignored_lines: usize,
}

impl ParseStats {
    pub fn record(&mut self, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Blank => self.blank_lines += 1,
            LineOutcome::PanelOpened => self.panels_opened += 1,
            LineOutcome::MalformedMarker => self.malformed_markers += 1,
            LineOutcome::Stored { .. } => self.fields_stored += 1,
            LineOutcome::BlockOpened { .. } => {}
            LineOutcome::BlockExit { .. } => self.block_exits += 1,
            LineOutcome::MissingKey => self.malformed_keys += 1,
            LineOutcome::Ignored => self.ignored_lines += 1,
        }
    }
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} panels, {} fields, {} decode errors, {} malformed markers, {} malformed keys, {} ignored",
            self.lines_read,
            self.panels_opened,
            self.fields_stored,
            self.decode_errors,
            self.malformed_markers,
            self.malformed_keys,
            self.ignored_lines
        )
    }
}
