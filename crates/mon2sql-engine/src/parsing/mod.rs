//! # Panel Parsing
//!
//! Turns a boxed monitoring dump into one [`Record`] per panel.
//!
//! ## Parsing Phases
//!
//! 1. **Decoding** (`decode`): each raw line is decoded on its own, UTF-8 first
//!    and then a single-byte fallback. Undecodable lines are dropped and counted.
//!
//! 2. **Line Classification** (`classify`): [`PanelLayout`] sorts each trimmed
//!    line into blank, panel marker, interior, or other.
//!
//! 3. **Record Construction** (`builder`): a [`RecordBuilder`] keeps the open
//!    record and the nested [`BlockMode`], splitting interior lines into
//!    normalized keys and coerced values.
//!
//! ## Key Invariants
//!
//! - At most one record is open at a time
//! - Records emitted == well-formed panel markers seen
//! - While the last-batch block is open every stored key carries `last_batch_`

pub mod builder;
pub mod classify;
pub mod coerce;
pub mod decode;
pub mod kv;
pub mod mode;
pub mod stats;

use std::io::BufRead;

use crate::models::Record;

pub use builder::{LineOutcome, RecordBuilder};
pub use classify::{DEFAULT_GUTTER_WIDTH, LineClass, PanelLayout};
pub use decode::{FallbackEncoding, decode_line};
pub use mode::{BlockEvent, BlockMode, ModeReset};
pub use stats::ParseStats;

/// Undecodable lines beyond this many are counted but not logged.
const DECODE_WARNING_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub layout: PanelLayout,
    pub mode_reset: ModeReset,
    pub fallback_encoding: FallbackEncoding,
}

/// Records recovered from one dump, plus what happened along the way.
#[derive(Debug, Clone, Default)]
pub struct ParsedDump {
    pub records: Vec<Record>,
    pub stats: ParseStats,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Reading the input failed part way through. `completed` holds every
    /// record whose panel was closed before the failure.
    #[error("Failed to read input at line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
        completed: Vec<Record>,
    },
}

/// Parses in-memory lines. Each item is one line without its terminator.
pub fn parse_lines<I, B>(lines: I, options: &ParseOptions) -> ParsedDump
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut scanner = Scanner::new(options);
    for line in lines {
        scanner.push(line.as_ref());
    }
    scanner.finish()
}

/// Parses a stream, splitting on `\n`.
pub fn parse_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<ParsedDump, ParseError> {
    let mut scanner = Scanner::new(options);
    for line in reader.split(b'\n') {
        match line {
            Ok(bytes) => scanner.push(&bytes),
            Err(source) => return Err(scanner.abort(source)),
        }
    }
    Ok(scanner.finish())
}

pub fn parse_str(text: &str, options: &ParseOptions) -> ParsedDump {
    parse_lines(text.lines(), options)
}

/// One pass over the input: decode, classify, build.
struct Scanner<'o> {
    options: &'o ParseOptions,
    builder: RecordBuilder,
    stats: ParseStats,
}

impl<'o> Scanner<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        log::debug!("Starting dump parse");
        Self {
            options,
            builder: RecordBuilder::new(options.mode_reset),
            stats: ParseStats::default(),
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.stats.lines_read += 1;
        let line_number = self.stats.lines_read;

        let Some(decoded) = decode_line(bytes, self.options.fallback_encoding) else {
            if self.stats.decode_errors < DECODE_WARNING_LIMIT {
                log::warn!("Skipping line {line_number} due to undecodable bytes");
            }
            self.stats.decode_errors += 1;
            return;
        };

        let line = decoded.trim();
        let outcome = self.builder.push(self.options.layout.classify(line));
        match &outcome {
            LineOutcome::MalformedMarker => {
                log::warn!("Line {line_number}: could not extract table name from panel marker: {line}");
            }
            LineOutcome::MissingKey => {
                log::debug!("Line {line_number}: could not extract key from: {line}");
            }
            LineOutcome::PanelOpened => {
                log::debug!("Line {line_number}: opened panel");
            }
            other => log::trace!("Line {line_number}: {other:?}"),
        }
        self.stats.record(&outcome);
    }

    fn finish(self) -> ParsedDump {
        let records = self.builder.finish();
        log::info!(
            "Finished dump parse: {} records ({})",
            records.len(),
            self.stats
        );
        ParsedDump {
            records,
            stats: self.stats,
        }
    }

    fn abort(self, source: std::io::Error) -> ParseError {
        let line = self.stats.lines_read + 1;
        log::error!("Read failure near line {line}: {source}");
        ParseError::Read {
            line,
            source,
            completed: self.builder.abandon(),
        }
    }
}

#[cfg(test)]
mod tests;
