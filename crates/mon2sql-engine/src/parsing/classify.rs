use std::sync::OnceLock;

use regex::Regex;

/// Width of the blank gutter between the two leading box borders.
pub const DEFAULT_GUTTER_WIDTH: usize = 45;

const BORDER: char = '│';

/// What follows the interior prefix on a panel marker line.
const MARKER_OPENER: &str = "   \"";

/// How many characters after the interior prefix are checked for a stray
/// marker opener.
const STRAY_MARKER_WINDOW: usize = 5;

/// Classification of a single trimmed line.
///
/// Each line is classified on its own; whether a record is open is the
/// builder's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    /// Start of a new panel. `table_name` is `None` when the quoted name has
    /// no closing quote.
    PanelMarker { table_name: Option<&'a str> },
    /// Line inside a panel, with the interior prefix removed.
    Interior(&'a str),
    /// Interior prefix followed too closely by a marker opener.
    StrayMarker,
    Other,
}

/// The fixed box-drawing pattern of the dump.
#[derive(Debug, Clone)]
pub struct PanelLayout {
    gutter_width: usize,
    interior_prefix: String,
}

/// Marker opener at the start of the text after the interior prefix, with
/// the table name captured up to its closing quote.
fn marker_regex() -> &'static Regex {
    static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKER_REGEX
        .get_or_init(|| Regex::new(r#"^   "(?:([^"]*)")?"#).expect("Invalid panel marker regex"))
}

impl PanelLayout {
    pub fn new(gutter_width: usize) -> Self {
        Self {
            gutter_width,
            interior_prefix: format!("{BORDER}{}{BORDER}", " ".repeat(gutter_width)),
        }
    }

    pub fn gutter_width(&self) -> usize {
        self.gutter_width
    }

    pub fn interior_prefix(&self) -> &str {
        &self.interior_prefix
    }

    /// Classifies a line that has already been trimmed. First match wins:
    /// blank, panel marker, interior, anything else.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        if !line.ends_with(BORDER) {
            return LineClass::Other;
        }

        let Some(rest) = line.strip_prefix(self.interior_prefix.as_str()) else {
            return LineClass::Other;
        };

        if let Some(caps) = marker_regex().captures(rest) {
            return LineClass::PanelMarker {
                table_name: caps.get(1).map(|m| m.as_str()),
            };
        }
        if Self::has_stray_marker(rest) {
            return LineClass::StrayMarker;
        }
        LineClass::Interior(rest)
    }

    fn has_stray_marker(rest: &str) -> bool {
        let window: String = rest.chars().take(STRAY_MARKER_WINDOW).collect();
        window.contains(MARKER_OPENER)
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(DEFAULT_GUTTER_WIDTH)
    }
}
