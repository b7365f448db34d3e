use crate::models::Record;

use super::{
    classify::LineClass,
    coerce::coerce,
    kv::{KeyValue, OPEN_BRACE, split_key_value},
    mode::{BlockEvent, BlockMode, ModeReset},
};

/// What a single classified line did to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    PanelOpened,
    /// Panel marker whose table name could not be read.
    MalformedMarker,
    /// A field was written into the open record.
    Stored { key: String },
    /// A marker value (`{`) that only changed the block mode.
    BlockOpened { key: String },
    /// A line without a colon closed a nested block.
    BlockExit { mode: BlockMode },
    MissingKey,
    /// Anything that contributed nothing: non-panel text, stray markers,
    /// interior lines with no open record.
    Ignored,
}

/// Line-driven state machine that turns classified lines into records.
///
/// At most one record is open at a time. It is finalized when the next panel
/// marker arrives or when [`RecordBuilder::finish`] is called.
pub struct RecordBuilder {
    mode_reset: ModeReset,
    mode: BlockMode,
    open: Option<Record>,
    out: Vec<Record>,
}

impl RecordBuilder {
    pub fn new(mode_reset: ModeReset) -> Self {
        Self {
            mode_reset,
            mode: BlockMode::Top,
            open: None,
            out: vec![],
        }
    }

    pub fn mode(&self) -> BlockMode {
        self.mode
    }

    pub fn open_record(&self) -> Option<&Record> {
        self.open.as_ref()
    }

    pub fn push(&mut self, class: LineClass<'_>) -> LineOutcome {
        match class {
            LineClass::Blank => LineOutcome::Blank,
            LineClass::PanelMarker { table_name } => self.open_panel(table_name),
            LineClass::Interior(text) if self.open.is_some() => self.interior(text),
            LineClass::Interior(_) | LineClass::StrayMarker | LineClass::Other => {
                LineOutcome::Ignored
            }
        }
    }

    pub fn finish(mut self) -> Vec<Record> {
        // EOF flush
        self.flush();
        self.out
    }

    /// Gives up on the open record and returns everything already finalized.
    pub fn abandon(self) -> Vec<Record> {
        self.out
    }

    fn open_panel(&mut self, table_name: Option<&str>) -> LineOutcome {
        self.flush();
        match table_name {
            Some(name) => {
                self.open = Some(Record::new(name));
                self.mode = self.mode_reset.on_panel_open(self.mode);
                LineOutcome::PanelOpened
            }
            None => LineOutcome::MalformedMarker,
        }
    }

    fn interior(&mut self, text: &str) -> LineOutcome {
        let (key, value) = match split_key_value(text) {
            KeyValue::NoSeparator => {
                self.mode = self.mode.apply(BlockEvent::Exit);
                return LineOutcome::BlockExit { mode: self.mode };
            }
            KeyValue::MissingKey => return LineOutcome::MissingKey,
            KeyValue::Pair { key, value } => (key, value),
        };

        // Markers are matched on the key before any prefix is applied.
        if let Some(event) = BlockEvent::for_key(&key) {
            self.mode = self.mode.apply(event);
        }
        let key = self.mode.storage_key(&key);

        if value == OPEN_BRACE {
            return LineOutcome::BlockOpened { key };
        }

        let Some(record) = self.open.as_mut() else {
            return LineOutcome::Ignored;
        };
        record.insert(key.clone(), coerce(&value));
        LineOutcome::Stored { key }
    }

    fn flush(&mut self) {
        if let Some(record) = self.open.take() {
            self.out.push(record);
        }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(ModeReset::default())
    }
}
