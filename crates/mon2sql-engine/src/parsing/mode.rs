//! Nested-block state of an open panel.
//!
//! Two sub-blocks change how keys are stored: "Last Batch Info" (keys get the
//! `last_batch_` prefix) and "Integration Task Time". They are not strictly
//! nested in the dump, so the state carries whether an integration block was
//! entered from inside a last-batch block. A line without a colon closes the
//! innermost open block.
//!
//! | event                     | `Top`                     | `LastBatch`              | `IntegrationTime { lb }`       |
//! |---------------------------|---------------------------|--------------------------|--------------------------------|
//! | `last_batch_info` key     | `LastBatch`               | `LastBatch`              | `IntegrationTime { true }`     |
//! | `integration_task_time`   | `IntegrationTime { false }` | `IntegrationTime { true }` | unchanged                  |
//! | block exit (no colon)     | `Top`                     | `Top`                    | `lb ? LastBatch : Top`         |

/// Normalized key that opens the last-batch block.
pub const LAST_BATCH_INFO: &str = "last_batch_info";

/// Normalized key that opens the integration-time block.
pub const INTEGRATION_TASK_TIME: &str = "integration_task_time";

/// Prefix stored on keys while inside the last-batch block.
pub const LAST_BATCH_PREFIX: &str = "last_batch_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockMode {
    #[default]
    Top,
    LastBatch,
    IntegrationTime {
        in_last_batch: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEvent {
    EnterLastBatch,
    EnterIntegrationTime,
    Exit,
}

impl BlockEvent {
    /// The event a normalized, unprefixed key triggers, if any.
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            LAST_BATCH_INFO => Some(BlockEvent::EnterLastBatch),
            INTEGRATION_TASK_TIME => Some(BlockEvent::EnterIntegrationTime),
            _ => None,
        }
    }
}

impl BlockMode {
    pub fn apply(self, event: BlockEvent) -> Self {
        use BlockEvent::*;
        use BlockMode::*;

        match (self, event) {
            (Top | LastBatch, EnterLastBatch) => LastBatch,
            (IntegrationTime { .. }, EnterLastBatch) => IntegrationTime {
                in_last_batch: true,
            },
            (Top, EnterIntegrationTime) => IntegrationTime {
                in_last_batch: false,
            },
            (LastBatch, EnterIntegrationTime) => IntegrationTime {
                in_last_batch: true,
            },
            (IntegrationTime { .. }, EnterIntegrationTime) => self,
            (Top | LastBatch, Exit) => Top,
            (IntegrationTime { in_last_batch }, Exit) => {
                if in_last_batch {
                    LastBatch
                } else {
                    Top
                }
            }
        }
    }

    /// Whether keys stored in this mode get the `last_batch_` prefix.
    pub fn prefix_active(self) -> bool {
        matches!(
            self,
            BlockMode::LastBatch
                | BlockMode::IntegrationTime {
                    in_last_batch: true
                }
        )
    }

    /// The key to store for a normalized key in this mode.
    pub fn storage_key(self, key: &str) -> String {
        if self.prefix_active() {
            format!("{LAST_BATCH_PREFIX}{key}")
        } else {
            key.to_string()
        }
    }
}

/// What happens to the block mode when a new panel opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeReset {
    /// Every panel starts at `Top`.
    #[default]
    PerPanel,
    /// The mode left over from the previous panel carries into the next one.
    Carry,
}

impl ModeReset {
    pub fn on_panel_open(self, mode: BlockMode) -> BlockMode {
        match self {
            ModeReset::PerPanel => BlockMode::Top,
            ModeReset::Carry => mode,
        }
    }
}
