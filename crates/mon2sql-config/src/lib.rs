use mon2sql_engine::parsing::{FallbackEncoding, ModeReset, PanelLayout, ParseOptions};
use mon2sql_engine::projection::{
    DEFAULT_COLUMNS, DEFAULT_DISPLAY_COLUMNS, DEFAULT_TABLE, DEFAULT_VALIDITY_COLUMN,
    DestinationSchema, DisplayOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Inputs larger than this are refused unless configured otherwise.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Every key is optional; anything left out falls back to the engine default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_bytes: Option<u64>,
    pub parser: ParserConfig,
    pub destination: DestinationConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_reset: Option<ModeResetSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_encoding: Option<FallbackSetting>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_column: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeResetSetting {
    PerPanel,
    Carry,
}

impl From<ModeResetSetting> for ModeReset {
    fn from(setting: ModeResetSetting) -> Self {
        match setting {
            ModeResetSetting::PerPanel => ModeReset::PerPanel,
            ModeResetSetting::Carry => ModeReset::Carry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackSetting {
    Latin1,
    None,
}

impl From<FallbackSetting> for FallbackEncoding {
    fn from(setting: FallbackSetting) -> Self {
        match setting {
            FallbackSetting::Latin1 => FallbackEncoding::Latin1,
            FallbackSetting::None => FallbackEncoding::None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mon2sql");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables, e.g. in a `--config` argument.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    pub fn max_input_bytes(&self) -> u64 {
        self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES)
    }

    pub fn parse_options(&self) -> ParseOptions {
        let parser = &self.parser;
        ParseOptions {
            layout: parser
                .gutter_width
                .map(PanelLayout::new)
                .unwrap_or_default(),
            mode_reset: parser.mode_reset.map(Into::into).unwrap_or_default(),
            fallback_encoding: parser.fallback_encoding.map(Into::into).unwrap_or_default(),
        }
    }

    pub fn destination_schema(&self) -> DestinationSchema {
        let destination = &self.destination;
        let columns = match &destination.columns {
            Some(columns) => columns.clone(),
            None => DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        };
        DestinationSchema::new(
            destination.table.as_deref().unwrap_or(DEFAULT_TABLE),
            columns,
            self.validity_column(),
        )
    }

    /// Display filtering shares the destination's validity column.
    pub fn display_options(&self) -> DisplayOptions {
        let columns = match &self.display.columns {
            Some(columns) => columns.clone(),
            None => DEFAULT_DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        };
        DisplayOptions {
            columns,
            validity_column: self.validity_column().to_string(),
        }
    }

    fn validity_column(&self) -> &str {
        self.destination
            .validity_column
            .as_deref()
            .unwrap_or(DEFAULT_VALIDITY_COLUMN)
    }
}
