mod input;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use mon2sql_config::Config;
use mon2sql_engine::parsing::{ModeReset, parse_reader};
use mon2sql_engine::projection::{DisplayView, project};
use mon2sql_engine::table::RecordTable;
use std::path::PathBuf;

use crate::input::InputSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Sql,
    Table,
}

#[derive(Debug, Parser)]
#[command(
    name = "mon2sql",
    about = "Convert a boxed queue monitor dump into SQL inserts",
    after_help = "Settings are resolved in order by flag, config file, then built-in defaults."
)]
struct Cli {
    #[arg(value_name = "INPUT", help = "Dump file to read, or - for stdin")]
    input: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Config file to use instead of the default")]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Sql, help = "What to print")]
    format: OutputFormat,
    #[arg(long = "max-bytes", value_name = "N", help = "Refuse inputs larger than this")]
    max_bytes: Option<u64>,
    #[arg(
        long = "carry-block-mode",
        help = "Keep an unclosed last-batch block open across panels"
    )]
    carry_block_mode: bool,
    #[arg(short, long, help = "Log debug detail to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    // RUST_LOG still wins over the default level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(&cli)?;
    let source = InputSource::from_arg(cli.input.as_deref());
    let limit = cli.max_bytes.unwrap_or_else(|| config.max_input_bytes());
    let data = source
        .read_capped(limit)
        .with_context(|| format!("Failed to read input from {}", source.name()))?;

    let output = render(&cli, &config, &data)?;
    println!("{output}");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            log::info!("Config path: {}", path.display());
            match Config::load_from_path(&path)? {
                Some(config) => Ok(config),
                None => bail!("Config file not found at {}", path.display()),
            }
        }
        None => {
            let path = Config::config_path();
            let config = Config::load()?;
            if config.is_none() {
                log::debug!("No config file at {}, using defaults", path.display());
            }
            Ok(config.unwrap_or_default())
        }
    }
}

/// Parses `data` and renders it in the requested format.
fn render(cli: &Cli, config: &Config, data: &[u8]) -> Result<String> {
    let mut options = config.parse_options();
    if cli.carry_block_mode {
        options.mode_reset = ModeReset::Carry;
    }

    let dump = parse_reader(data, &options).context("Failed to parse input")?;
    if dump.records.is_empty() {
        log::warn!("No panels found in input");
    }

    match cli.format {
        OutputFormat::Sql => {
            let schema = config.destination_schema();
            let script = project(&dump.records, &schema);
            if script.stats.skipped_invalid > 0 {
                log::warn!(
                    "Skipped {} records missing a valid {}",
                    script.stats.skipped_invalid,
                    schema.validity_column
                );
            }
            Ok(script.to_sql())
        }
        OutputFormat::Table => {
            let table = RecordTable::from_records(&dump.records);
            let view = DisplayView::build(&table, &config.display_options());
            if view.is_empty() {
                log::warn!("No data remaining after filtering");
            }
            Ok(view.to_string().trim_end().to_string())
        }
    }
}
