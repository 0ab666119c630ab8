//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PCS Sync - 64b/66b receive block synchronization model
#[derive(Parser, Debug)]
#[command(
    name = "pcs-sync",
    author,
    version,
    about = "10G PCS receive block-sync model",
    long_about = "Models the receive-side block synchronization of a 10G PCS.\n\n\
                  Computes how many slips are needed to align the block boundary \n\
                  with the first sync header for a given number of junk bits, and \n\
                  generates the CRC-32 lookup tables used by the same datapath.\n\n\
                  Runs the 0..=64 junk-bit sweep when no command is given."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PCS_SYNC_VERBOSE")]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "PCS_SYNC_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Path to configuration file (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, global = true, env = "PCS_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Serve Prometheus metrics on this port while running
    #[arg(long, global = true, env = "PCS_SYNC_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sweep junk-bit counts and print the required slips for each
    Sweep(SweepArgs),

    /// Compute the slip count for a single junk-bit count
    Align(AlignArgs),

    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display effective configuration
    Info(InfoArgs),

    /// Generate CRC-32 lookup tables
    CrcTables(CrcTablesArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Sweep(SweepArgs::default())
    }
}

/// Arguments for the `sweep` command
#[derive(Parser, Debug, Clone, Default)]
pub struct SweepArgs {
    /// First junk-bit count (overrides configuration)
    #[arg(long)]
    pub start: Option<u64>,

    /// Last junk-bit count, inclusive (overrides configuration)
    #[arg(long)]
    pub end: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print aggregate statistics after the table
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the `align` command
#[derive(Parser, Debug, Clone)]
pub struct AlignArgs {
    /// Junk bits preceding the first sync header
    #[arg(short, long, allow_negative_numbers = true)]
    pub junk_bits: i64,

    /// Print every inspected block up to the aligned one
    #[arg(long)]
    pub trace: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `crc-tables` command
#[derive(Parser, Debug, Clone)]
pub struct CrcTablesArgs {
    /// Directory receiving table0.txt .. tableN.txt
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Generator polynomial, hex (overrides configuration)
    #[arg(long, value_parser = parse_hex_u32)]
    pub poly: Option<u32>,

    /// Number of tables (overrides configuration)
    #[arg(long)]
    pub count: Option<usize>,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

/// Accepts `0x04C11DB7`, `04C11DB7` or `0X04c11db7`.
fn parse_hex_u32(value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{value}': {e}"))
}
