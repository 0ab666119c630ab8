//! # PCS Sync CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - The junk-bit sweep driver (default command)
//! - Single-value alignment with step traces
//! - Configuration validation and inspection
//! - CRC-32 lookup table generation

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_align, run_crc_tables, run_info, run_sweep, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "PCS Sync CLI starting"
    );

    let command = cli.command.clone().unwrap_or_default();
    let config = cli.config.as_deref();

    // Execute command
    let result = match &command {
        Commands::Sweep(args) => run_sweep(args, config),
        Commands::Align(args) => run_align(args, config),
        Commands::Validate(args) => run_validate(args, config),
        Commands::Info(args) => run_info(args, config),
        Commands::CrcTables(args) => run_crc_tables(args, config),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
///
/// Without `-v` only warnings reach stderr, so the sweep table is the only
/// output a plain run produces.
fn init_logging(cli: &Cli) -> Result<()> {
    let (level, force_level) = if cli.quiet {
        ("error", true)
    } else {
        match cli.verbose {
            0 => ("warn", false),
            1 => ("info", true),
            2 => ("debug", true),
            _ => ("trace", true),
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: cli.metrics_port,
        default_log_level: level.to_string(),
        force_level,
    })
}
