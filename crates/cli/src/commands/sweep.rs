//! `sweep` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use block_sync::{format_report, sweep, SweepSummary};
use contracts::{AlignmentReport, BlockGeometry, SweepRange};
use observability::SweepMetricsAggregator;
use serde::Serialize;
use tracing::info;

use super::{build_aligner, load_blueprint};
use crate::cli::SweepArgs;
use crate::error::CliError;

/// Sweep output for JSON
#[derive(Serialize)]
struct SweepOutput<'a> {
    geometry: &'a BlockGeometry,
    range: SweepRange,
    reports: &'a [AlignmentReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SweepSummary>,
}

/// Execute the `sweep` command
///
/// Succeeds whether or not every junk-bit count aligned.
pub fn run_sweep(args: &SweepArgs, config: Option<&Path>) -> Result<()> {
    let blueprint = load_blueprint(config)?;
    let aligner = build_aligner(&blueprint)?;
    let range = resolve_range(args, blueprint.sweep)?;

    info!(
        start = range.start,
        end = range.end,
        block_size = aligner.geometry().block_size,
        data_width = aligner.geometry().data_width,
        "Running sweep"
    );

    let reports = sweep(&aligner, range);

    if args.json {
        let output = SweepOutput {
            geometry: aligner.geometry(),
            range,
            reports: &reports,
            summary: args.summary.then(|| SweepSummary::from_reports(&reports)),
        };
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize sweep result")?;
        println!("{}", json);
        return Ok(());
    }

    for report in &reports {
        println!("{}", format_report(report));
    }

    if args.summary {
        let mut aggregator = SweepMetricsAggregator::new();
        aggregator.extend(&reports);
        println!("\n{}", aggregator.summary());

        let summary = SweepSummary::from_reports(&reports);
        if !summary.unaligned.is_empty() {
            println!("Unaligned junk bits: {:?}", summary.unaligned);
        }
    }

    Ok(())
}

/// CLI overrides win over the configured range.
fn resolve_range(args: &SweepArgs, configured: SweepRange) -> Result<SweepRange, CliError> {
    let range = SweepRange::new(
        args.start.unwrap_or(configured.start),
        args.end.unwrap_or(configured.end),
    );
    if range.is_empty() {
        return Err(CliError::invalid_argument(
            "--start",
            format!("start ({}) must be <= end ({})", range.start, range.end),
        ));
    }
    Ok(range)
}
