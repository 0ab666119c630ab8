//! `align` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use block_sync::{AlignStep, Aligner};
use contracts::{AlignmentOutcome, AlignmentReport};
use serde::Serialize;
use tracing::info;

use super::{build_aligner, load_blueprint};
use crate::cli::AlignArgs;

#[derive(Serialize)]
struct AlignOutput {
    #[serde(flatten)]
    report: AlignmentReport,
    /// Integer form of the outcome (`-1` when not found)
    slip_count: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    trace: Vec<AlignStep>,
}

/// Execute the `align` command
///
/// Negative junk-bit counts are rejected; an unaligned result is not an error.
pub fn run_align(args: &AlignArgs, config: Option<&Path>) -> Result<()> {
    let blueprint = load_blueprint(config)?;
    let aligner = build_aligner(&blueprint)?;

    let report = aligner
        .report_checked(args.junk_bits)
        .context("Cannot run alignment")?;

    observability::record_alignment(&report);
    info!(
        junk_bits = report.junk_bits,
        outcome = %report.outcome,
        steps = report.steps,
        "Alignment computed"
    );

    let trace = if args.trace {
        collect_trace(&aligner, &report)
    } else {
        Vec::new()
    };

    if args.json {
        let output = AlignOutput {
            report,
            slip_count: report.outcome.sentinel(),
            trace,
        };
        let json = serde_json::to_string_pretty(&output)
            .context("Failed to serialize alignment result")?;
        println!("{}", json);
        return Ok(());
    }

    if !trace.is_empty() {
        println!(
            "{:>6} {:>10} {:>5} {:>10} {:>7} {:>7}",
            "block", "expected", "slips", "adjusted", "residue", "aligned"
        );
        for step in &trace {
            println!(
                "{:>6} {:>10} {:>5} {:>10} {:>7} {:>7}",
                step.index,
                step.expected_header,
                step.slip_count,
                step.adjusted_header,
                step.residue,
                if step.aligned { "yes" } else { "-" }
            );
        }
        println!();
    }

    println!("{}", block_sync::format_report(&report));
    if let AlignmentOutcome::NotFound = report.outcome {
        println!(
            "  (searched {} blocks, horizon = {})",
            report.steps,
            aligner.geometry().max_num_blocks
        );
    }

    Ok(())
}

/// Steps up to and including the one that ended the search.
fn collect_trace(aligner: &Aligner, report: &AlignmentReport) -> Vec<AlignStep> {
    aligner
        .steps(report.junk_bits)
        .take(report.steps as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ends_at_aligned_step() {
        let aligner = Aligner::default();
        let report = aligner.report(3);
        let trace = collect_trace(&aligner, &report);
        assert_eq!(trace.len() as u64, report.steps);
        assert!(trace.last().unwrap().aligned);
        assert!(trace[..trace.len() - 1].iter().all(|s| !s.aligned));
        assert_eq!(trace.last().unwrap().slip_count, 31);
    }

    #[test]
    fn test_negative_junk_bits_rejected() {
        let args = AlignArgs {
            junk_bits: -1,
            trace: false,
            json: false,
        };
        let err = run_align(&args, None).unwrap_err();
        assert!(format!("{err:#}").contains("junk_bits"), "got: {err:#}");
    }

    #[test]
    fn test_align_runs_with_defaults() {
        let args = AlignArgs {
            junk_bits: 0,
            trace: true,
            json: true,
        };
        assert!(run_align(&args, None).is_ok());
    }
}
