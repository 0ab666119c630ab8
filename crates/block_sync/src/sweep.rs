//! Junk-bit sweep driver.

use contracts::{AlignmentOutcome, AlignmentReport, SweepRange};
use serde::Serialize;
use tracing::{debug, info};

use crate::Aligner;

/// Run the aligner once per junk-bit value in `range` (inclusive), in order.
///
/// Each result is also recorded through `observability::metrics`.
pub fn sweep(aligner: &Aligner, range: SweepRange) -> Vec<AlignmentReport> {
    debug!(start = range.start, end = range.end, "Starting junk-bit sweep");

    let reports: Vec<_> = range
        .iter()
        .map(|junk_bits| {
            let report = aligner.report(junk_bits);
            observability::metrics::record_alignment(&report);
            report
        })
        .collect();

    let summary = SweepSummary::from_reports(&reports);
    info!(
        total = summary.total,
        found = summary.found,
        not_found = summary.not_found,
        max_slips = ?summary.max_slips,
        "Sweep complete"
    );

    reports
}

/// Human-readable line for one sweep row.
pub fn format_report(report: &AlignmentReport) -> String {
    match report.outcome {
        AlignmentOutcome::Found { slips } => format!(
            "For Junk Bits: {}, we require {} slip(s)",
            report.junk_bits, slips
        ),
        AlignmentOutcome::NotFound => format!(
            "Failed to find a valid slip count for {}",
            report.junk_bits
        ),
    }
}

/// Aggregate view of a sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Junk-bit values evaluated
    pub total: u64,
    /// Values that aligned within the horizon
    pub found: u64,
    /// Values that exhausted the horizon
    pub not_found: u64,
    /// Largest slip count among found values
    pub max_slips: Option<u64>,
    /// Most blocks inspected by any single search
    pub max_steps: u64,
    /// Junk-bit values that never aligned
    pub unaligned: Vec<u64>,
}

impl SweepSummary {
    pub fn from_reports(reports: &[AlignmentReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.total += 1;
            summary.max_steps = summary.max_steps.max(report.steps);
            match report.outcome.slips() {
                Some(slips) => {
                    summary.found += 1;
                    summary.max_slips = Some(summary.max_slips.map_or(slips, |m| m.max(slips)));
                }
                None => {
                    summary.not_found += 1;
                    summary.unaligned.push(report.junk_bits);
                }
            }
        }
        summary
    }

    /// Every value in the sweep aligned.
    pub fn all_found(&self) -> bool {
        self.not_found == 0
    }
}
