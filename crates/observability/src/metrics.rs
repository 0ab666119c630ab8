//! Alignment metrics
//!
//! Records `AlignmentReport`s as Prometheus-style metrics and aggregates them
//! in memory for end-of-run summaries.

use contracts::{AlignmentOutcome, AlignmentReport};
use metrics::{counter, gauge, histogram};

/// Record one alignment search.
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_alignment;
///
/// let report = aligner.report(junk_bits);
/// record_alignment(&report);
/// ```
pub fn record_alignment(report: &AlignmentReport) {
    let outcome = match report.outcome {
        AlignmentOutcome::Found { .. } => "found",
        AlignmentOutcome::NotFound => "not_found",
    };
    counter!("pcs_sync_alignments_total", "outcome" => outcome).increment(1);

    histogram!("pcs_sync_steps").record(report.steps as f64);
    gauge!("pcs_sync_last_junk_bits").set(report.junk_bits as f64);

    if let Some(slips) = report.outcome.slips() {
        histogram!("pcs_sync_slips").record(slips as f64);
    }
}

/// Record how many CRC tables were generated
pub fn record_crc_tables(count: usize) {
    counter!("pcs_sync_crc_tables_generated_total").increment(count as u64);
}

/// Sweep metrics aggregator
///
/// Aggregates alignment reports in memory for summaries.
#[derive(Debug, Clone, Default)]
pub struct SweepMetricsAggregator {
    /// Searches recorded
    pub total: u64,

    /// Searches that aligned
    pub found: u64,

    /// Searches that exhausted the horizon
    pub not_found: u64,

    /// Slip count statistics (found only)
    pub slip_stats: RunningStats,

    /// Blocks inspected per search
    pub step_stats: RunningStats,
}

impl SweepMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, report: &AlignmentReport) {
        self.total += 1;
        self.step_stats.push(report.steps as f64);

        match report.outcome.slips() {
            Some(slips) => {
                self.found += 1;
                self.slip_stats.push(slips as f64);
            }
            None => self.not_found += 1,
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total: self.total,
            found: self.found,
            not_found: self.not_found,
            found_rate: if self.total > 0 {
                self.found as f64 / self.total as f64 * 100.0
            } else {
                0.0
            },
            slips: StatsSummary::from(&self.slip_stats),
            steps: StatsSummary::from(&self.step_stats),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<'a> Extend<&'a AlignmentReport> for SweepMetricsAggregator {
    fn extend<I: IntoIterator<Item = &'a AlignmentReport>>(&mut self, iter: I) {
        for report in iter {
            self.update(report);
        }
    }
}

/// Metrics summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total: u64,
    pub found: u64,
    pub not_found: u64,
    pub found_rate: f64,
    pub slips: StatsSummary,
    pub steps: StatsSummary,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Sweep Summary ===")?;
        writeln!(f, "Junk-bit values: {}", self.total)?;
        writeln!(f, "Aligned: {} ({:.2}%)", self.found, self.found_rate)?;
        writeln!(f, "Not found: {}", self.not_found)?;
        writeln!(f, "Slips: {}", self.slips)?;
        writeln!(f, "Blocks inspected: {}", self.steps)?;
        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.0}, max={:.0}, mean={:.2}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
