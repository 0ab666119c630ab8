//! Slip-count search for block alignment.

use contracts::{AlignmentOutcome, AlignmentReport, BlockGeometry, ContractError, ResidueSets};
use serde::Serialize;
use tracing::instrument;

/// One inspected header position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignStep {
    /// Block index within the search horizon
    pub index: u64,
    /// Header position assuming no slips were applied
    pub expected_header: i128,
    /// Slips applied so far (incremented before odd indices are evaluated)
    pub slip_count: u64,
    /// Header position after removing `slip_count * data_width` bits
    pub adjusted_header: i128,
    /// `adjusted_header mod block_size`, always in `[0, block_size)`
    pub residue: u32,
    /// Residue is in the set selected by the slip parity
    pub aligned: bool,
}

/// Lazy walk over the search horizon.
///
/// Yields every step up to `max_num_blocks`, including those after the first
/// aligned one.
#[derive(Debug, Clone)]
pub struct AlignSteps<'a> {
    aligner: &'a Aligner,
    junk_bits: u64,
    index: u64,
    slip_count: u64,
}

impl Iterator for AlignSteps<'_> {
    type Item = AlignStep;

    fn next(&mut self) -> Option<Self::Item> {
        let geometry = &self.aligner.geometry;
        if self.index >= u64::from(geometry.max_num_blocks) {
            return None;
        }

        let index = self.index;
        // Slip pulse is asserted every second cycle
        if index % 2 == 1 {
            self.slip_count += 1;
        }

        let block_size = i128::from(geometry.block_size);
        let expected_header = i128::from(self.junk_bits) + block_size * i128::from(index);
        let adjusted_header =
            expected_header - i128::from(geometry.data_width) * i128::from(self.slip_count);
        // block_size > 0 is checked at construction, result fits in u32
        let residue = adjusted_header.rem_euclid(block_size) as u32;
        let aligned = self.aligner.residues.accepts(self.slip_count, residue);

        self.index += 1;

        Some(AlignStep {
            index,
            expected_header,
            slip_count: self.slip_count,
            adjusted_header,
            residue,
            aligned,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = u64::from(self.aligner.geometry.max_num_blocks);
        let remaining = usize::try_from(total.saturating_sub(self.index)).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AlignSteps<'_> {}

/// Block-sync search over a fixed geometry
///
/// Each call is independent; an `Aligner` can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aligner {
    geometry: BlockGeometry,
    residues: ResidueSets,
}

impl Default for Aligner {
    /// 66-bit blocks, 32-bit slips, 500-block horizon, `{0,1}` / `{1,2}` residues.
    fn default() -> Self {
        Self {
            geometry: BlockGeometry::default(),
            residues: ResidueSets::default(),
        }
    }
}

impl Aligner {
    /// Create an aligner, rejecting geometries or residue sets the search
    /// cannot run on.
    pub fn new(geometry: BlockGeometry, residues: ResidueSets) -> Result<Self, ContractError> {
        geometry.check()?;
        residues.check_for(&geometry)?;
        Ok(Self { geometry, residues })
    }

    pub fn geometry(&self) -> &BlockGeometry {
        &self.geometry
    }

    pub fn residues(&self) -> &ResidueSets {
        &self.residues
    }

    /// Number of slips needed before the header lands on an accepted residue.
    ///
    /// The first aligned step wins. Running out of horizon yields
    /// [`AlignmentOutcome::NotFound`].
    pub fn align(&self, junk_bits: u64) -> AlignmentOutcome {
        self.report(junk_bits).outcome
    }

    /// [`align`](Self::align) for untrusted signed input.
    pub fn align_checked(&self, junk_bits: i64) -> Result<AlignmentOutcome, ContractError> {
        self.report_checked(junk_bits).map(|report| report.outcome)
    }

    /// [`report`](Self::report) for untrusted signed input.
    pub fn report_checked(&self, junk_bits: i64) -> Result<AlignmentReport, ContractError> {
        let junk_bits = u64::try_from(junk_bits).map_err(|_| {
            ContractError::invalid_input("junk_bits", format!("must be >= 0, got {junk_bits}"))
        })?;
        Ok(self.report(junk_bits))
    }

    /// Outcome together with the number of blocks inspected.
    #[instrument(level = "trace", skip(self))]
    pub fn report(&self, junk_bits: u64) -> AlignmentReport {
        let mut steps = 0;
        for step in self.steps(junk_bits) {
            steps += 1;
            if step.aligned {
                tracing::trace!(
                    index = step.index,
                    slip_count = step.slip_count,
                    residue = step.residue,
                    "Header aligned"
                );
                return AlignmentReport {
                    junk_bits,
                    outcome: AlignmentOutcome::Found {
                        slips: step.slip_count,
                    },
                    steps,
                };
            }
        }

        tracing::debug!(
            junk_bits,
            horizon = self.geometry.max_num_blocks,
            "No alignment within search horizon"
        );
        AlignmentReport {
            junk_bits,
            outcome: AlignmentOutcome::NotFound,
            steps,
        }
    }

    /// Step-by-step trace of the search for `junk_bits`.
    pub fn steps(&self, junk_bits: u64) -> AlignSteps<'_> {
        AlignSteps {
            aligner: self,
            junk_bits,
            index: 0,
            slip_count: 0,
        }
    }
}

/// Integer contract on the default geometry: slip count, or `-1` if none.
pub fn align(junk_bits: u64) -> i64 {
    Aligner::default().align(junk_bits).sentinel()
}
