//! # Block Sync
//!
//! Receive-side 64b/66b block synchronization model.
//!
//! Responsibilities:
//! - Search for the slip count that aligns the block boundary with the first
//!   true sync header, given the number of junk bits in front of it
//! - Expose the per-block search trace for diagnostics
//! - Sweep a range of junk-bit counts and summarize the results
//!
//! ## Example
//!
//! ```
//! use block_sync::{Aligner, AlignmentOutcome};
//!
//! let aligner = Aligner::default();
//! assert_eq!(aligner.align(0), AlignmentOutcome::Found { slips: 0 });
//! assert_eq!(aligner.align(2).sentinel(), 33);
//! ```

mod aligner;
mod sweep;

pub use aligner::{align, AlignStep, AlignSteps, Aligner};
pub use sweep::{format_report, sweep, SweepSummary};

// Re-export contracts types
pub use contracts::{
    AlignmentOutcome, AlignmentReport, BlockGeometry, ResidueSets, SweepRange, BLOCK_SIZE,
    DATA_WIDTH, MAX_NUM_BLOCKS, NOT_FOUND_SENTINEL,
};
