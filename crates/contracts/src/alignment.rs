//! AlignmentOutcome - Aligner output
//!
//! Result of a single block-sync search and the sweep row built from it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ContractError;

/// Legacy integer value meaning "no alignment found".
pub const NOT_FOUND_SENTINEL: i64 = -1;

/// Outcome of one alignment search.
///
/// `NotFound` is a normal result (the horizon ran out), never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlignmentOutcome {
    /// Header aligned after `slips` slip operations
    Found { slips: u64 },
    /// No qualifying residue within the search horizon
    NotFound,
}

impl AlignmentOutcome {
    /// Slip count, if alignment was found.
    #[inline]
    pub fn slips(&self) -> Option<u64> {
        match self {
            Self::Found { slips } => Some(*slips),
            Self::NotFound => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Integer form: the slip count, or `-1` when not found.
    pub fn sentinel(&self) -> i64 {
        match self {
            Self::Found { slips } => i64::try_from(*slips).unwrap_or(i64::MAX),
            Self::NotFound => NOT_FOUND_SENTINEL,
        }
    }

    /// Parse the integer form. Values below `-1` are rejected.
    pub fn from_sentinel(value: i64) -> Result<Self, ContractError> {
        match value {
            NOT_FOUND_SENTINEL => Ok(Self::NotFound),
            v if v >= 0 => Ok(Self::Found { slips: v as u64 }),
            v => Err(ContractError::invalid_input(
                "slip_count",
                format!("expected a slip count >= 0 or -1, got {v}"),
            )),
        }
    }
}

impl fmt::Display for AlignmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { slips } => write!(f, "{slips} slip(s)"),
            Self::NotFound => write!(f, "not found"),
        }
    }
}

/// One row of a junk-bit sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Junk bits preceding the first true header
    pub junk_bits: u64,

    /// Search result
    #[serde(flatten)]
    pub outcome: AlignmentOutcome,

    /// Blocks inspected before the search stopped
    pub steps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_values() {
        assert_eq!(AlignmentOutcome::Found { slips: 0 }.sentinel(), 0);
        assert_eq!(AlignmentOutcome::Found { slips: 33 }.sentinel(), 33);
        assert_eq!(AlignmentOutcome::NotFound.sentinel(), -1);
    }

    #[test]
    fn test_from_sentinel() {
        assert_eq!(
            AlignmentOutcome::from_sentinel(-1).unwrap(),
            AlignmentOutcome::NotFound
        );
        assert_eq!(
            AlignmentOutcome::from_sentinel(7).unwrap(),
            AlignmentOutcome::Found { slips: 7 }
        );
        let err = AlignmentOutcome::from_sentinel(-2).unwrap_err();
        assert!(matches!(err, ContractError::InvalidInput { .. }));
    }

    #[test]
    fn test_report_json_shape() {
        let report = AlignmentReport {
            junk_bits: 2,
            outcome: AlignmentOutcome::Found { slips: 33 },
            steps: 66,
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["junk_bits"], 2);
        assert_eq!(json["status"], "found");
        assert_eq!(json["slips"], 33);

        let missing = AlignmentReport {
            junk_bits: 5,
            outcome: AlignmentOutcome::NotFound,
            steps: 500,
        };
        let json = serde_json::to_value(missing).unwrap();
        assert_eq!(json["status"], "not_found");
        assert!(json.get("slips").is_none());
    }
}
