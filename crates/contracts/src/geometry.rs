//! Block geometry and header residue sets.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ContractError;

/// Bits per 64b/66b block.
pub const BLOCK_SIZE: u32 = 66;

/// Bits shifted by a single slip (width of the gearbox output word).
pub const DATA_WIDTH: u32 = 32;

/// Number of header positions inspected before giving up.
pub const MAX_NUM_BLOCKS: u32 = 500;

/// Framing geometry of the receive datapath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_widths"))]
#[serde(default)]
pub struct BlockGeometry {
    /// Bits per block (header + payload)
    #[validate(range(min = 1, message = "block_size must be > 0"))]
    pub block_size: u32,

    /// Bits corrected per slip operation
    #[validate(range(min = 1, message = "data_width must be > 0"))]
    pub data_width: u32,

    /// Search horizon in blocks
    #[validate(range(min = 1, message = "max_num_blocks must be > 0"))]
    pub max_num_blocks: u32,
}

impl Default for BlockGeometry {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            data_width: DATA_WIDTH,
            max_num_blocks: MAX_NUM_BLOCKS,
        }
    }
}

impl BlockGeometry {
    /// Check the geometry, reporting the first problem as a `ConfigValidation` error.
    pub fn check(&self) -> Result<(), ContractError> {
        self.validate()
            .map_err(|e| ContractError::from_validation("geometry", &e))
    }

    /// Largest junk-bit count that still leaves room for a header inside the
    /// first block (`block_size - 2`).
    pub fn max_junk_bits(&self) -> u32 {
        self.block_size.saturating_sub(2)
    }
}

fn validate_widths(geometry: &BlockGeometry) -> Result<(), ValidationError> {
    if geometry.data_width >= geometry.block_size {
        let mut err = ValidationError::new("data_width_range");
        err.message = Some(
            format!(
                "data_width ({}) must be < block_size ({})",
                geometry.data_width, geometry.block_size
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Header residues accepted as aligned, split by slip-counter parity.
///
/// The defaults hold for the 66/32 geometry only. Other geometries must supply
/// their own sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidueSets {
    /// Accepted residues while the slip counter is even
    pub even: Vec<u32>,
    /// Accepted residues while the slip counter is odd
    pub odd: Vec<u32>,
}

impl Default for ResidueSets {
    fn default() -> Self {
        Self {
            even: vec![0, 1],
            odd: vec![1, 2],
        }
    }
}

impl ResidueSets {
    /// Whether `residue` counts as aligned for the given slip count.
    #[inline]
    pub fn accepts(&self, slip_count: u64, residue: u32) -> bool {
        let set = if slip_count % 2 == 0 {
            &self.even
        } else {
            &self.odd
        };
        set.contains(&residue)
    }

    /// Both sets must be non-empty and every residue must be `< block_size`.
    pub fn check_for(&self, geometry: &BlockGeometry) -> Result<(), ContractError> {
        for (name, set) in [("even", &self.even), ("odd", &self.odd)] {
            if set.is_empty() {
                return Err(ContractError::config_validation(
                    format!("residues.{name}"),
                    "residue set cannot be empty",
                ));
            }
            if let Some(bad) = set.iter().find(|&&r| r >= geometry.block_size) {
                return Err(ContractError::config_validation(
                    format!("residues.{name}"),
                    format!(
                        "residue {bad} out of range, must be < block_size ({})",
                        geometry.block_size
                    ),
                ));
            }
        }
        Ok(())
    }
}
