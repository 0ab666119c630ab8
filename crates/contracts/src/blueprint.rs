//! SyncBlueprint - Config Loader output
//!
//! Describes a complete run: framing geometry, accepted residues, the junk-bit
//! sweep and the CRC table generator settings. Every section is optional.

use serde::{Deserialize, Serialize};

use crate::{BlockGeometry, ResidueSets};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete configuration blueprint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Framing geometry
    #[serde(default)]
    pub geometry: BlockGeometry,

    /// Residues accepted per slip parity
    #[serde(default)]
    pub residues: ResidueSets,

    /// Junk-bit sweep range
    #[serde(default)]
    pub sweep: SweepRange,

    /// CRC lookup table settings
    #[serde(default)]
    pub crc: CrcConfig,
}

/// Inclusive junk-bit range swept by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepRange {
    pub start: u64,
    pub end: u64,
}

impl Default for SweepRange {
    /// 64 junk bits fit in one 66-bit block; 2 bits are left for the header.
    fn default() -> Self {
        Self { start: 0, end: 64 }
    }
}

impl SweepRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of junk-bit values covered (0 when `start > end`).
    ///
    /// Saturates at `u64::MAX` for the full `0..=u64::MAX` range.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// CRC polynomial of the 10G PCS datapath (IEEE 802.3 CRC-32, MSB-first).
pub const CRC32_POLY: u32 = 0x04C1_1DB7;

/// CRC-32 lookup table generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrcConfig {
    /// Generator polynomial (normal form, implicit x^32)
    pub polynomial: u32,
    /// Number of tables; 4 covers a 32-bit datapath
    pub table_count: usize,
}

impl Default for CrcConfig {
    fn default() -> Self {
        Self {
            polynomial: CRC32_POLY,
            table_count: 4,
        }
    }
}
