//! Configuration validation
//!
//! Rules:
//! - geometry values > 0
//! - data_width < block_size
//! - residue sets non-empty, every residue < block_size
//! - sweep.start <= sweep.end
//! - crc.table_count in 1..=8

use contracts::{ContractError, SyncBlueprint};

/// Most tables a 64-bit datapath needs.
const MAX_CRC_TABLES: usize = 8;

/// Validate a SyncBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &SyncBlueprint) -> Result<(), ContractError> {
    blueprint.geometry.check()?;
    blueprint.residues.check_for(&blueprint.geometry)?;
    validate_sweep(blueprint)?;
    validate_crc(blueprint)?;
    Ok(())
}

fn validate_sweep(blueprint: &SyncBlueprint) -> Result<(), ContractError> {
    let sweep = &blueprint.sweep;
    if sweep.start > sweep.end {
        return Err(ContractError::config_validation(
            "sweep.start / sweep.end",
            format!(
                "start ({}) must be <= end ({})",
                sweep.start, sweep.end
            ),
        ));
    }
    Ok(())
}

fn validate_crc(blueprint: &SyncBlueprint) -> Result<(), ContractError> {
    let count = blueprint.crc.table_count;
    if count == 0 || count > MAX_CRC_TABLES {
        return Err(ContractError::config_validation(
            "crc.table_count",
            format!("table_count must be in 1..={MAX_CRC_TABLES}, got {count}"),
        ));
    }
    Ok(())
}

/// Non-fatal observations about an otherwise valid blueprint.
pub fn collect_warnings(blueprint: &SyncBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();
    let geometry = &blueprint.geometry;

    if blueprint.sweep.end > u64::from(geometry.max_junk_bits()) {
        warnings.push(format!(
            "sweep.end ({}) exceeds block_size - 2 ({}); results repeat with period block_size",
            blueprint.sweep.end,
            geometry.max_junk_bits()
        ));
    }

    let defaults = contracts::BlockGeometry::default();
    if (geometry.block_size, geometry.data_width) != (defaults.block_size, defaults.data_width)
        && blueprint.residues == contracts::ResidueSets::default()
    {
        warnings.push(format!(
            "default residue sets are tuned for {}/{}; re-derive them for {}/{}",
            defaults.block_size, defaults.data_width, geometry.block_size, geometry.data_width
        ));
    }

    if blueprint.crc.table_count < 4 {
        warnings.push(format!(
            "crc.table_count = {} cannot drive slicing-by-4 checksums",
            blueprint.crc.table_count
        ));
    }

    warnings
}
