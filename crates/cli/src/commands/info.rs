//! `info` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{BlockGeometry, CrcConfig, ResidueSets, SweepRange, SyncBlueprint};
use serde::Serialize;
use tracing::info;

use super::load_blueprint;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo<'a> {
    source: String,
    version: String,
    geometry: &'a BlockGeometry,
    residues: &'a ResidueSets,
    sweep: SweepRange,
    crc: CrcInfo,
}

#[derive(Serialize)]
struct CrcInfo {
    polynomial: String,
    table_count: usize,
}

impl From<&CrcConfig> for CrcInfo {
    fn from(crc: &CrcConfig) -> Self {
        Self {
            polynomial: format!("{:#010X}", crc.polynomial),
            table_count: crc.table_count,
        }
    }
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs, config: Option<&Path>) -> Result<()> {
    let source = match config {
        Some(path) => path.display().to_string(),
        None => "built-in defaults".to_string(),
    };
    info!(source = %source, "Loading configuration info");

    let blueprint = load_blueprint(config)
        .with_context(|| format!("Failed to load config from {source}"))?;

    if args.json {
        let info = build_config_info(&blueprint, source);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, &source);
    }

    Ok(())
}

fn build_config_info(blueprint: &SyncBlueprint, source: String) -> ConfigInfo<'_> {
    ConfigInfo {
        source,
        version: format!("{:?}", blueprint.version),
        geometry: &blueprint.geometry,
        residues: &blueprint.residues,
        sweep: blueprint.sweep,
        crc: CrcInfo::from(&blueprint.crc),
    }
}

fn print_config_info(blueprint: &SyncBlueprint, source: &str) {
    println!("PCS Sync Configuration ({source})\n");

    let geometry = &blueprint.geometry;
    println!("Geometry");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Block size: {} bits", geometry.block_size);
    println!("   ├─ Data width: {} bits per slip", geometry.data_width);
    println!("   └─ Search horizon: {} blocks", geometry.max_num_blocks);

    println!("\nResidues");
    println!("   ├─ Even slip count: {:?}", blueprint.residues.even);
    println!("   └─ Odd slip count: {:?}", blueprint.residues.odd);

    println!("\nSweep");
    println!(
        "   └─ Junk bits: {}..={} ({} values)",
        blueprint.sweep.start,
        blueprint.sweep.end,
        blueprint.sweep.len()
    );

    println!("\nCRC");
    println!("   ├─ Polynomial: {:#010X}", blueprint.crc.polynomial);
    println!("   └─ Tables: {}", blueprint.crc.table_count);

    println!();
}
