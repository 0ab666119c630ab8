//! `crc-tables` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::CrcConfig;
use crc_lut::CrcTables;
use tracing::info;

use super::load_blueprint;
use crate::cli::CrcTablesArgs;
use crate::error::CliError;

/// Execute the `crc-tables` command
pub fn run_crc_tables(args: &CrcTablesArgs, config: Option<&Path>) -> Result<()> {
    let blueprint = load_blueprint(config)?;
    let crc = resolve_crc(args, blueprint.crc)?;

    info!(
        poly = format_args!("{:#010X}", crc.polynomial),
        count = crc.table_count,
        out_dir = %args.out_dir.display(),
        "Generating CRC tables"
    );

    let tables = CrcTables::from_config(&crc)?;
    let paths = tables
        .write_all(&args.out_dir)
        .with_context(|| format!("Failed to write tables to {}", args.out_dir.display()))?;
    observability::record_crc_tables(paths.len());

    for path in &paths {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn resolve_crc(args: &CrcTablesArgs, configured: CrcConfig) -> Result<CrcConfig, CliError> {
    let crc = CrcConfig {
        polynomial: args.poly.unwrap_or(configured.polynomial),
        table_count: args.count.unwrap_or(configured.table_count),
    };
    if crc.table_count == 0 {
        return Err(CliError::invalid_argument("--count", "must be at least 1"));
    }
    Ok(crc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(out_dir: PathBuf) -> CrcTablesArgs {
        CrcTablesArgs {
            out_dir,
            poly: None,
            count: None,
        }
    }

    #[test]
    fn test_resolve_crc_overrides() {
        let mut a = args(PathBuf::from("."));
        a.count = Some(2);
        let crc = resolve_crc(&a, CrcConfig::default()).unwrap();
        assert_eq!(crc.table_count, 2);
        assert_eq!(crc.polynomial, 0x04C1_1DB7);

        a.count = Some(0);
        assert!(resolve_crc(&a, CrcConfig::default()).is_err());
    }

    #[test]
    fn test_writes_four_tables() {
        let dir = tempfile::tempdir().unwrap();
        run_crc_tables(&args(dir.path().to_path_buf()), None).unwrap();
        for k in 0..4 {
            assert!(dir.path().join(format!("table{k}.txt")).is_file());
        }
        let table0 = std::fs::read_to_string(dir.path().join("table0.txt")).unwrap();
        assert_eq!(table0.lines().nth(1), Some("04C11DB7"));
    }
}
