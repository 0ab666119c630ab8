//! # CRC LUT
//!
//! Lookup tables for a word-wide CRC-32 datapath.
//!
//! Table 0 is the classic MSB-first byte table. Table `k` advances table
//! `k - 1` by one more zero byte, so four tables let a 32-bit datapath fold a
//! whole word per cycle (slicing-by-4).
//!
//! ## Example
//!
//! ```
//! use crc_lut::CrcTables;
//!
//! let tables = CrcTables::generate(crc_lut::CRC32_POLY, 4).unwrap();
//! assert_eq!(tables.checksum(0xFFFF_FFFF, b"123456789").unwrap(), 0x0376_E6E7);
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::ContractError;
use tracing::{debug, info};

pub use contracts::{CrcConfig, CRC32_POLY};

/// Entries per table (one per byte value).
pub const TABLE_SIZE: usize = 256;

/// One byte-indexed CRC table
pub type CrcTable = [u32; TABLE_SIZE];

/// Remainders of `b << 24` for every byte `b`, MSB-first.
pub fn generate_base_table(poly: u32) -> CrcTable {
    let mut table = [0u32; TABLE_SIZE];
    for (byte, entry) in table.iter_mut().enumerate() {
        let mut crc = (byte as u32) << 24;
        for _ in 0..8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ poly
            } else {
                crc << 1
            };
        }
        *entry = crc;
    }
    table
}

/// Table 0 plus its byte-advanced successors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcTables {
    poly: u32,
    tables: Vec<CrcTable>,
}

impl CrcTables {
    /// Generate `count` tables for `poly`.
    pub fn generate(poly: u32, count: usize) -> Result<Self, ContractError> {
        if count == 0 {
            return Err(ContractError::invalid_input(
                "table_count",
                "at least one table is required",
            ));
        }

        let base = generate_base_table(poly);
        let mut tables = Vec::with_capacity(count);
        tables.push(base);

        for k in 1..count {
            let prev = &tables[k - 1];
            let mut next = [0u32; TABLE_SIZE];
            for (entry, &c) in next.iter_mut().zip(prev.iter()) {
                *entry = (c << 8) ^ base[(c >> 24) as usize];
            }
            tables.push(next);
        }

        debug!(poly = format_args!("{poly:#010X}"), count, "Generated CRC tables");
        Ok(Self { poly, tables })
    }

    /// Tables described by a [`CrcConfig`].
    pub fn from_config(config: &CrcConfig) -> Result<Self, ContractError> {
        Self::generate(config.polynomial, config.table_count)
    }

    pub fn poly(&self) -> u32 {
        self.poly
    }

    pub fn tables(&self) -> &[CrcTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Byte-at-a-time update using table 0 only.
    pub fn update_bytewise(&self, mut crc: u32, data: &[u8]) -> u32 {
        let base = &self.tables[0];
        for &byte in data {
            crc = (crc << 8) ^ base[(((crc >> 24) as u8) ^ byte) as usize];
        }
        crc
    }

    /// Slicing-by-4 update; the tail that does not fill a word goes bytewise.
    ///
    /// No final xor is applied. With `init = 0xFFFF_FFFF` this is CRC-32/MPEG-2.
    pub fn checksum(&self, init: u32, data: &[u8]) -> Result<u32, ContractError> {
        if self.tables.len() < 4 {
            return Err(ContractError::invalid_input(
                "table_count",
                format!("slicing-by-4 needs 4 tables, have {}", self.tables.len()),
            ));
        }

        let [t0, t1, t2, t3] = [
            &self.tables[0],
            &self.tables[1],
            &self.tables[2],
            &self.tables[3],
        ];

        let mut crc = init;
        let mut words = data.chunks_exact(4);
        for word in &mut words {
            crc ^= u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
            crc = t3[(crc >> 24) as usize]
                ^ t2[((crc >> 16) & 0xFF) as usize]
                ^ t1[((crc >> 8) & 0xFF) as usize]
                ^ t0[(crc & 0xFF) as usize];
        }

        Ok(self.update_bytewise(crc, words.remainder()))
    }

    /// Write every table to `dir/table{k}.txt`, creating `dir` if needed.
    ///
    /// Returns the written paths in table order.
    pub fn write_all(&self, dir: &Path) -> Result<Vec<PathBuf>, ContractError> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.tables.len());
        for (k, table) in self.tables.iter().enumerate() {
            let path = dir.join(format!("table{k}.txt"));
            write_table(&path, table)?;
            written.push(path);
        }

        info!(dir = %dir.display(), count = written.len(), "Wrote CRC tables");
        Ok(written)
    }
}

/// One uppercase, zero-padded 8-digit hex value per line.
pub fn render_table(table: &CrcTable) -> String {
    let mut out = String::with_capacity(TABLE_SIZE * 9);
    for value in table {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{value:08X}");
    }
    out
}

/// Write one table in [`render_table`] format.
pub fn write_table(path: &Path, table: &CrcTable) -> Result<(), ContractError> {
    fs::write(path, render_table(table))?;
    Ok(())
}

/// Parse a table written by [`write_table`].
pub fn parse_table(content: &str) -> Result<CrcTable, ContractError> {
    let mut table = [0u32; TABLE_SIZE];
    let mut count = 0;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if count == TABLE_SIZE {
            return Err(ContractError::config_parse(format!(
                "more than {TABLE_SIZE} entries (line {})",
                line_no + 1
            )));
        }
        table[count] = u32::from_str_radix(line, 16).map_err(|e| ContractError::ConfigParse {
            message: format!("bad hex value '{line}' at line {}", line_no + 1),
            source: Some(Box::new(e)),
        })?;
        count += 1;
    }

    if count != TABLE_SIZE {
        return Err(ContractError::config_parse(format!(
            "expected {TABLE_SIZE} entries, found {count}"
        )));
    }
    Ok(table)
}
