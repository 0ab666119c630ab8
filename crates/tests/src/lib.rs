//! # Integration Tests
//!
//! Workspace-level integration and end-to-end tests.
//!
//! Covers:
//! - Contract snapshot tests
//! - Config file -> Aligner -> sweep table
//! - Golden sweep output for the default geometry
//! - CRC table files on disk

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(contracts::NOT_FOUND_SENTINEL, -1);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(contracts::BLOCK_SIZE, 66);
        assert_eq!(contracts::DATA_WIDTH, 32);
        assert_eq!(contracts::MAX_NUM_BLOCKS, 500);
        assert_eq!(contracts::CRC32_POLY, 0x04C1_1DB7);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;

    use block_sync::{format_report, sweep, Aligner, AlignmentOutcome, SweepSummary};
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::SweepRange;
    use observability::SweepMetricsAggregator;

    /// Driver output for 0..=64 junk bits on the 66/32/500 geometry.
    const GOLDEN_OUTPUT: &str = "\
For Junk Bits: 0, we require 0 slip(s)
For Junk Bits: 1, we require 0 slip(s)
For Junk Bits: 2, we require 33 slip(s)
For Junk Bits: 3, we require 31 slip(s)
For Junk Bits: 4, we require 31 slip(s)
For Junk Bits: 5, we require 29 slip(s)
For Junk Bits: 6, we require 29 slip(s)
For Junk Bits: 7, we require 27 slip(s)
For Junk Bits: 8, we require 27 slip(s)
For Junk Bits: 9, we require 25 slip(s)
For Junk Bits: 10, we require 25 slip(s)
For Junk Bits: 11, we require 23 slip(s)
For Junk Bits: 12, we require 23 slip(s)
For Junk Bits: 13, we require 21 slip(s)
For Junk Bits: 14, we require 21 slip(s)
For Junk Bits: 15, we require 19 slip(s)
For Junk Bits: 16, we require 19 slip(s)
For Junk Bits: 17, we require 17 slip(s)
For Junk Bits: 18, we require 17 slip(s)
For Junk Bits: 19, we require 15 slip(s)
For Junk Bits: 20, we require 15 slip(s)
For Junk Bits: 21, we require 13 slip(s)
For Junk Bits: 22, we require 13 slip(s)
For Junk Bits: 23, we require 11 slip(s)
For Junk Bits: 24, we require 11 slip(s)
For Junk Bits: 25, we require 9 slip(s)
For Junk Bits: 26, we require 9 slip(s)
For Junk Bits: 27, we require 7 slip(s)
For Junk Bits: 28, we require 7 slip(s)
For Junk Bits: 29, we require 5 slip(s)
For Junk Bits: 30, we require 5 slip(s)
For Junk Bits: 31, we require 3 slip(s)
For Junk Bits: 32, we require 3 slip(s)
For Junk Bits: 33, we require 1 slip(s)
For Junk Bits: 34, we require 1 slip(s)
For Junk Bits: 35, we require 32 slip(s)
For Junk Bits: 36, we require 30 slip(s)
For Junk Bits: 37, we require 30 slip(s)
For Junk Bits: 38, we require 28 slip(s)
For Junk Bits: 39, we require 28 slip(s)
For Junk Bits: 40, we require 26 slip(s)
For Junk Bits: 41, we require 26 slip(s)
For Junk Bits: 42, we require 24 slip(s)
For Junk Bits: 43, we require 24 slip(s)
For Junk Bits: 44, we require 22 slip(s)
For Junk Bits: 45, we require 22 slip(s)
For Junk Bits: 46, we require 20 slip(s)
For Junk Bits: 47, we require 20 slip(s)
For Junk Bits: 48, we require 18 slip(s)
For Junk Bits: 49, we require 18 slip(s)
For Junk Bits: 50, we require 16 slip(s)
For Junk Bits: 51, we require 16 slip(s)
For Junk Bits: 52, we require 14 slip(s)
For Junk Bits: 53, we require 14 slip(s)
For Junk Bits: 54, we require 12 slip(s)
For Junk Bits: 55, we require 12 slip(s)
For Junk Bits: 56, we require 10 slip(s)
For Junk Bits: 57, we require 10 slip(s)
For Junk Bits: 58, we require 8 slip(s)
For Junk Bits: 59, we require 8 slip(s)
For Junk Bits: 60, we require 6 slip(s)
For Junk Bits: 61, we require 6 slip(s)
For Junk Bits: 62, we require 4 slip(s)
For Junk Bits: 63, we require 4 slip(s)
For Junk Bits: 64, we require 2 slip(s)
";

    fn render(reports: &[contracts::AlignmentReport]) -> String {
        reports
            .iter()
            .map(|r| format_report(r) + "\n")
            .collect()
    }

    /// Default blueprint -> Aligner -> sweep reproduces the golden table
    #[test]
    fn test_default_sweep_matches_golden_output() {
        let blueprint = ConfigLoader::load_or_default(None).unwrap();
        let aligner = Aligner::new(blueprint.geometry, blueprint.residues.clone()).unwrap();

        let reports = sweep(&aligner, blueprint.sweep);
        assert_eq!(render(&reports), GOLDEN_OUTPUT);

        // Stable across runs
        assert_eq!(sweep(&aligner, blueprint.sweep), reports);
    }

    /// Config file with a custom geometry produces the expected failures
    #[test]
    fn test_config_file_to_sweep() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[geometry]
block_size = 66
data_width = 33
max_num_blocks = 500

[sweep]
start = 0
end = 5
"#
        )
        .unwrap();

        let blueprint = ConfigLoader::load_from_path(file.path()).unwrap();
        let aligner = Aligner::new(blueprint.geometry, blueprint.residues.clone()).unwrap();
        let reports = sweep(&aligner, blueprint.sweep);

        let lines = render(&reports);
        assert_eq!(
            lines,
            "\
For Junk Bits: 0, we require 0 slip(s)
For Junk Bits: 1, we require 0 slip(s)
Failed to find a valid slip count for 2
Failed to find a valid slip count for 3
Failed to find a valid slip count for 4
Failed to find a valid slip count for 5
"
        );

        for report in reports.iter().filter(|r| !r.outcome.is_found()) {
            assert_eq!(report.outcome.sentinel(), -1);
            assert_eq!(report.steps, 500);
        }
    }

    /// Sweep results serialize into the JSON shape the CLI emits
    #[test]
    fn test_sweep_json_rows() {
        let reports = sweep(&Aligner::default(), SweepRange::new(1, 2));
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["junk_bits"], 1);
        assert_eq!(json[0]["status"], "found");
        assert_eq!(json[0]["slips"], 0);
        assert_eq!(json[1]["slips"], 33);
        assert_eq!(json[1]["steps"], 66);
    }

    /// Summaries from block_sync and observability agree
    #[test]
    fn test_summaries_agree() {
        let reports = sweep(&Aligner::default(), SweepRange::default());
        let summary = SweepSummary::from_reports(&reports);

        let mut aggregator = SweepMetricsAggregator::new();
        aggregator.extend(&reports);
        let metrics = aggregator.summary();

        assert_eq!(metrics.total, summary.total);
        assert_eq!(metrics.found, summary.found);
        assert_eq!(metrics.not_found, summary.not_found);
        assert_eq!(metrics.slips.max as u64, summary.max_slips.unwrap());
        assert_eq!(metrics.steps.max as u64, summary.max_steps);
    }

    /// Independent searches give the same answers from several threads
    #[test]
    fn test_parallel_sweep_matches_sequential() {
        let aligner = Aligner::default();
        let sequential: Vec<_> = (0..=64).map(|j| aligner.align(j)).collect();

        let chunks: Vec<Vec<AlignmentOutcome>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..5u64)
                .map(|chunk| {
                    let aligner = &aligner;
                    s.spawn(move || {
                        (chunk * 13..(chunk + 1) * 13)
                            .map(|j| aligner.align(j))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let parallel: Vec<_> = chunks.into_iter().flatten().collect();
        assert_eq!(parallel, sequential);
    }

    /// JSON and TOML configs describing the same run are equivalent
    #[test]
    fn test_json_and_toml_agree() {
        let toml = "[geometry]\nmax_num_blocks = 80\n[sweep]\nend = 10\n";
        let json = r#"{ "geometry": { "max_num_blocks": 80 }, "sweep": { "end": 10 } }"#;
        let a = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        let b = ConfigLoader::load_from_str(json, ConfigFormat::Json).unwrap();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod crc_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use crc_lut::{parse_table, CrcTables};

    /// Config -> tables on disk -> tables read back
    #[test]
    fn test_tables_round_trip_through_files() {
        let blueprint =
            ConfigLoader::load_from_str("[crc]\ntable_count = 4\n", ConfigFormat::Toml).unwrap();
        let tables = CrcTables::from_config(&blueprint.crc).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let paths = tables.write_all(dir.path()).unwrap();
        assert_eq!(paths.len(), 4);

        let reloaded: Vec<_> = paths
            .iter()
            .map(|p| parse_table(&std::fs::read_to_string(p).unwrap()).unwrap())
            .collect();
        assert_eq!(reloaded.as_slice(), tables.tables());

        let first_lines: Vec<_> = paths
            .iter()
            .map(|p| {
                std::fs::read_to_string(p)
                    .unwrap()
                    .lines()
                    .nth(1)
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(first_lines, ["04C11DB7", "D219C1DC", "01D8AC87", "DC6D9AB7"]);
    }
}
