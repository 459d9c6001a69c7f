// statistics.rs - Per-sequence statistics table

use std::path::Path;

use serde::Serialize;

use crate::core::OutlierResult;
use crate::output::ensure_parent_dir;

#[derive(Debug, Serialize)]
struct StatisticRow<'a> {
    sequence_id: &'a str,
    mean_distance: String,
    z_score: String,
    outlier: bool,
}

/// Write one tab separated row per sequence, in alignment order
pub fn write_statistics_tsv(file_path: &Path, result: &OutlierResult) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(file_path)
        .map_err(|e| format!("Failed to create statistics file '{}': {}", file_path.display(), e))?;

    for stat in &result.statistics {
        writer
            .serialize(StatisticRow {
                sequence_id: &stat.sequence_id,
                mean_distance: format!("{:.6}", stat.mean_distance),
                z_score: format!("{:.6}", stat.z_score),
                outlier: result.exceeds_threshold(stat.z_score),
            })
            .map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceStatistic;

    #[test]
    fn test_statistics_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gene_statistics.tsv");
        let statistics = vec![
            SequenceStatistic {
                sequence_id: "A".to_string(),
                mean_distance: 1.0 / 3.0,
                z_score: -0.57735,
            },
            SequenceStatistic {
                sequence_id: "D".to_string(),
                mean_distance: 1.0,
                z_score: 1.7320508,
            },
        ];
        let result = OutlierResult {
            z_threshold: 1.5,
            mean: 0.5,
            std_dev: 0.2887,
            outliers: vec![statistics[1].clone()],
            statistics,
        };

        write_statistics_tsv(&path, &result).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "sequence_id\tmean_distance\tz_score\toutlier");
        assert_eq!(lines[1], "A\t0.333333\t-0.577350\tfalse");
        assert_eq!(lines[2], "D\t1.000000\t1.732051\ttrue");
    }
}
