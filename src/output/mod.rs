// mod.rs - Output writers module

pub mod json;
pub mod plot;
pub mod report;
pub mod statistics;

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::DistanceMatrix;

pub use json::write_summary_json;
pub use plot::{render_distance_plot, write_distance_plot, PlotConfig};
pub use report::{render_report, write_report, REPORT_FILE_NAME};
pub use statistics::write_statistics_tsv;

/// Ensure parent directory exists before creating file
pub(crate) fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| {
            format!("Failed to create parent directory '{}': {}", parent.display(), e)
        })?;
    }
    Ok(())
}

/// Write a distance matrix in TSV format, labelled with sequence identifiers
pub fn write_matrix_tsv(file_path: &Path, ids: &[String], matrix: &DistanceMatrix) -> Result<(), String> {
    if ids.len() != matrix.size() {
        return Err(format!(
            "Cannot write {} x {} matrix with {} labels",
            matrix.size(),
            matrix.size(),
            ids.len()
        ));
    }
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);

    // Header
    write!(writer, "Sequence").map_err(|e| format!("Write error: {}", e))?;
    for id in ids {
        write!(writer, "\t{}", id).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    for (id, row) in ids.iter().zip(matrix.rows()) {
        write!(writer, "{}", id).map_err(|e| format!("Write error: {}", e))?;
        for distance in row {
            write!(writer, "\t{:.6}", distance).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    log::debug!("Distance matrix written to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_matrix_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("m.tsv");
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 0.25], vec![0.25, 0.0]]).unwrap();
        let ids = vec!["a".to_string(), "b".to_string()];

        write_matrix_tsv(&path, &ids, &matrix).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Sequence\ta\tb");
        assert_eq!(lines[1], "a\t0.000000\t0.250000");
        assert_eq!(lines[2], "b\t0.250000\t0.000000");
    }

    #[test]
    fn test_write_matrix_tsv_label_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = DistanceMatrix::zeros(2);
        let err = write_matrix_tsv(&dir.path().join("m.tsv"), &["a".to_string()], &matrix).unwrap_err();
        assert!(err.contains("labels"));
    }
}
