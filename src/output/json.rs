// json.rs - Machine readable run summary

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analysis::RunSummary;

pub const SUMMARY_FILE_NAME: &str = "outlier_summary.json";

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    version: &'static str,
    generated: String,
    model: &'a str,
    z_threshold: f64,
    total_outliers: usize,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// Write `outlier_summary.json` into `output_dir` and return its path
pub fn write_summary_json(
    output_dir: &Path,
    summary: &RunSummary,
    z_threshold: f64,
    model: &str,
) -> Result<PathBuf, String> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        format!("Failed to create output directory '{}': {}", output_dir.display(), e)
    })?;
    let document = SummaryDocument {
        version: env!("CARGO_PKG_VERSION"),
        generated: chrono::Utc::now().to_rfc3339(),
        model,
        z_threshold,
        total_outliers: summary.total_outliers(),
        summary,
    };
    let content = serde_json::to_string_pretty(&document)
        .map_err(|e| format!("Failed to serialize summary: {}", e))?;

    let path = output_dir.join(SUMMARY_FILE_NAME);
    std::fs::write(&path, content)
        .map_err(|e| format!("Failed to write summary '{}': {}", path.display(), e))?;
    Ok(path)
}
