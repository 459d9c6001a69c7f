// report.rs - Human readable summary report

use std::fmt;
use std::path::{Path, PathBuf};

use crate::analysis::RunSummary;

pub const REPORT_FILE_NAME: &str = "outlier_report.txt";

const NO_OUTLIERS_ANYWHERE: &str = "No outlier sequences were detected in any alignments.";

/// Render the text report for a run.
///
/// `generated` is stamped into the header verbatim.
pub fn render_report(
    summary: &RunSummary,
    z_threshold: f64,
    model: &str,
    generated: &str,
) -> Result<String, String> {
    let mut out = String::new();
    write_report_text(&mut out, summary, z_threshold, model, generated)
        .map_err(|e| format!("Failed to format report: {}", e))?;
    Ok(out)
}

fn write_report_text(
    out: &mut impl fmt::Write,
    summary: &RunSummary,
    z_threshold: f64,
    model: &str,
    generated: &str,
) -> fmt::Result {
    writeln!(out, "OUTLIER SEQUENCE ANALYSIS REPORT")?;
    writeln!(out, "===============================")?;
    writeln!(out, "Generated: {}", generated)?;
    writeln!(out, "Tool: msaoutlier v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Distance model: {}", model)?;
    writeln!(out, "Z-score threshold: {}", z_threshold)?;
    writeln!(out)?;

    let mut found_outliers = false;
    for report in &summary.reports {
        writeln!(out, "Alignment: {}", report.alignment_name)?;
        writeln!(out, "File: {}", report.file_path.display())?;
        writeln!(out, "Sequences: {}", report.num_sequences)?;
        writeln!(out, "Alignment Length: {}", report.alignment_length)?;

        if report.result.has_outliers() {
            found_outliers = true;
            writeln!(out, "\nPotential outlier sequences:")?;
            for outlier in &report.result.outliers {
                writeln!(
                    out,
                    "  - {}: Avg Distance = {:.4}, Z-score = {:.4}",
                    outlier.sequence_id, outlier.mean_distance, outlier.z_score
                )?;
            }
            if let Some(plot_path) = &report.plot_path {
                writeln!(out, "\nDistance plot saved to: {}", plot_path.display())?;
            }
        } else {
            writeln!(out, "\nNo outlier sequences detected.")?;
        }

        writeln!(out, "\n{}\n", "-".repeat(50))?;
    }

    if !summary.failures.is_empty() {
        writeln!(out, "Skipped alignments:")?;
        for failure in &summary.failures {
            writeln!(out, "  - {}: {}", failure.file_path.display(), failure.error)?;
        }
        writeln!(out)?;
    }

    if !found_outliers {
        writeln!(out, "{}", NO_OUTLIERS_ANYWHERE)?;
    }
    Ok(())
}

/// Write `outlier_report.txt` into `output_dir` and return its path
pub fn write_report(
    output_dir: &Path,
    summary: &RunSummary,
    z_threshold: f64,
    model: &str,
) -> Result<PathBuf, String> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        format!("Failed to create output directory '{}': {}", output_dir.display(), e)
    })?;
    let report_path = output_dir.join(REPORT_FILE_NAME);
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let content = render_report(summary, z_threshold, model, &generated)?;

    std::fs::write(&report_path, content)
        .map_err(|e| format!("Failed to write report '{}': {}", report_path.display(), e))?;
    Ok(report_path)
}
