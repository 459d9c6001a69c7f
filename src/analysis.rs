// analysis.rs - Per-file pipeline: load, build matrix, detect, write artifacts

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::core::{calculate_distance_matrix, detect_outliers, DistanceModel, OutlierResult};
use crate::core::DEFAULT_Z_THRESHOLD;
use crate::data::Alignment;
use crate::output;

/// Settings shared by every alignment in a run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub model: DistanceModel,
    pub z_threshold: f64,
    /// Write `<name>_distance_plot.svg`
    pub plot: bool,
    /// Write `<name>_statistics.tsv`
    pub statistics: bool,
    /// Write `<name>_distances.tsv`
    pub matrix: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DistanceModel::default(),
            z_threshold: DEFAULT_Z_THRESHOLD,
            plot: false,
            statistics: false,
            matrix: false,
        }
    }
}

/// Everything downstream consumers need about one processed alignment
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub alignment_name: String,
    pub file_path: PathBuf,
    pub num_sequences: usize,
    pub alignment_length: usize,
    pub model: String,
    pub result: OutlierResult,
    pub plot_path: Option<PathBuf>,
}

/// Alignment that could not be analysed, with the reason
#[derive(Debug, Clone, Serialize)]
pub struct FailedAlignment {
    pub file_path: PathBuf,
    pub error: String,
}

/// Outcome of a whole run, both lists in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub reports: Vec<AlignmentReport>,
    pub failures: Vec<FailedAlignment>,
}

impl RunSummary {
    pub fn total_outliers(&self) -> usize {
        self.reports.iter().map(|r| r.result.outliers.len()).sum()
    }
}

/// Analyse an alignment that is already in memory
pub fn analyze_alignment(
    alignment: &Alignment,
    config: &AnalysisConfig,
) -> crate::core::Result<OutlierResult> {
    let matrix = calculate_distance_matrix(alignment, config.model)?;
    detect_outliers(&matrix, &alignment.ids(), config.z_threshold)
}

/// Alignment names for a batch of files, unique within the batch.
///
/// Files normally keep `Alignment::name_from_path`. When several files share
/// that name (`gene1.fasta` and `gene1.aln`), each of them is named after its
/// whole file name with dots turned into underscores (`gene1_fasta`,
/// `gene1_aln`); a numeric suffix settles anything still equal.
pub fn unique_alignment_names(files: &[PathBuf]) -> Vec<String> {
    let base_names: Vec<String> = files.iter().map(|p| Alignment::name_from_path(p)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &base_names {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }

    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(files.len());
    for (path, base) in files.iter().zip(base_names.iter()) {
        let candidate = if counts[base.as_str()] > 1 {
            path.file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.replace('.', "_"))
                .unwrap_or_else(|| base.clone())
        } else {
            base.clone()
        };

        let mut name = candidate.clone();
        let mut suffix = 2;
        while used.contains(&name) {
            name = format!("{}_{}", candidate, suffix);
            suffix += 1;
        }
        if name != *base {
            log::warn!(
                "Alignment name '{}' is shared by several files; using '{}' for {}",
                base,
                name,
                path.display()
            );
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

/// Process one alignment file, writing optional artifacts into `output_dir`
pub fn process_alignment_file(
    file_path: &Path,
    config: &AnalysisConfig,
    output_dir: &Path,
) -> Result<AlignmentReport, String> {
    process_named_alignment(file_path, Alignment::name_from_path(file_path), config, output_dir)
}

/// Process one file whose artifacts are named after `alignment_name`
fn process_named_alignment(
    file_path: &Path,
    alignment_name: String,
    config: &AnalysisConfig,
    output_dir: &Path,
) -> Result<AlignmentReport, String> {
    let alignment = Alignment::from_fasta(file_path)?;

    let matrix = calculate_distance_matrix(&alignment, config.model)
        .map_err(|e| format!("{}: {}", file_path.display(), e))?;
    let ids = alignment.ids();
    let result = detect_outliers(&matrix, &ids, config.z_threshold)
        .map_err(|e| format!("{}: {}", file_path.display(), e))?;

    if config.matrix {
        let path = output_dir.join(format!("{}_distances.tsv", alignment_name));
        output::write_matrix_tsv(&path, &ids, &matrix)?;
    }
    if config.statistics {
        let path = output_dir.join(format!("{}_statistics.tsv", alignment_name));
        output::write_statistics_tsv(&path, &result)?;
    }
    let plot_path = if config.plot {
        Some(output::write_distance_plot(output_dir, &alignment_name, &result)?)
    } else {
        None
    };

    Ok(AlignmentReport {
        alignment_name,
        file_path: file_path.to_path_buf(),
        num_sequences: alignment.len(),
        alignment_length: alignment.alignment_length(),
        model: config.model.name().to_string(),
        result,
        plot_path,
    })
}

/// Process every file in parallel; results come back in input order.
///
/// Each file is loaded, measured and tested as one unit, so files never
/// share state. Alignment names come from `unique_alignment_names`, so no two
/// files write the same artifact. Failures are logged and collected, not fatal.
pub fn process_all(
    files: &[PathBuf],
    config: &AnalysisConfig,
    output_dir: &Path,
    show_progress: bool,
) -> RunSummary {
    let pb = if show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }

    let names = unique_alignment_names(files);
    let outcomes: Vec<Result<AlignmentReport, FailedAlignment>> = files
        .par_iter()
        .zip(names.into_par_iter())
        .map(|(path, name)| {
            let outcome = process_named_alignment(path, name, config, output_dir).map_err(|error| {
                log::warn!("Skipping {}: {}", path.display(), error);
                FailedAlignment {
                    file_path: path.clone(),
                    error,
                }
            });
            pb.inc(1);
            outcome
        })
        .collect();

    pb.finish_with_message("✅ Alignments processed");

    let mut summary = RunSummary::default();
    for outcome in outcomes {
        match outcome {
            Ok(report) => summary.reports.push(report),
            Err(failure) => summary.failures.push(failure),
        }
    }
    summary
}
