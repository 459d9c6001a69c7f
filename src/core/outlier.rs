// outlier.rs - Z-score outlier detection over a distance matrix

use serde::{Deserialize, Serialize};

use crate::core::distance::DistanceMatrix;
use crate::core::error::{OutlierError, Result};

/// Default z-score above which a sequence is reported
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Relative bound (in units of the mean, at least 1.0) under which a
/// deviation is rounding noise rather than spread
const ZERO_SPREAD_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Per-sequence dissimilarity to the rest of the alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStatistic {
    pub sequence_id: String,
    /// Mean distance to every other sequence (self-comparison excluded)
    pub mean_distance: f64,
    pub z_score: f64,
}

/// Outcome of a detection run for one alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierResult {
    /// Threshold the outliers were selected with
    pub z_threshold: f64,
    /// Population mean of the per-sequence mean distances
    pub mean: f64,
    /// Population standard deviation of the per-sequence mean distances
    pub std_dev: f64,
    /// Every sequence, in alignment order
    pub statistics: Vec<SequenceStatistic>,
    /// Sequences with `z_score > z_threshold`, in alignment order
    pub outliers: Vec<SequenceStatistic>,
}

impl OutlierResult {
    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }

    pub fn is_outlier(&self, sequence_id: &str) -> bool {
        self.outliers.iter().any(|s| s.sequence_id == sequence_id)
    }

    /// Whether a z-score is flagged under this result's threshold.
    ///
    /// Nothing is flagged when the group has no spread.
    pub fn exceeds_threshold(&self, z_score: f64) -> bool {
        self.std_dev > 0.0 && z_score > self.z_threshold
    }

    /// Alignment-order indices of the outlier sequences
    pub fn outlier_indices(&self) -> Vec<usize> {
        self.statistics
            .iter()
            .enumerate()
            .filter(|(_, s)| self.exceeds_threshold(s.z_score))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn mean_distances(&self) -> Vec<f64> {
        self.statistics.iter().map(|s| s.mean_distance).collect()
    }

    pub fn z_scores(&self) -> Vec<f64> {
        self.statistics.iter().map(|s| s.z_score).collect()
    }
}

/// Mean of each row excluding the diagonal entry.
///
/// Requires at least two sequences. Each row is summed in ascending order, so
/// rows holding the same distances in a different order get identical means.
pub fn mean_distances(matrix: &DistanceMatrix) -> Result<Vec<f64>> {
    let n = matrix.size();
    if n < 2 {
        return Err(OutlierError::InsufficientData { found: n });
    }
    let others = (n - 1) as f64;
    let mut scratch = Vec::with_capacity(n - 1);
    Ok(matrix
        .rows()
        .enumerate()
        .map(|(i, row)| {
            scratch.clear();
            scratch.extend(row.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, &d)| d));
            scratch.sort_by(f64::total_cmp);
            scratch.iter().sum::<f64>() / others
        })
        .collect())
}

/// Population mean and standard deviation (divisor N) of `values`
pub fn population_stats(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Population mean and deviation with rounding-level deviations reported as
/// exactly zero.
///
/// Means that are equal in exact arithmetic can differ in their last bits, which
/// would otherwise turn into z-scores of ±1.
pub fn spread_stats(values: &[f64]) -> (f64, f64) {
    let (mean, std_dev) = population_stats(values);
    if std_dev <= ZERO_SPREAD_TOLERANCE * mean.abs().max(1.0) {
        (mean, 0.0)
    } else {
        (mean, std_dev)
    }
}

/// Standardize `values` against their population mean and deviation.
///
/// A zero deviation means no value differs from the group, so every score is 0.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (mean, std_dev) = spread_stats(values);
    if std_dev == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / std_dev).collect()
}

/// Flag sequences whose mean distance is unusually large.
///
/// `sequence_ids` must line up positionally with the matrix rows. A sequence
/// is an outlier iff its z-score is strictly greater than `z_threshold`; when
/// the mean distances have no spread nothing is flagged, whatever the threshold.
pub fn detect_outliers(
    matrix: &DistanceMatrix,
    sequence_ids: &[String],
    z_threshold: f64,
) -> Result<OutlierResult> {
    if sequence_ids.len() != matrix.size() {
        return Err(OutlierError::DimensionMismatch(format!(
            "{} sequence identifiers for a {} x {} matrix",
            sequence_ids.len(),
            matrix.size(),
            matrix.size()
        )));
    }

    let means = mean_distances(matrix)?;
    let (mean, std_dev) = spread_stats(&means);
    let scores = z_scores(&means);

    let statistics: Vec<SequenceStatistic> = sequence_ids
        .iter()
        .zip(means.iter().zip(scores.iter()))
        .map(|(id, (&mean_distance, &z_score))| SequenceStatistic {
            sequence_id: id.clone(),
            mean_distance,
            z_score,
        })
        .collect();

    let outliers: Vec<SequenceStatistic> = if std_dev == 0.0 {
        Vec::new()
    } else {
        statistics
            .iter()
            .filter(|s| s.z_score > z_threshold)
            .cloned()
            .collect()
    };

    log::debug!(
        "{} of {} sequences above z = {} (mean {:.4}, sd {:.4})",
        outliers.len(),
        statistics.len(),
        z_threshold,
        mean,
        std_dev
    );

    Ok(OutlierResult {
        z_threshold,
        mean,
        std_dev,
        statistics,
        outliers,
    })
}
