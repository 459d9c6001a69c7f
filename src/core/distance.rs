// distance.rs - Pairwise distance matrix construction

use serde::{Deserialize, Serialize};

use crate::core::error::{OutlierError, Result};
use crate::core::model::DistanceModel;
use crate::data::{AlignedSequence, Alignment};

/// Symmetric N×N matrix of pairwise distances, indexed in alignment order.
///
/// Stored row-major in a single buffer. Values are only ever written in
/// mirrored pairs, so `get(i, j) == get(j, i)` holds bit-for-bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// All-zero matrix of the given dimension
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build from explicit rows, e.g. a matrix computed elsewhere.
    ///
    /// Fails with `DimensionMismatch` unless every row has as many entries
    /// as there are rows, and with `InvalidMatrix` unless every value is
    /// finite and non-negative, the diagonal is zero and `M[i][j] == M[j][i]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(OutlierError::DimensionMismatch(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            values.extend(row);
        }
        let matrix = Self { size, values };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<()> {
        for i in 0..self.size {
            for j in 0..self.size {
                let d = self.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(OutlierError::InvalidMatrix(format!(
                        "entry ({}, {}) is {}, distances must be finite and non-negative",
                        i, j, d
                    )));
                }
            }
        }
        for i in 0..self.size {
            let d = self.get(i, i);
            if d != 0.0 {
                return Err(OutlierError::InvalidMatrix(format!(
                    "diagonal entry ({}, {}) is {}, expected 0",
                    i, i, d
                )));
            }
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return Err(OutlierError::InvalidMatrix(format!(
                        "matrix is not symmetric: ({}, {}) = {} but ({}, {}) = {}",
                        i,
                        j,
                        self.get(i, j),
                        j,
                        i,
                        self.get(j, i)
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero, an empty matrix simply has no rows
        self.values.chunks_exact(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Set both mirrored entries at once
    fn set_pair(&mut self, i: usize, j: usize, distance: f64) {
        self.values[i * self.size + j] = distance;
        self.values[j * self.size + i] = distance;
    }
}

/// Calculate the full distance matrix for a validated alignment
pub fn calculate_distance_matrix(alignment: &Alignment, model: DistanceModel) -> Result<DistanceMatrix> {
    build_distance_matrix(alignment.records(), model)
}

/// Calculate the distance matrix for raw aligned records.
///
/// Fails with `Alignment` when there are no records, when residues are
/// empty, or when any two residue strings differ in length.
pub fn build_distance_matrix(records: &[AlignedSequence], model: DistanceModel) -> Result<DistanceMatrix> {
    let first = records
        .first()
        .ok_or_else(|| OutlierError::Alignment("alignment contains no sequences".to_string()))?;
    let expected = first.residues.len();
    if expected == 0 {
        return Err(OutlierError::Alignment(format!(
            "sequence '{}' has no residues",
            first.id
        )));
    }
    if let Some(bad) = records.iter().find(|r| r.residues.len() != expected) {
        return Err(OutlierError::Alignment(format!(
            "sequence '{}' has length {}, expected {} (from '{}')",
            bad.id,
            bad.residues.len(),
            expected,
            first.id
        )));
    }

    let n_sequences = records.len();
    log::debug!(
        "Computing {} distance matrix ({} x {} = {} comparisons)",
        model,
        n_sequences,
        n_sequences,
        n_sequences * (n_sequences - 1) / 2
    );

    // Diagonal stays at zero; each unordered pair is computed exactly once
    let mut matrix = DistanceMatrix::zeros(n_sequences);
    for i in 0..n_sequences {
        let seq_i = records[i].residues.as_bytes();
        for j in (i + 1)..n_sequences {
            let distance = model.distance(seq_i, records[j].residues.as_bytes());
            matrix.set_pair(i, j, distance);
        }
    }

    Ok(matrix)
}
