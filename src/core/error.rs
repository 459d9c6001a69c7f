// error.rs - Error kinds raised by the detection core

use thiserror::Error;

/// Errors that can occur while building distance matrices or detecting outliers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutlierError {
    /// Malformed input alignment (unequal lengths, no records, empty residues)
    #[error("Invalid alignment: {0}")]
    Alignment(String),

    /// Requested distance model is not registered
    #[error("Unsupported distance model '{name}'. Available: {available}")]
    UnsupportedModel { name: String, available: String },

    /// Identifier list and matrix disagree, or the matrix is not square
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Matrix values break the distance invariants (asymmetric, non-zero
    /// diagonal, negative or non-finite entries)
    #[error("Invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// Fewer than two sequences, so a mean excluding self-comparison is undefined
    #[error("Insufficient data: {found} sequence(s), at least 2 are required")]
    InsufficientData { found: usize },
}

pub type Result<T> = std::result::Result<T, OutlierError>;
