// lib.rs - msaoutlier library root

//! # msaoutlier - Distance-based outlier detection for multiple sequence alignments
//!
//! Sequences in an alignment are reduced to their mean pairwise distance to
//! every other sequence. Those means are standardized into population
//! z-scores and sequences scoring strictly above a threshold are reported as
//! potential outliers (contamination, misassignment, paralogs, bad reads).
//!
//! ## Features
//!
//! - **Pure core**: matrix construction and detection have no I/O and no shared state
//! - **Pluggable models**: `identity` and gap-excluding `identity-nogap` distances
//! - **Safe statistics**: zero variance yields zero scores, never NaN
//! - **Reports**: text report, JSON summary, SVG plots, TSV tables
//!
//! ## Basic Usage
//!
//! ```rust
//! use msaoutlier::prelude::*;
//!
//! let alignment = Alignment::new(vec![
//!     AlignedSequence::new("A", "AAAA"),
//!     AlignedSequence::new("B", "AAAA"),
//!     AlignedSequence::new("C", "AAAA"),
//!     AlignedSequence::new("D", "TTTT"),
//! ])?;
//!
//! let matrix = calculate_distance_matrix(&alignment, DistanceModel::Identity)?;
//! let result = detect_outliers(&matrix, &alignment.ids(), 1.5)?;
//! assert_eq!(result.outliers[0].sequence_id, "D");
//! # Ok::<(), msaoutlier::OutlierError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::analysis::{process_all, process_alignment_file, AlignmentReport, AnalysisConfig, RunSummary};
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{build_distance_matrix, calculate_distance_matrix, detect_outliers};
    pub use crate::core::{DistanceMatrix, DistanceModel, OutlierError, OutlierResult, SequenceStatistic};
    pub use crate::data::{find_alignment_files, AlignedSequence, Alignment};
    pub use crate::output::{write_distance_plot, write_report, write_summary_json};
}

// Re-export main types at the root level for convenience
pub use crate::core::{DistanceMatrix, DistanceModel, OutlierError, OutlierResult, SequenceStatistic};
pub use data::{AlignedSequence, Alignment};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "msaoutlier v{} - Distance-based outlier detection for sequence alignments",
        VERSION
    )
}
