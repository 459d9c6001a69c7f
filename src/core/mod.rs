// mod.rs - Core logic module

pub mod distance;
pub mod error;
pub mod model;
pub mod outlier;

// Re-export main types for convenience
pub use distance::{build_distance_matrix, calculate_distance_matrix, DistanceMatrix};
pub use error::{OutlierError, Result};
pub use model::DistanceModel;
pub use outlier::{
    detect_outliers, mean_distances, population_stats, spread_stats, z_scores, OutlierResult, SequenceStatistic,
    DEFAULT_Z_THRESHOLD,
};
