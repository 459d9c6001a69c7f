// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,

    // Detection
    pub z_threshold: Option<f64>,
    pub model: Option<String>,

    // Artifacts
    pub plot: Option<bool>,
    pub statistics: Option<bool>,
    pub matrix: Option<bool>,
    pub json: Option<bool>,

    // File filtering
    pub include_files: Option<String>,
    pub exclude_files: Option<String>,

    // Performance
    pub threads: Option<usize>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        log::info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# msa-outlier.toml - Configuration file for msa-outlier
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Directory containing FASTA alignment files
# (.fasta, .fa, .faa, .fna, .aln, .fas)
input_dir = "alignments"

# Directory to save the report, plots and tables
output_dir = "outlier_results"

# =============================================================================
# DETECTION
# =============================================================================

# Flag sequences whose z-score is strictly greater than this value
z_threshold = 3.0

# Distance model: identity, identity-nogap
model = "identity"

# =============================================================================
# ARTIFACTS
# =============================================================================

# SVG distance distribution plot per alignment
plot = false

# Per-sequence statistics table (TSV) per alignment
statistics = false

# Pairwise distance matrix (TSV) per alignment
matrix = false

# JSON summary of the whole run
json = false

# =============================================================================
# FILE FILTERING
# =============================================================================

# Process only files whose name matches this regex
# include_files = "^gene"

# Skip files whose name matches this regex
# exclude_files = "backup"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.input_dir.as_deref(), Some("alignments"));
        assert_eq!(config.z_threshold, Some(3.0));
        assert_eq!(config.model.as_deref(), Some("identity"));
        assert_eq!(config.plot, Some(false));
        assert!(config.include_files.is_none());
        assert!(config.threads.is_none());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            z_threshold: Some(2.5),
            model: Some("identity-nogap".to_string()),
            plot: Some(true),
            ..Config::new()
        };
        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "z_threshold = \"high\"").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.contains("Failed to parse config file"));
    }
}
