// validation.rs - Input validation utilities

use std::path::PathBuf;
use std::str::FromStr;

use regex::Regex;

use crate::analysis::AnalysisConfig;
use crate::cli::args::Args;
use crate::core::DistanceModel;

pub struct ValidationResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub analysis: AnalysisConfig,
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
}

fn compile_regex(pattern: Option<&String>, flag: &str) -> Result<Option<Regex>, String> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid {} regex '{}': {}", flag, p, e)))
        .transpose()
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let z_threshold = args.z_threshold_or_default();
    if !z_threshold.is_finite() {
        return Err(format!("--z-threshold must be a finite number, got {}", z_threshold));
    }

    let model = DistanceModel::from_str(args.model_or_default()).map_err(|e| e.to_string())?;

    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err("--threads must be at least 1".to_string());
        }
    }

    let input_dir = PathBuf::from(args.input_dir_or_default());
    if !input_dir.is_dir() {
        return Err(format!("Input directory not found: {}", input_dir.display()));
    }

    let include_regex = compile_regex(args.include_files.as_ref(), "--include-files")?;
    let exclude_regex = compile_regex(args.exclude_files.as_ref(), "--exclude-files")?;

    Ok(ValidationResult {
        input_dir,
        output_dir: PathBuf::from(args.output_dir_or_default()),
        analysis: AnalysisConfig {
            model,
            z_threshold,
            plot: args.plot,
            statistics: args.statistics,
            matrix: args.matrix,
        },
        include_regex,
        exclude_regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["msa-outlier"], args).unwrap()
    }

    #[test]
    fn test_valid_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_str().unwrap();
        let args = parse(&[
            "--input-dir",
            input,
            "--model",
            "identity-nogap",
            "--z-threshold",
            "2",
            "--plot",
            "--include-files",
            "^gene",
        ]);

        let result = validate_args(&args).unwrap();
        assert_eq!(result.analysis.model, DistanceModel::IdentityNoGap);
        assert_eq!(result.analysis.z_threshold, 2.0);
        assert!(result.analysis.plot);
        assert!(result.include_regex.unwrap().is_match("gene1.fasta"));
        assert!(result.exclude_regex.is_none());
    }

    #[test]
    fn test_unknown_model() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&["--input-dir", dir.path().to_str().unwrap(), "--model", "kimura"]);
        let err = validate_args(&args).err().unwrap();
        assert!(err.contains("Unsupported distance model 'kimura'"));
    }

    #[test]
    fn test_missing_input_dir() {
        let args = parse(&["--input-dir", "/nonexistent/alignments"]);
        let err = validate_args(&args).err().unwrap();
        assert!(err.contains("Input directory not found"));
    }

    #[test]
    fn test_bad_regex_and_threads() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_str().unwrap();

        let args = parse(&["--input-dir", input, "--exclude-files", "("]);
        assert!(validate_args(&args).err().unwrap().contains("--exclude-files"));

        let args = parse(&["--input-dir", input, "--threads", "0"]);
        assert!(validate_args(&args).err().unwrap().contains("--threads"));

        let args = parse(&["--input-dir", input, "--z-threshold", "NaN"]);
        assert!(validate_args(&args).err().unwrap().contains("finite"));
    }
}
