// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values; an option given
    /// on the command line wins even when it repeats the default.
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input_dir.is_none() {
            self.input_dir = config.input_dir;
        }
        if self.output_dir.is_none() {
            self.output_dir = config.output_dir;
        }

        // Detection
        if self.z_threshold.is_none() {
            self.z_threshold = config.z_threshold;
        }
        if self.model.is_none() {
            self.model = config.model;
        }

        // Flags (CLI switches win, config can only turn them on)
        self.plot |= config.plot.unwrap_or(false);
        self.statistics |= config.statistics.unwrap_or(false);
        self.matrix |= config.matrix.unwrap_or(false);
        self.json |= config.json.unwrap_or(false);

        // File filtering
        if self.include_files.is_none() {
            self.include_files = config.include_files;
        }
        if self.exclude_files.is_none() {
            self.exclude_files = config.exclude_files;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{DEFAULT_MODEL, DEFAULT_OUTPUT_DIR};
    use crate::core::DEFAULT_Z_THRESHOLD;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["msa-outlier"], args).unwrap()
    }

    #[test]
    fn test_config_fills_defaults() {
        let config = Config {
            input_dir: Some("alignments".to_string()),
            z_threshold: Some(2.0),
            model: Some("identity-nogap".to_string()),
            plot: Some(true),
            threads: Some(4),
            ..Config::new()
        };
        let args = parse(&[]).merge_with_config(config);

        assert_eq!(args.input_dir_or_default(), "alignments");
        assert_eq!(args.output_dir_or_default(), DEFAULT_OUTPUT_DIR);
        assert_eq!(args.z_threshold_or_default(), 2.0);
        assert_eq!(args.model_or_default(), "identity-nogap");
        assert!(args.plot);
        assert!(!args.json);
        assert_eq!(args.threads, Some(4));
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let config = Config {
            input_dir: Some("from_config".to_string()),
            z_threshold: Some(2.0),
            include_files: Some("^config".to_string()),
            ..Config::new()
        };
        let args = parse(&[
            "--input-dir",
            "from_cli",
            "--z-threshold",
            "2.5",
            "--include-files",
            "^cli",
            "--json",
        ])
        .merge_with_config(config);

        assert_eq!(args.input_dir.as_deref(), Some("from_cli"));
        assert_eq!(args.z_threshold, Some(2.5));
        assert_eq!(args.include_files.as_deref(), Some("^cli"));
        assert!(args.json);
    }

    #[test]
    fn test_explicit_default_values_beat_config() {
        let config = Config {
            z_threshold: Some(2.0),
            model: Some("identity-nogap".to_string()),
            output_dir: Some("from_config".to_string()),
            ..Config::new()
        };
        let args = parse(&[
            "--z-threshold",
            "3.0",
            "--model",
            DEFAULT_MODEL,
            "--output-dir",
            DEFAULT_OUTPUT_DIR,
        ])
        .merge_with_config(config);

        assert_eq!(args.z_threshold_or_default(), DEFAULT_Z_THRESHOLD);
        assert_eq!(args.model_or_default(), DEFAULT_MODEL);
        assert_eq!(args.output_dir_or_default(), DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn test_defaults_without_cli_or_config() {
        let args = parse(&[]).merge_with_config(Config::new());
        assert_eq!(args.input_dir_or_default(), ".");
        assert_eq!(args.z_threshold_or_default(), DEFAULT_Z_THRESHOLD);
        assert_eq!(args.model_or_default(), DEFAULT_MODEL);
    }
}
