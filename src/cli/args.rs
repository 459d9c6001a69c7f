// args.rs - Command line arguments definition

use argh::FromArgs;

use crate::core::DEFAULT_Z_THRESHOLD;

pub const DEFAULT_INPUT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_DIR: &str = "outlier_results";
pub const DEFAULT_MODEL: &str = "identity";

#[derive(FromArgs, Debug)]
/// msa-outlier - Detect outlier sequences in multiple sequence alignments
pub struct Args {
    /// directory containing FASTA alignment files (default: .)
    #[argh(option)]
    pub input_dir: Option<String>,

    /// directory to save results (default: outlier_results)
    #[argh(option)]
    pub output_dir: Option<String>,

    /// z-score threshold for outlier detection (default: 3.0)
    #[argh(option)]
    pub z_threshold: Option<f64>,

    /// distance model: identity, identity-nogap (default: identity)
    #[argh(option)]
    pub model: Option<String>,

    /// generate distance distribution plots (SVG)
    #[argh(switch)]
    pub plot: bool,

    /// write per-sequence statistics tables (TSV)
    #[argh(switch)]
    pub statistics: bool,

    /// write pairwise distance matrices (TSV)
    #[argh(switch)]
    pub matrix: bool,

    /// write a JSON summary next to the text report
    #[argh(switch)]
    pub json: bool,

    /// process only alignment files whose name matches this regex
    #[argh(option)]
    pub include_files: Option<String>,

    /// skip alignment files whose name matches this regex
    #[argh(option)]
    pub exclude_files: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// list available distance models and exit
    #[argh(switch)]
    pub list_models: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

// Options left unset on the command line stay `None` until a config file has
// had its chance to fill them; defaults apply only after that.
impl Args {
    pub fn input_dir_or_default(&self) -> &str {
        self.input_dir.as_deref().unwrap_or(DEFAULT_INPUT_DIR)
    }

    pub fn output_dir_or_default(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    pub fn z_threshold_or_default(&self) -> f64 {
        self.z_threshold.unwrap_or(DEFAULT_Z_THRESHOLD)
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}
