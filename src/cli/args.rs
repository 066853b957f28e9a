//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::HypothesisConfig;

/// Tracklab - derive categorical features from music-track attributes and
/// run a fixed battery of statistical hypothesis tests
#[derive(Parser, Debug)]
#[command(name = "tracklab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Significance threshold applied to every hypothesis test
    #[arg(long, default_value = "0.05", value_parser = validate_alpha)]
    pub alpha: f64,

    /// Minimum observations a genre needs to enter the group-mean comparison
    #[arg(long, default_value = "10")]
    pub min_group_size: usize,

    /// Maximum number of most-frequent genres to compare
    #[arg(long, default_value = "5")]
    pub max_groups: usize,

    /// Row count above which the normality test uses a random subsample
    #[arg(long, default_value = "5000")]
    pub sample_cap: usize,

    /// Seed for the normality subsample. Fixed by default so repeated runs
    /// on the same dataset produce identical verdicts.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Optional path for a JSON export of verdicts and group rankings
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Assemble the hypothesis-engine configuration from the CLI flags.
    pub fn hypothesis_config(&self) -> HypothesisConfig {
        HypothesisConfig {
            alpha: self.alpha,
            min_group_size: self.min_group_size,
            max_groups: self.max_groups,
            sample_cap: self.sample_cap,
            seed: self.seed,
        }
    }
}

/// Validator for the alpha parameter
fn validate_alpha(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "alpha must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
