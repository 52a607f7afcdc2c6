//! Experiment configuration.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! `MAJORITY_*` environment variables, and finally whatever the command line
//! overrides.  Validation runs once after all layers are applied.

use crate::error::{MajorityError, Result};
use crate::tester::{ensure_majority, MajorityProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Array used when the caller does not supply one.
pub const DEFAULT_ARRAY: [i64; 13] = [1, 5, 1, 1, 5, 5, 5, 7, 8, 2, 5, 5, 5];

/// Number of runs used when the caller does not supply one.
pub const DEFAULT_RUNS: usize = 10_000;

/// Environment variable overriding [`ExperimentConfig::runs`].
pub const ENV_RUNS: &str = "MAJORITY_RUNS";
/// Environment variable overriding [`ExperimentConfig::seed`].
pub const ENV_SEED: &str = "MAJORITY_SEED";
/// Environment variable overriding [`ExperimentConfig::max_draws`].
pub const ENV_MAX_DRAWS: &str = "MAJORITY_MAX_DRAWS";
/// Environment variable overriding [`ExperimentConfig::series_out`].
pub const ENV_SERIES_OUT: &str = "MAJORITY_SERIES_OUT";
/// Environment variable overriding [`ExperimentConfig::report_out`].
pub const ENV_REPORT_OUT: &str = "MAJORITY_REPORT_OUT";

const NUMERIC_FIELDS: [&str; 3] = ["runs", "seed", "max_draws"];

/// Parameters of one convergence experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Array to sample; must contain a majority element.
    pub array: Vec<i64>,
    /// Number of independent runs.
    pub runs: usize,
    /// Seed for reproducible runs; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Optional per-trial draw cap.
    pub max_draws: Option<u64>,
    /// Sample runs on independent streams across the rayon pool.
    pub parallel: bool,
    /// Report the wall-clock time of the simulation.
    pub timing: bool,
    /// Destination for the `run,average,reference` CSV export.
    pub series_out: Option<PathBuf>,
    /// Destination for the full JSON report.
    pub report_out: Option<PathBuf>,
    /// Print the full report as JSON instead of a text summary.
    pub json: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            array: DEFAULT_ARRAY.to_vec(),
            runs: DEFAULT_RUNS,
            seed: None,
            max_draws: None,
            parallel: false,
            timing: false,
            series_out: None,
            report_out: None,
            json: false,
        }
    }
}

impl ExperimentConfig {
    /// Decodes a config from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Numeric fields holding anything other than a non-negative integer are
    /// reported as [`MajorityError::InvalidInput`], like their environment
    /// and command-line counterparts.  Malformed JSON and unknown fields are
    /// [`MajorityError::Json`].
    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(input)?;
        for field in NUMERIC_FIELDS {
            match raw.get(field) {
                None | Some(serde_json::Value::Null) => {}
                Some(value) if value.as_u64().is_some() => {}
                Some(value) => {
                    return Err(MajorityError::invalid(format!(
                        "{field} expects a non-negative integer, got {value}"
                    )))
                }
            }
        }
        Ok(serde_json::from_value(raw)?)
    }

    /// Reads and decodes a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Applies `MAJORITY_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies `MAJORITY_*` overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());
        if let Some(raw) = read(ENV_RUNS) {
            self.runs = parse_number(ENV_RUNS, &raw)?;
        }
        if let Some(raw) = read(ENV_SEED) {
            self.seed = Some(parse_number(ENV_SEED, &raw)?);
        }
        if let Some(raw) = read(ENV_MAX_DRAWS) {
            self.max_draws = Some(parse_number(ENV_MAX_DRAWS, &raw)?);
        }
        if let Some(raw) = read(ENV_SERIES_OUT) {
            self.series_out = Some(PathBuf::from(raw.trim()));
        }
        if let Some(raw) = read(ENV_REPORT_OUT) {
            self.report_out = Some(PathBuf::from(raw.trim()));
        }
        Ok(())
    }

    /// Checks every precondition of the sampler and harness.
    ///
    /// On success returns the array profile, whose `expected_draws` is the
    /// reference line of the experiment.
    pub fn validate(&self) -> Result<MajorityProfile> {
        if self.runs == 0 {
            return Err(MajorityError::invalid("number of runs must be positive"));
        }
        if self.max_draws == Some(0) {
            return Err(MajorityError::invalid("max draws must be positive"));
        }
        ensure_majority(&self.array)
    }
}

fn parse_number<N: FromStr>(name: &str, raw: &str) -> Result<N> {
    raw.trim()
        .parse()
        .map_err(|_| MajorityError::invalid(format!("{name} expects a non-negative integer, got {raw:?}")))
}

/// Parses a whitespace-separated list of integers.
///
/// # Errors
///
/// Returns [`MajorityError::InvalidInput`] for blank input or any token that
/// is not an integer.
pub fn parse_array(text: &str) -> Result<Vec<i64>> {
    let values = text
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| MajorityError::invalid(format!("invalid integer {tok:?} in array")))
        })
        .collect::<Result<Vec<_>>>()?;
    if values.is_empty() {
        return Err(MajorityError::invalid("array must contain at least one element"));
    }
    Ok(values)
}
