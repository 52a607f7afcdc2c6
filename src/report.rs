//! Summary of a convergence experiment.
//!
//! A report pairs the harness output with the quantities needed to judge it:
//! the discovered majority element, its occurrence count `m`, the array
//! length `n` and the reference mean `n/m` that the running average should
//! approach.

use crate::error::{MajorityError, Result};
use crate::harness::ConvergenceSeries;
use crate::sampler::MajoritySampler;
use crate::tester::occurrences;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

/// Outcome of a convergence experiment, ready for printing or export.
#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceReport<T> {
    /// Majority element discovered by an extra sampling trial.
    pub majority: T,
    /// Array length `n`.
    pub len: usize,
    /// Occurrences `m` of the majority element.
    pub majority_count: usize,
    /// Theoretical expected draws per trial, `n/m`.
    pub reference_mean: f64,
    /// Number of runs in the series.
    pub runs: usize,
    /// Running average after the last run.
    pub final_average: f64,
    /// `|final_average - reference_mean| / reference_mean`.
    pub relative_error: f64,
    /// Wall-clock time of the simulation, when it was measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
    /// Full running-average series.
    pub series: ConvergenceSeries,
}

impl<T: PartialEq + Clone> ConvergenceReport<T> {
    /// Builds a report from a finished series.
    ///
    /// One more trial is drawn from `sampler` to discover the majority
    /// element; its occurrence count fixes the reference line.
    ///
    /// # Errors
    ///
    /// Returns [`MajorityError::InvalidInput`] for an empty series, and
    /// propagates any sampler error.
    pub fn build<R: Rng + ?Sized>(
        sampler: &MajoritySampler<'_, T>,
        series: ConvergenceSeries,
        elapsed: Option<Duration>,
        rng: &mut R,
    ) -> Result<Self> {
        let final_average = series
            .final_average()
            .ok_or_else(|| MajorityError::invalid("cannot report on an empty series"))?;
        let majority = sampler.sample(rng)?.value;
        let array = sampler.array();
        let majority_count = occurrences(array, &majority);
        let reference_mean = array.len() as f64 / majority_count as f64;
        Ok(Self {
            majority,
            len: array.len(),
            majority_count,
            reference_mean,
            runs: series.len(),
            final_average,
            relative_error: (final_average - reference_mean).abs() / reference_mean,
            elapsed_ms: elapsed.map(|d| d.as_secs_f64() * 1_000.0),
            series,
        })
    }
}

impl<T: Serialize> ConvergenceReport<T> {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{simulate_with, SimplePrng};

    #[test]
    fn test_report_reference_line() {
        let array = [1, 5, 1, 1, 5, 5, 5, 7, 8, 2, 5, 5, 5];
        let sampler = MajoritySampler::new(&array).unwrap();
        let mut rng = SimplePrng::new(8);
        let series = simulate_with(&sampler, 400, &mut rng).unwrap();
        let report = ConvergenceReport::build(&sampler, series, None, &mut rng).unwrap();
        assert_eq!(report.majority, 5);
        assert_eq!(report.len, 13);
        assert_eq!(report.majority_count, 7);
        assert!((report.reference_mean - 13.0 / 7.0).abs() < 1e-12);
        assert_eq!(report.runs, 400);
        assert!(report.elapsed_ms.is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let array = [4u32, 4, 4, 1];
        let sampler = MajoritySampler::new(&array).unwrap();
        let mut rng = SimplePrng::new(9);
        let series = simulate_with(&sampler, 10, &mut rng).unwrap();
        let report = ConvergenceReport::build(
            &sampler,
            series,
            Some(Duration::from_millis(3)),
            &mut rng,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json_string().unwrap()).unwrap();
        assert_eq!(json["runs"], 10);
        assert_eq!(json["series"]["averages"].as_array().unwrap().len(), 10);
        assert!((json["elapsed_ms"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_rejected() {
        let array = [1u8];
        let sampler = MajoritySampler::new(&array).unwrap();
        let mut rng = SimplePrng::new(0);
        let err = ConvergenceReport::build(&sampler, ConvergenceSeries::default(), None, &mut rng)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
