//! The design philosophy underlying `monte_majority` is pedagogical, yet mathematically rigorous.
//! Each module isolates one step of a classic randomized algorithm, illustrating how a
//! cheap predicate, a random draw and a running mean compose into an empirical proof.
//! Convergence harness.
//!
//! The harness repeats the sampling experiment over one fixed array and keeps
//! the cumulative running average of draw counts after every run.  By the law
//! of large numbers this average approaches the geometric expectation `n/m`;
//! the resulting [`ConvergenceSeries`] is what a plotting front-end draws
//! against the horizontal reference line at `n/m`.
//!
//! Entry `k` of a series is always the exact mean of the first `k` draw
//! counts.  The parallel entry point [`simulate_streams`] samples runs on
//! independent seeded streams, possibly across threads, but still folds the
//! averages in run order.

use crate::error::{MajorityError, Result};
use crate::prng::SimplePrng;
use crate::sampler::MajoritySampler;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use rand::Rng;
use serde::Serialize;

/// Running averages of draw counts, indexed by run number `1..=N`.
///
/// Stored as two dense vectors since run numbers never skip or arrive out of
/// order: position `i` holds run `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvergenceSeries {
    draw_counts: Vec<u64>,
    averages: Vec<f64>,
    total_draws: u64,
}

impl ConvergenceSeries {
    /// Creates an empty series with room for `runs` entries.
    pub fn with_capacity(runs: usize) -> Self {
        Self {
            draw_counts: Vec::with_capacity(runs),
            averages: Vec::with_capacity(runs),
            total_draws: 0,
        }
    }

    /// Folds already-sampled draw counts, in run order, into a series.
    pub fn from_draw_counts(draw_counts: impl IntoIterator<Item = u64>) -> Self {
        let iter = draw_counts.into_iter();
        let mut series = Self::with_capacity(iter.size_hint().0);
        for draws in iter {
            series.record(draws);
        }
        series
    }

    /// Appends the next run's draw count and its cumulative average.
    pub fn record(&mut self, draws: u64) {
        self.total_draws += draws;
        self.draw_counts.push(draws);
        let run = self.draw_counts.len();
        self.averages.push(self.total_draws as f64 / run as f64);
    }

    /// Number of recorded runs.
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    /// Returns `true` if no run has been recorded.
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    /// Running average after `run` runs (1-based).
    pub fn get(&self, run: usize) -> Option<f64> {
        run.checked_sub(1).and_then(|i| self.averages.get(i).copied())
    }

    /// Average over all recorded runs.
    pub fn final_average(&self) -> Option<f64> {
        self.averages.last().copied()
    }

    /// Sum of all draw counts.
    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    /// Per-run draw counts in run order.
    pub fn draw_counts(&self) -> &[u64] {
        &self.draw_counts
    }

    /// Running averages in run order.
    pub fn averages(&self) -> &[f64] {
        &self.averages
    }

    /// Iterates `(run, running_average)` pairs starting at run 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.averages
            .iter()
            .enumerate()
            .map(|(i, &avg)| (i + 1, avg))
    }
}

fn check_runs(num_runs: usize) -> Result<()> {
    if num_runs == 0 {
        return Err(MajorityError::invalid("number of runs must be positive"));
    }
    Ok(())
}

/// Runs `num_runs` uncapped trials over `array` and records their convergence.
///
/// # Errors
///
/// Returns [`MajorityError::InvalidInput`] for an empty array or zero runs.
///
/// # Examples
///
/// ```
/// use monte_majority::{simulate, SimplePrng};
///
/// let mut rng = SimplePrng::new(7);
/// let series = simulate(&[2, 2, 9], 100, &mut rng).unwrap();
/// assert_eq!(series.len(), 100);
/// ```
pub fn simulate<T, R>(array: &[T], num_runs: usize, rng: &mut R) -> Result<ConvergenceSeries>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    simulate_with(&MajoritySampler::new(array)?, num_runs, rng)
}

/// Runs `num_runs` trials of a configured sampler on a single random stream.
pub fn simulate_with<T, R>(
    sampler: &MajoritySampler<'_, T>,
    num_runs: usize,
    rng: &mut R,
) -> Result<ConvergenceSeries>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    check_runs(num_runs)?;
    tracing::debug!(
        target: "monte_majority",
        len = sampler.array().len(),
        runs = num_runs,
        "starting simulation"
    );
    let mut series = ConvergenceSeries::with_capacity(num_runs);
    for _ in 0..num_runs {
        series.record(sampler.sample(rng)?.draws);
    }
    tracing::debug!(
        target: "monte_majority",
        total_draws = series.total_draws(),
        final_average = series.final_average(),
        "simulation finished"
    );
    Ok(series)
}

/// Runs `num_runs` trials, run `i` drawing from [`SimplePrng::stream`]`(seed, i)`.
///
/// Large batches are sampled on the rayon pool.  Because each run owns its
/// stream and the averages are folded in run order afterwards, the series is
/// identical whether or not the parallel path is taken.
pub fn simulate_streams<T>(
    sampler: &MajoritySampler<'_, T>,
    num_runs: usize,
    seed: u64,
) -> Result<ConvergenceSeries>
where
    T: PartialEq + Clone + Send + Sync,
{
    check_runs(num_runs)?;
    tracing::debug!(
        target: "monte_majority",
        len = sampler.array().len(),
        runs = num_runs,
        seed,
        "starting stream simulation"
    );
    let draw_one = |run: usize| -> Result<u64> {
        let mut rng = SimplePrng::stream(seed, run as u64);
        sampler.sample(&mut rng).map(|outcome| outcome.draws)
    };
    let draws = collect_draws(num_runs, draw_one)?;
    let series = ConvergenceSeries::from_draw_counts(draws);
    tracing::debug!(
        target: "monte_majority",
        total_draws = series.total_draws(),
        final_average = series.final_average(),
        "stream simulation finished"
    );
    Ok(series)
}

#[cfg(not(target_arch = "wasm32"))]
fn collect_draws<F>(num_runs: usize, draw_one: F) -> Result<Vec<u64>>
where
    F: Fn(usize) -> Result<u64> + Send + Sync,
{
    const PARALLEL_THRESHOLD: usize = 1 << 12;
    if num_runs >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1 {
        (1..=num_runs).into_par_iter().map(&draw_one).collect()
    } else {
        (1..=num_runs).map(draw_one).collect()
    }
}

#[cfg(target_arch = "wasm32")]
fn collect_draws<F>(num_runs: usize, draw_one: F) -> Result<Vec<u64>>
where
    F: Fn(usize) -> Result<u64>,
{
    (1..=num_runs).map(draw_one).collect()
}
