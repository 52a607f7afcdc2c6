//! Monte Carlo majority sampler.
//!
//! One trial draws uniformly random positions until the element found there
//! passes [`is_majority`](crate::is_majority), and reports how many draws that
//! took.  With a majority of `m` copies among `n` elements the draw count is
//! geometric with success probability `m/n`, so its expectation is `n/m`.
//!
//! The loop has no exit other than success.  On an array that contains a
//! majority element it terminates with probability one, but no finite bound
//! holds; on an array without one it never returns.  [`MajoritySampler`] can
//! be given an explicit draw cap that turns such a stall into
//! [`MajorityError::DrawLimitExceeded`]; the cap is never applied implicitly.

use crate::error::{MajorityError, Result};
use crate::tester::is_majority;
use rand::Rng;
use serde::Serialize;

/// Result of a single sampling trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialOutcome<T> {
    /// Element accepted by the tester.
    pub value: T,
    /// Number of draws consumed, always at least one.
    pub draws: u64,
}

/// A sampler bound to one read-only array.
#[derive(Debug, Clone)]
pub struct MajoritySampler<'a, T> {
    array: &'a [T],
    max_draws: Option<u64>,
}

impl<'a, T: PartialEq + Clone> MajoritySampler<'a, T> {
    /// Binds a sampler to `array` with no draw cap.
    ///
    /// # Errors
    ///
    /// Returns [`MajorityError::InvalidInput`] when `array` is empty.
    pub fn new(array: &'a [T]) -> Result<Self> {
        if array.is_empty() {
            return Err(MajorityError::invalid("cannot sample from an empty array"));
        }
        Ok(Self {
            array,
            max_draws: None,
        })
    }

    /// Caps every trial at `limit` draws.
    ///
    /// # Errors
    ///
    /// Returns [`MajorityError::InvalidInput`] when `limit` is zero.
    pub fn with_max_draws(mut self, limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(MajorityError::invalid("max draws must be positive"));
        }
        self.max_draws = Some(limit);
        Ok(self)
    }

    /// Returns the array being sampled.
    pub fn array(&self) -> &'a [T] {
        self.array
    }

    /// Returns the configured draw cap, if any.
    pub fn max_draws(&self) -> Option<u64> {
        self.max_draws
    }

    /// Runs one trial using `rng` as the source of uniform indices.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrialOutcome<T>> {
        let n = self.array.len();
        let mut draws = 0u64;
        loop {
            if let Some(limit) = self.max_draws {
                if draws >= limit {
                    tracing::warn!(target: "monte_majority", limit, len = n, "draw cap exhausted");
                    return Err(MajorityError::DrawLimitExceeded { limit });
                }
            }
            let candidate = &self.array[rng.gen_range(0..n)];
            draws += 1;
            if is_majority(self.array, candidate)? {
                tracing::trace!(target: "monte_majority", draws, "trial accepted");
                return Ok(TrialOutcome {
                    value: candidate.clone(),
                    draws,
                });
            }
        }
    }
}

/// Runs one uncapped trial over `array`.
///
/// # Errors
///
/// Returns [`MajorityError::InvalidInput`] when `array` is empty.
///
/// # Examples
///
/// ```
/// use monte_majority::{sample, SimplePrng};
///
/// let mut rng = SimplePrng::new(1);
/// let outcome = sample(&[3, 3, 1, 3], &mut rng).unwrap();
/// assert_eq!(outcome.value, 3);
/// assert!(outcome.draws >= 1);
/// ```
pub fn sample<T, R>(array: &[T], rng: &mut R) -> Result<TrialOutcome<T>>
where
    T: PartialEq + Clone,
    R: Rng + ?Sized,
{
    MajoritySampler::new(array)?.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimplePrng;

    const SAMPLE: [i64; 13] = [1, 5, 1, 1, 5, 5, 5, 7, 8, 2, 5, 5, 5];

    #[test]
    fn test_always_finds_majority() {
        for seed in 0..500 {
            let mut rng = SimplePrng::new(seed);
            let outcome = sample(&SAMPLE, &mut rng).unwrap();
            assert_eq!(outcome.value, 5);
            assert!(outcome.draws >= 1);
        }
    }

    #[test]
    fn test_singleton_takes_one_draw() {
        let mut rng = SimplePrng::new(11);
        for _ in 0..100 {
            let outcome = sample(&["only"], &mut rng).unwrap();
            assert_eq!(outcome, TrialOutcome { value: "only", draws: 1 });
        }
    }

    #[test]
    fn test_empty_array_is_invalid() {
        let mut rng = SimplePrng::new(0);
        let err = sample::<u32, _>(&[], &mut rng).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_draw_cap_reports_stall() {
        let no_majority = [1, 2, 3, 4, 5, 6];
        let sampler = MajoritySampler::new(&no_majority)
            .unwrap()
            .with_max_draws(50)
            .unwrap();
        assert_eq!(sampler.max_draws(), Some(50));
        let mut rng = SimplePrng::new(5);
        match sampler.sample(&mut rng) {
            Err(MajorityError::DrawLimitExceeded { limit }) => assert_eq!(limit, 50),
            other => panic!("expected draw cap error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_cap_rejected() {
        assert_eq!(MajoritySampler::new(&SAMPLE).unwrap().max_draws(), None);
        let err = MajoritySampler::new(&SAMPLE)
            .unwrap()
            .with_max_draws(0)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_cap_does_not_change_seeded_outcome() {
        let capped = MajoritySampler::new(&SAMPLE)
            .unwrap()
            .with_max_draws(1_000)
            .unwrap();
        let mut a = SimplePrng::new(21);
        let mut b = SimplePrng::new(21);
        assert_eq!(capped.sample(&mut a).unwrap(), sample(&SAMPLE, &mut b).unwrap());
    }
}
