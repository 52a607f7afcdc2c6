//! The design philosophy underlying `monte_majority` is pedagogical, yet mathematically rigorous.
//! Each module isolates one step of a classic randomized algorithm, illustrating how a
//! cheap predicate, a random draw and a running mean compose into an empirical proof.
//! Majority predicate.
//!
//! [`is_majority`] decides whether a candidate occurs at least `⌊n/2⌋` times
//! in an array of length `n`.  The bound is the floor of half the length, so
//! for even `n` a value filling exactly half of the array is accepted, and for
//! `n = 1` every candidate is accepted because the bound is zero.  Callers that
//! need the textbook strict majority (`count > n/2`) should compare against
//! [`occurrences`] directly.
//!
//! Each call is a full linear scan.  The sampler pays this cost per draw and
//! relies on the expected draw count `n/m` staying small.

use crate::error::{MajorityError, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// Minimum occurrence count accepted by [`is_majority`] for an array of `len`.
#[inline]
pub fn majority_threshold(len: usize) -> usize {
    len / 2
}

/// Counts how many positions of `array` hold `value`.
pub fn occurrences<T: PartialEq>(array: &[T], value: &T) -> usize {
    array.iter().filter(|elem| *elem == value).count()
}

/// Returns whether `candidate` occurs at least `⌊n/2⌋` times in `array`.
///
/// The candidate need not occur in the array at all.
///
/// # Errors
///
/// Returns [`MajorityError::InvalidInput`] when `array` is empty.
///
/// # Examples
///
/// ```
/// use monte_majority::is_majority;
///
/// let a = [1, 2, 2, 2];
/// assert!(is_majority(&a, &2).unwrap());
/// assert!(!is_majority(&a, &7).unwrap());
/// ```
pub fn is_majority<T: PartialEq>(array: &[T], candidate: &T) -> Result<bool> {
    if array.is_empty() {
        return Err(MajorityError::invalid("cannot test a candidate against an empty array"));
    }
    Ok(occurrences(array, candidate) >= majority_threshold(array.len()))
}

/// Shape of an array as seen by the tester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorityProfile {
    /// Array length `n`.
    pub len: usize,
    /// Largest occurrence count of any single value.
    pub majority_count: usize,
}

impl MajorityProfile {
    /// Success probability `m/n` of a single draw.
    pub fn success_probability(&self) -> f64 {
        self.majority_count as f64 / self.len as f64
    }

    /// Expected number of draws per trial, `n/m`.
    pub fn expected_draws(&self) -> f64 {
        self.len as f64 / self.majority_count as f64
    }
}

/// Checks that at least one value of `array` passes [`is_majority`].
///
/// This is the input-side precondition of the sampler: without such a value
/// the sampling loop never terminates.  Every distinct value is counted once.
///
/// # Errors
///
/// Returns [`MajorityError::InvalidInput`] for an empty array or an array in
/// which no value reaches the threshold.
pub fn ensure_majority<T: Eq + Hash>(array: &[T]) -> Result<MajorityProfile> {
    if array.is_empty() {
        return Err(MajorityError::invalid("array must contain at least one element"));
    }
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for elem in array {
        *counts.entry(elem).or_insert(0) += 1;
    }
    let majority_count = counts.values().copied().max().unwrap_or(0);
    if majority_count < majority_threshold(array.len()) {
        return Err(MajorityError::invalid(format!(
            "no value occurs at least {} times in an array of {} elements",
            majority_threshold(array.len()),
            array.len()
        )));
    }
    Ok(MajorityProfile {
        len: array.len(),
        majority_count,
    })
}
