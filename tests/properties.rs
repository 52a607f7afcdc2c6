use monte_majority::{
    is_majority, majority_threshold, sample, simulate, ConvergenceSeries, SimplePrng,
};
use proptest::prelude::*;

/// Builds an array holding `count` copies of `candidate` and `filler` other
/// values, none equal to `candidate`, interleaved by `rotation`.
fn synthetic_array(candidate: i64, count: usize, filler: usize, rotation: usize) -> Vec<i64> {
    let mut array: Vec<i64> = std::iter::repeat(candidate)
        .take(count)
        .chain((0..filler).map(|i| candidate + 1 + (i % 3) as i64))
        .collect();
    if !array.is_empty() {
        let shift = rotation % array.len();
        array.rotate_left(shift);
    }
    array
}

proptest! {
    #[test]
    fn tester_matches_floor_threshold(
        candidate in -1_000i64..1_000,
        count in 0usize..40,
        filler in 0usize..40,
        rotation in 0usize..80,
    ) {
        prop_assume!(count + filler > 0);
        let array = synthetic_array(candidate, count, filler, rotation);
        let expected = count >= majority_threshold(array.len());
        prop_assert_eq!(is_majority(&array, &candidate).unwrap(), expected);
    }

    #[test]
    fn sampler_returns_strict_majority(
        candidate in -1_000i64..1_000,
        filler in 0usize..20,
        extra in 1usize..20,
        rotation in 0usize..80,
        seed in any::<u64>(),
    ) {
        // count > filler, so only the candidate can reach the threshold when
        // at least one other value is present.
        let count = filler + extra;
        let array = synthetic_array(candidate, count, filler, rotation);
        let mut rng = SimplePrng::new(seed);
        let outcome = sample(&array, &mut rng).unwrap();
        prop_assert!(outcome.draws >= 1);
        if filler >= 2 {
            prop_assert_eq!(outcome.value, candidate);
        } else {
            prop_assert!(is_majority(&array, &outcome.value).unwrap());
        }
    }

    #[test]
    fn series_entries_are_prefix_means(
        runs in 1usize..300,
        seed in any::<u64>(),
    ) {
        let array = [1, 5, 1, 1, 5, 5, 5, 7, 8, 2, 5, 5, 5];
        let mut rng = SimplePrng::new(seed);
        let series = simulate(&array, runs, &mut rng).unwrap();
        prop_assert_eq!(series.len(), runs);
        let mut total = 0u64;
        for (k, &draws) in series.draw_counts().iter().enumerate() {
            prop_assert!(draws >= 1);
            total += draws;
            prop_assert_eq!(series.get(k + 1).unwrap(), total as f64 / (k + 1) as f64);
        }
    }

    #[test]
    fn folded_series_preserves_draw_counts(
        counts in prop::collection::vec(1u64..50, 1..100),
    ) {
        let series = ConvergenceSeries::from_draw_counts(counts.clone());
        let total: u64 = counts.iter().sum();
        prop_assert_eq!(series.total_draws(), total);
        prop_assert_eq!(series.final_average().unwrap(), total as f64 / counts.len() as f64);
        prop_assert_eq!(series.draw_counts(), counts.as_slice());
    }
}
