#![deny(missing_docs)]

//! The design philosophy underlying `monte_majority` is pedagogical, yet mathematically rigorous.
//! Each module isolates one step of a classic randomized algorithm, illustrating how a
//! cheap predicate, a random draw and a running mean compose into an empirical proof.
//!
//! # monte_majority
//!
//! **monte_majority** finds the majority element of an array by repeated
//! uniform sampling, and measures how many draws that takes.  If the
//! majority element occupies `m` of the `n` positions, each draw succeeds with
//! probability `p = m/n`, so the number of draws per trial is geometric with
//! expectation `n/m`.  Repeating the trial many times and tracking the
//! running average shows the law of large numbers at work.
//!
//! ## Features
//!
//! * **Majority predicate**: [`is_majority`] accepts a candidate occurring at
//!   least `⌊n/2⌋` times.  The floor bound means an element filling exactly
//!   half of an even-length array is accepted.
//! * **Monte Carlo sampler**: [`sample`] and [`MajoritySampler`] draw
//!   positions until the predicate accepts one.  The loop is unbounded unless
//!   a draw cap is configured explicitly.
//! * **Convergence harness**: [`simulate`] records the cumulative running
//!   average of draw counts in a [`ConvergenceSeries`];
//!   [`simulate_streams`] does the same on independent seeded streams that
//!   may be sampled in parallel.
//! * **Seeded randomness**: [`SimplePrng`] is a BLAKE2b-backed stream
//!   generator implementing `rand::RngCore`, so experiments are reproducible.
//! * **Reporting and export**: [`ConvergenceReport`], [`write_series_csv`]
//!   and [`write_report_json`] hand the results to plotting tools.
//!
//! ## Usage
//!
//! ```rust
//! use monte_majority::{simulate, SimplePrng};
//!
//! let array = [1, 5, 1, 1, 5, 5, 5, 7, 8, 2, 5, 5, 5];
//! let mut rng = SimplePrng::new(2024);
//! let series = simulate(&array, 2_000, &mut rng).unwrap();
//!
//! // 5 occurs 7 times out of 13, so the average should settle near 13/7.
//! let average = series.final_average().unwrap();
//! assert!((average - 13.0 / 7.0).abs() < 0.25);
//! ```

pub mod config;
mod error;
mod harness;
mod io;
mod prng;
mod report;
mod sampler;
mod tester;

pub use config::{parse_array, ExperimentConfig, DEFAULT_ARRAY, DEFAULT_RUNS};
pub use error::{MajorityError, Result};
pub use harness::{simulate, simulate_streams, simulate_with, ConvergenceSeries};
pub use io::{write_report_json, write_series_csv};
pub use prng::SimplePrng;
pub use report::ConvergenceReport;
pub use sampler::{sample, MajoritySampler, TrialOutcome};
pub use tester::{ensure_majority, is_majority, majority_threshold, occurrences, MajorityProfile};
