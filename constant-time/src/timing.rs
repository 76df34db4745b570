//! Statistical timing tests
//!
//! Each test runs the same operation many times on two classes of secret inputs, in shuffled
//! order, and checks that the secret class does not correlate with the run time (absolute
//! Pearson correlation coefficient below 0.01).
//!
//! For discussion on how to (further) ensure the constant-time execution of these functions,
//! see <https://github.com/rosenpass/rosenpass/issues/232>

use core::hint::black_box;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::time::{Duration, Instant};

/// Number of trials per test
pub(crate) const TRIALS: usize = 1E6 as usize;

/// Correlation above which a test fails
const THRESHOLD: f64 = 0.01;

pub(crate) fn setup_logging() {
    let mut log_builder = env_logger::Builder::from_default_env(); // sets log level filter from environment (or defaults)
    log_builder.filter_level(log::LevelFilter::Info);
    let _ = log_builder.try_init();
}

/// Measures a single call to `f`
#[inline(always)]
pub(crate) fn time<R>(f: impl FnOnce() -> R) -> Duration {
    let now = Instant::now();
    black_box(f());
    now.elapsed()
}

/// Pearson correlation between the secret class and the run time.
///
/// `trial(class)` prepares its inputs for the given class, then returns the time the operation
/// under test took (see [time]). Half of the `n` trials are run with `class == true`.
pub(crate) fn correlation<F: FnMut(bool) -> Duration>(n: usize, mut trial: F) -> f64 {
    // vector representing all timing tests
    //
    // Each element is a tuple of:
    // 0: the secret class of the trial
    // 1: the duration needed for the operation to run
    let mut tests = (0..n)
        .map(|i| (i < n / 2, Duration::ZERO))
        .collect::<Vec<_>>();
    tests.shuffle(&mut thread_rng());

    for test in tests.iter_mut() {
        test.1 = trial(test.0);
    }

    let tests = tests
        .iter()
        .map(|t| (if t.0 { 1_f64 } else { 0_f64 }, t.1.as_nanos() as f64))
        .collect::<Vec<_>>();
    // averages
    let (avg_x, avg_y): (f64, f64) = (
        tests.iter().map(|t| t.0).sum::<f64>() / n as f64,
        tests.iter().map(|t| t.1).sum::<f64>() / n as f64,
    );
    assert!((avg_x - 0.5).abs() < 1E-12);
    // standard deviations
    let sd_x = 0.5;
    let sd_y = (1_f64 / n as f64
        * tests
            .iter()
            .map(|t| {
                let difference = t.1 - avg_y;
                difference * difference
            })
            .sum::<f64>())
    .sqrt();
    // covariance
    let cv = 1_f64 / n as f64
        * tests
            .iter()
            .map(|t| (t.0 - avg_x) * (t.1 - avg_y))
            .sum::<f64>();
    cv / (sd_x * sd_y)
}

/// Fails the test if the secret class of `trial` correlates with its run time
pub(crate) fn assert_uncorrelated<F: FnMut(bool) -> Duration>(name: &str, trial: F) {
    setup_logging();
    let correlation = correlation(TRIALS, trial);
    log::info!("{name}: correlation {correlation:.6?}");
    #[cfg(not(coverage))]
    assert!(
        correlation.abs() < THRESHOLD,
        "execution time of {name} correlates with a secret"
    )
}
