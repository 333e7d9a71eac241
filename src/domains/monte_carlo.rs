//! Hit-or-miss Monte Carlo: trial runner and estimators.
//!
//! # Convergence
//!
//! The hit count of N trials is binomial, so the estimate's standard error
//! is `scale · sqrt(p(1-p)/N)` and shrinks as O(N^{-1/2}).

use serde::{Deserialize, Serialize};

use super::predicate::{curve, Predicate};
use crate::error::{SimError, SimResult};

/// Result of a single Monte Carlo estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Point estimate.
    pub estimate: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Number of trials used.
    pub samples: usize,
    /// Number of successful trials.
    pub successes: usize,
    /// 95% confidence interval (estimate ± 1.96 * `std_error`).
    pub confidence_interval: (f64, f64),
}

impl MonteCarloResult {
    /// Create a new Monte Carlo result.
    #[must_use]
    pub fn new(estimate: f64, std_error: f64, samples: usize, successes: usize) -> Self {
        let ci_half = 1.96 * std_error;
        Self {
            estimate,
            std_error,
            samples,
            successes,
            confidence_interval: (estimate - ci_half, estimate + ci_half),
        }
    }

    /// Check if value is within confidence interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.confidence_interval.0 && value <= self.confidence_interval.1
    }
}

/// Runs a predicate a fixed number of times and counts the hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRunner {
    trials: usize,
}

impl TrialRunner {
    /// Create a runner for `trials` invocations.
    #[must_use]
    pub const fn new(trials: usize) -> Self {
        Self { trials }
    }

    /// Number of invocations per run.
    #[must_use]
    pub const fn trials(&self) -> usize {
        self.trials
    }

    /// Invoke `predicate` exactly `trials` times and return the hit count.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mcpi::domains::monte_carlo::TrialRunner;
    /// use mcpi::domains::predicate::FnPredicate;
    ///
    /// let runner = TrialRunner::new(100);
    /// assert_eq!(runner.run(&mut FnPredicate(|| true)), 100);
    /// ```
    pub fn run<P: Predicate + ?Sized>(&self, predicate: &mut P) -> usize {
        let mut successes = 0;
        for _ in 0..self.trials {
            if predicate.test() {
                successes += 1;
            }
        }
        successes
    }
}

/// Converts a hit count into an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Estimator {
    /// π from the circle/bounding-square area ratio: `4 · hits / N`.
    Pi,
    /// ∫ₐᵇ (v³ + 1) dv from the bounding rectangle `(b − a) · f(b)`.
    Integral {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },
}

impl Estimator {
    /// Area of the sampling region relative to the hit fraction.
    #[must_use]
    pub fn scale(&self) -> f64 {
        match *self {
            Self::Pi => 4.0,
            Self::Integral { a, b } => (b - a) * curve(b),
        }
    }

    /// Point estimate from `successes` out of `trials`.
    ///
    /// # Errors
    ///
    /// Returns `MonteCarlo` if `trials == 0` or `successes > trials`.
    pub fn estimate(&self, successes: usize, trials: usize) -> SimResult<f64> {
        if trials == 0 {
            return Err(SimError::monte_carlo("trial count must be positive"));
        }
        if successes > trials {
            return Err(SimError::monte_carlo(format!(
                "{successes} successes out of {trials} trials"
            )));
        }
        Ok(self.scale() * successes as f64 / trials as f64)
    }

    /// Point estimate with binomial standard error.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Estimator::estimate`].
    pub fn result(&self, successes: usize, trials: usize) -> SimResult<MonteCarloResult> {
        let estimate = self.estimate(successes, trials)?;
        let n = trials as f64;
        let p = successes as f64 / n;
        let std_error = self.scale() * (p * (1.0 - p) / n).sqrt();
        Ok(MonteCarloResult::new(estimate, std_error, trials, successes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::predicate::{CirclePredicate, CurvePredicate, FnPredicate};

    #[test]
    fn test_runner_always_true() {
        let runner = TrialRunner::new(1234);
        assert_eq!(runner.run(&mut FnPredicate(|| true)), 1234);
        assert_eq!(runner.trials(), 1234);
    }

    #[test]
    fn test_runner_always_false() {
        let runner = TrialRunner::new(1234);
        assert_eq!(runner.run(&mut FnPredicate(|| false)), 0);
    }

    #[test]
    fn test_runner_invokes_exactly_n_times() {
        let mut calls = 0usize;
        let runner = TrialRunner::new(77);
        let _ = runner.run(&mut FnPredicate(|| {
            calls += 1;
            calls % 3 == 0
        }));
        assert_eq!(calls, 77);
    }

    #[test]
    fn test_zero_trials_runs_nothing() {
        let runner = TrialRunner::new(0);
        assert_eq!(runner.run(&mut FnPredicate(|| true)), 0);
    }

    #[test]
    fn test_pi_estimator_extremes() {
        let est = Estimator::Pi;
        assert_eq!(est.estimate(1000, 1000).unwrap(), 4.0);
        assert_eq!(est.estimate(0, 1000).unwrap(), 0.0);
        assert_eq!(est.estimate(7, 7).unwrap(), 4.0);
    }

    #[test]
    fn test_integral_estimator_scale() {
        let est = Estimator::Integral { a: 0.0, b: 2.0 };
        assert_eq!(est.scale(), 18.0);
        assert!((est.estimate(1, 3).unwrap() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_estimator_rejects_zero_trials() {
        assert!(Estimator::Pi.estimate(0, 0).is_err());
        assert!(Estimator::Integral { a: 0.0, b: 1.0 }.result(0, 0).is_err());
    }

    #[test]
    fn test_estimator_rejects_overcount() {
        let err = Estimator::Pi.estimate(11, 10).unwrap_err();
        assert!(matches!(err, SimError::MonteCarlo(_)));
        assert!(err.to_string().contains("11 successes out of 10"));
        assert!(Estimator::Integral { a: 0.0, b: 2.0 }.result(4, 3).is_err());
    }

    #[test]
    fn test_result_std_error() {
        let result = Estimator::Pi.result(50, 100).unwrap();
        // 4 * sqrt(0.25 / 100) = 0.2
        assert!((result.std_error - 0.2).abs() < 1e-12);
        assert!(result.contains(2.0));
        assert!(!result.contains(3.0));
        assert_eq!(result.successes, 50);
        assert_eq!(result.samples, 100);
    }

    #[test]
    fn test_result_degenerate_has_zero_error() {
        let result = Estimator::Pi.result(10, 10).unwrap();
        assert_eq!(result.std_error, 0.0);
        assert_eq!(result.confidence_interval, (4.0, 4.0));
    }

    #[test]
    fn test_pi_estimate_large_run() {
        let mut p = CirclePredicate::new(0.0, 0.0, 1.0, Some(42)).unwrap();
        let n = 10_000_000;
        let hits = TrialRunner::new(n).run(&mut p);
        let pi = Estimator::Pi.estimate(hits, n).unwrap();
        assert!((pi - std::f64::consts::PI).abs() < 0.05, "pi estimate {pi}");
    }

    #[test]
    fn test_integral_estimate_reference_case() {
        let mut p = CurvePredicate::new(0.0, 2.0, Some(42)).unwrap();
        let n = 1_000_000;
        let hits = TrialRunner::new(n).run(&mut p);
        let integral = Estimator::Integral { a: 0.0, b: 2.0 }
            .estimate(hits, n)
            .unwrap();
        assert!((integral - 6.0).abs() < 0.1, "integral estimate {integral}");
    }
}
