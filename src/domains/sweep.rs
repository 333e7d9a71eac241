//! Multi-series convergence sweep.
//!
//! Runs one predicate across an ordered list of sample sizes, repeated over
//! several replicate series, and collects the estimates into a table.
//!
//! ```text
//!              n = 10^4   10^5   ...   10^8
//! series 0   [  est      est    ...   est  ]
//! series 1   [  est      est    ...   est  ]
//! ...
//! ```

use serde::{Deserialize, Serialize};

use super::monte_carlo::{Estimator, TrialRunner};
use super::predicate::Predicate;
use crate::engine::jidoka::{Cell, EstimateGuard};
use crate::engine::rng::SimRng;
use crate::error::{SimError, SimResult};

/// Sample sizes swept when none are configured: 10^4 through 10^8.
pub const DEFAULT_SAMPLE_SIZES: [usize; 5] =
    [10_000, 100_000, 1_000_000, 10_000_000, 100_000_000];

/// How replicate series relate to each other's random streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesSeeding {
    /// Reseed the predicate from a fresh partitioned stream before each series.
    #[default]
    Independent,
    /// Keep drawing from the predicate's stream where the last series stopped.
    Continued,
}

/// `|estimate − truth| / |truth|`.
///
/// Falls back to the absolute error when `truth` is zero.
#[must_use]
pub fn relative_error(estimate: f64, truth: f64) -> f64 {
    let abs = (estimate - truth).abs();
    if truth.abs() < f64::EPSILON {
        abs
    } else {
        abs / truth.abs()
    }
}

/// Validated sweep parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    sample_sizes: Vec<usize>,
    replicates: usize,
    seeding: SeriesSeeding,
}

impl SweepPlan {
    /// Plan a sweep over `sample_sizes` with one replicate per sample size.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the list is empty or contains a zero.
    pub fn new(sample_sizes: Vec<usize>) -> SimResult<Self> {
        if sample_sizes.is_empty() {
            return Err(SimError::config("sample_sizes must not be empty"));
        }
        if let Some(pos) = sample_sizes.iter().position(|&n| n == 0) {
            return Err(SimError::config(format!(
                "sample_sizes[{pos}] must be positive"
            )));
        }
        let replicates = sample_sizes.len();
        Ok(Self {
            sample_sizes,
            replicates,
            seeding: SeriesSeeding::default(),
        })
    }

    /// Override the replicate count.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `replicates == 0`.
    pub fn with_replicates(mut self, replicates: usize) -> SimResult<Self> {
        if replicates == 0 {
            return Err(SimError::config("replicates must be at least 1"));
        }
        self.replicates = replicates;
        Ok(self)
    }

    /// Choose how series are seeded.
    #[must_use]
    pub const fn with_seeding(mut self, seeding: SeriesSeeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Ordered trial counts.
    #[must_use]
    pub fn sample_sizes(&self) -> &[usize] {
        &self.sample_sizes
    }

    /// Number of replicate series.
    #[must_use]
    pub const fn replicates(&self) -> usize {
        self.replicates
    }

    /// Series seeding policy.
    #[must_use]
    pub const fn seeding(&self) -> SeriesSeeding {
        self.seeding
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            sample_sizes: DEFAULT_SAMPLE_SIZES.to_vec(),
            replicates: DEFAULT_SAMPLE_SIZES.len(),
            seeding: SeriesSeeding::default(),
        }
    }
}

/// Estimates of every series at every sample size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepTable {
    /// Ordered trial counts (column headers).
    pub sample_sizes: Vec<usize>,
    /// One row per replicate series.
    pub series: Vec<Vec<f64>>,
}

impl SweepTable {
    /// Number of replicate series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the table has no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Per-series relative errors against `truth`.
    #[must_use]
    pub fn relative_errors(&self, truth: f64) -> Vec<Vec<f64>> {
        self.series
            .iter()
            .map(|row| row.iter().map(|&v| relative_error(v, truth)).collect())
            .collect()
    }

    /// Cross-series mean estimate at each sample size.
    #[must_use]
    pub fn column_means(&self) -> Vec<f64> {
        let rows = self.series.len() as f64;
        (0..self.sample_sizes.len())
            .map(|col| {
                let sum: f64 = self
                    .series
                    .iter()
                    .filter_map(|row| row.get(col))
                    .sum();
                if rows > 0.0 {
                    sum / rows
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Relative error of the cross-series mean at each sample size.
    #[must_use]
    pub fn mid_results(&self, truth: f64) -> Vec<f64> {
        self.column_means()
            .into_iter()
            .map(|mean| relative_error(mean, truth))
            .collect()
    }
}

/// Progress notification emitted after each completed cell.
#[derive(Debug, Clone, Copy)]
pub struct SweepProgress {
    /// Series index.
    pub series: usize,
    /// Sample size index.
    pub column: usize,
    /// Trials run for this cell.
    pub trials: usize,
    /// Hits counted.
    pub successes: usize,
    /// Resulting estimate.
    pub estimate: f64,
}

/// Drives the trial runner over a [`SweepPlan`].
#[derive(Debug, Clone)]
pub struct SweepDriver {
    plan: SweepPlan,
    seeder: SimRng,
    guard: EstimateGuard,
}

impl SweepDriver {
    /// Create a driver. Independent series are seeded from `seed`, or from
    /// OS entropy when `seed` is `None`.
    #[must_use]
    pub fn new(plan: SweepPlan, seed: Option<u64>) -> Self {
        let seeder = seed.map_or_else(SimRng::from_entropy, SimRng::new);
        Self {
            plan,
            seeder,
            guard: EstimateGuard::default(),
        }
    }

    /// Replace the estimate guard.
    #[must_use]
    pub fn with_guard(mut self, guard: EstimateGuard) -> Self {
        self.guard = guard;
        self
    }

    /// The plan being executed.
    #[must_use]
    pub const fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    /// Master seed used for series reseeding.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.seeder.master_seed()
    }

    /// Estimates checked by the guard so far.
    #[must_use]
    pub const fn guard_checks(&self) -> u64 {
        self.guard.checks()
    }

    /// Run the full sweep.
    ///
    /// # Errors
    ///
    /// Propagates estimator errors and guard violations; the sweep stops at
    /// the first one.
    pub fn run<P: Predicate + ?Sized>(
        &mut self,
        predicate: &mut P,
        estimator: &Estimator,
    ) -> SimResult<SweepTable> {
        self.run_with_progress(predicate, estimator, |_| Ok(()))
    }

    /// Run the full sweep, reporting each finished cell to `on_cell`.
    ///
    /// # Errors
    ///
    /// See [`SweepDriver::run`]. An error returned by `on_cell` also stops
    /// the sweep.
    pub fn run_with_progress<P, F>(
        &mut self,
        predicate: &mut P,
        estimator: &Estimator,
        mut on_cell: F,
    ) -> SimResult<SweepTable>
    where
        P: Predicate + ?Sized,
        F: FnMut(SweepProgress) -> SimResult<()>,
    {
        let sizes = self.plan.sample_sizes.clone();
        let mut series = Vec::with_capacity(self.plan.replicates);
        let mut series_rngs = match self.plan.seeding {
            SeriesSeeding::Independent => self.seeder.partition(self.plan.replicates),
            SeriesSeeding::Continued => Vec::new(),
        }
        .into_iter();

        for s in 0..self.plan.replicates {
            if let Some(mut rng) = series_rngs.next() {
                predicate.reseed(&mut rng);
            }

            let mut row = Vec::with_capacity(sizes.len());
            for (column, &trials) in sizes.iter().enumerate() {
                let successes = TrialRunner::new(trials).run(predicate);
                let estimate = estimator.estimate(successes, trials)?;
                self.guard
                    .check(Cell { series: s, column }, estimate, successes, trials)?;

                on_cell(SweepProgress {
                    series: s,
                    column,
                    trials,
                    successes,
                    estimate,
                })?;
                row.push(estimate);
            }
            series.push(row);
        }

        Ok(SweepTable {
            sample_sizes: sizes,
            series,
        })
    }
}
