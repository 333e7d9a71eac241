//! # mcpi
//!
//! Monte Carlo estimation of π and of ∫ₐᵇ (v³ + 1) dv.
//!
//! A reproducible estimation sweep built from:
//! - Seeded, partitionable PCG streams for every sampler
//! - Hit-or-miss trials against a circle or a cubic curve
//! - A multi-series sweep over sample sizes with relative-error summaries
//! - Jidoka guards that stop a run on impossible or non-finite estimates
//!
//! ## Example
//!
//! ```rust
//! use mcpi::prelude::*;
//!
//! let mode = ExperimentMode::Circle { x: 0.0, y: 0.0, r: 1.0 };
//! let mut predicate = mode.predicate(Some(42)).unwrap();
//!
//! let plan = SweepPlan::new(vec![1_000, 10_000]).unwrap();
//! let mut driver = SweepDriver::new(plan, Some(42));
//! let table = driver.run(&mut predicate, &mode.estimator()).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.mid_results(mode.truth()).len(), 2);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // v * v * v + 1 reads closer to the formula
    clippy::missing_const_for_fn,
    clippy::float_cmp,         // Exact comparisons are on seeded, replayed values
)]

pub mod cli;
pub mod config;
pub mod domains;
pub mod engine;
pub mod error;
pub mod report;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{OutputFormat, SweepConfig, SweepConfigBuilder};
    pub use crate::domains::monte_carlo::{Estimator, MonteCarloResult, TrialRunner};
    pub use crate::domains::predicate::{
        CirclePredicate, CurvePredicate, ExperimentPredicate, FnPredicate, Predicate,
    };
    pub use crate::domains::sweep::{SeriesSeeding, SweepDriver, SweepPlan, SweepTable};
    pub use crate::domains::{ExperimentMode, ModeKind};
    pub use crate::engine::jidoka::{EstimateGuard, JidokaConfig};
    pub use crate::engine::rng::SimRng;
    pub use crate::engine::sampler::UniformSampler;
    pub use crate::error::{SimError, SimResult};
    pub use crate::report::{EstimateReport, SweepReport};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
