//! Experiment domains.
//!
//! - `predicate`: point-in-circle and point-under-curve tests
//! - `monte_carlo`: trial runner and estimators
//! - `sweep`: multi-series convergence sweep

pub mod monte_carlo;
pub mod predicate;
pub mod sweep;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use monte_carlo::Estimator;
use predicate::{
    curve_integral, validate_circle, validate_curve_bounds, CirclePredicate, CurvePredicate,
    ExperimentPredicate,
};

/// Which experiment to run, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    /// Estimate π from a circle.
    #[default]
    Circle,
    /// Estimate ∫ₐᵇ (v³ + 1) dv.
    Curve,
}

impl ModeKind {
    /// Names of the parameters prompted for on stdin, in order.
    #[must_use]
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            Self::Circle => &["x", "y", "r"],
            Self::Curve => &["a", "b"],
        }
    }

    /// Build a mode from parameter values in [`ModeKind::parameters`] order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on a wrong value count, or the geometry/bounds
    /// error from [`ExperimentMode::validate`].
    pub fn with_values(self, values: &[f64]) -> SimResult<ExperimentMode> {
        let mode = match (self, values) {
            (Self::Circle, &[x, y, r]) => ExperimentMode::Circle { x, y, r },
            (Self::Curve, &[a, b]) => ExperimentMode::Curve { a, b },
            _ => {
                return Err(SimError::invalid_input(
                    self.to_string(),
                    format!(
                        "expected {} values, got {}",
                        self.parameters().len(),
                        values.len()
                    ),
                ))
            }
        };
        mode.validate()?;
        Ok(mode)
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Curve => write!(f, "curve"),
        }
    }
}

impl FromStr for ModeKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" | "pi" => Ok(Self::Circle),
            "curve" | "integral" => Ok(Self::Curve),
            other => Err(SimError::config(format!(
                "unknown mode '{other}' (expected 'circle' or 'curve')"
            ))),
        }
    }
}

/// A fully parameterized experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExperimentMode {
    /// π from a circle centered at `(x, y)` with radius `r`.
    Circle {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Radius.
        r: f64,
    },
    /// ∫ₐᵇ (v³ + 1) dv by rejection sampling.
    Curve {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },
}

impl ExperimentMode {
    /// The parameterless kind.
    #[must_use]
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Circle { .. } => ModeKind::Circle,
            Self::Curve { .. } => ModeKind::Curve,
        }
    }

    /// Check parameters without building samplers.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` for a non-finite circle or `r <= 0`;
    /// `InvalidBounds` for unusable integration bounds.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Self::Circle { x, y, r } => validate_circle(x, y, r),
            Self::Curve { a, b } => validate_curve_bounds(a, b),
        }
    }

    /// Known true value the estimates converge to.
    #[must_use]
    pub fn truth(&self) -> f64 {
        match *self {
            Self::Circle { .. } => std::f64::consts::PI,
            Self::Curve { a, b } => curve_integral(a, b),
        }
    }

    /// Estimator matching this experiment.
    #[must_use]
    pub const fn estimator(&self) -> Estimator {
        match *self {
            Self::Circle { .. } => Estimator::Pi,
            Self::Curve { a, b } => Estimator::Integral { a, b },
        }
    }

    /// Build the predicate. `seed = None` seeds each sampler from entropy.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ExperimentMode::validate`].
    pub fn predicate(&self, seed: Option<u64>) -> SimResult<ExperimentPredicate> {
        match *self {
            Self::Circle { x, y, r } => {
                CirclePredicate::new(x, y, r, seed).map(ExperimentPredicate::Circle)
            }
            Self::Curve { a, b } => CurvePredicate::new(a, b, seed).map(ExperimentPredicate::Curve),
        }
    }
}
