//! Jidoka (自働化) - stop-on-error guard for the sweep.
//!
//! Every estimate is inspected before it is written into a series. The
//! sweep stops at the first anomaly instead of reporting silently wrong
//! statistics.
//!
//! # Anomaly Types
//!
//! 1. **Non-finite values**: NaN or Inf estimates (extreme inputs)
//! 2. **Constraint violations**: more successes than trials

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JidokaConfig {
    /// NaN/Inf detection enabled.
    pub check_finite: bool,
    /// Success-count constraint enabled.
    pub check_counts: bool,
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self {
            check_finite: true,
            check_counts: true,
        }
    }
}

/// Position of an estimate inside the sweep table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Replicate series index.
    pub series: usize,
    /// Sample-size index.
    pub column: usize,
}

/// Run-time guard over estimates.
///
/// # Example
///
/// ```rust
/// use mcpi::engine::jidoka::{Cell, EstimateGuard, JidokaConfig};
///
/// let mut guard = EstimateGuard::new(JidokaConfig::default());
/// let cell = Cell { series: 0, column: 0 };
/// assert!(guard.check(cell, 3.14, 785, 1000).is_ok());
/// assert!(guard.check(cell, f64::NAN, 785, 1000).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EstimateGuard {
    config: JidokaConfig,
    checks: u64,
}

impl EstimateGuard {
    /// Create a new guard with the given configuration.
    #[must_use]
    pub const fn new(config: JidokaConfig) -> Self {
        Self { config, checks: 0 }
    }

    /// Inspect one estimate.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if `successes > trials`
    /// - `NonFiniteValue` if `estimate` is NaN or infinite
    pub fn check(
        &mut self,
        cell: Cell,
        estimate: f64,
        successes: usize,
        trials: usize,
    ) -> SimResult<()> {
        self.checks += 1;

        if self.config.check_counts && successes > trials {
            return Err(SimError::ConstraintViolation {
                name: format!("successes_le_trials[{}][{}]", cell.series, cell.column),
                violation: (successes - trials) as f64,
                tolerance: 0.0,
            });
        }

        if self.config.check_finite && !estimate.is_finite() {
            return Err(SimError::NonFiniteValue {
                location: format!("series[{}][{}]", cell.series, cell.column),
            });
        }

        Ok(())
    }

    /// Number of estimates inspected so far.
    #[must_use]
    pub const fn checks(&self) -> u64 {
        self.checks
    }

    /// Reset the inspection counter.
    pub fn reset(&mut self) {
        self.checks = 0;
    }

    /// Get configuration.
    #[must_use]
    pub const fn config(&self) -> &JidokaConfig {
        &self.config
    }
}
