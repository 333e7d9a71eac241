//! Error types for mcpi.
//!
//! Every fallible operation returns `Result<T, SimError>` instead of
//! panicking, from stdin parsing through the sweep loops.

use thiserror::Error;

/// Result type alias for mcpi operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all mcpi operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Guard Violations =====
    /// Numerical instability detected (NaN or Inf).
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Constraint violation detected.
    #[error("Jidoka: constraint '{name}' violated by {violation:.6e} (tolerance: {tolerance:.6e})")]
    ConstraintViolation {
        /// Name of the violated constraint.
        name: String,
        /// Amount of violation.
        violation: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    // ===== Input Errors =====
    /// Malformed or missing value on standard input.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the prompted value (e.g. "x").
        field: String,
        /// What went wrong.
        reason: String,
    },

    /// Sampler range that cannot produce values.
    #[error("Invalid sampling range [{lo}, {hi})")]
    InvalidRange {
        /// Lower bound (inclusive).
        lo: f64,
        /// Upper bound (exclusive).
        hi: f64,
    },

    /// Circle geometry that cannot be sampled.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Integration bounds that rejection sampling cannot handle.
    #[error("Invalid integration bounds [{a}, {b}]: {reason}")]
    InvalidBounds {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
        /// Why the bounds were rejected.
        reason: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File or stream I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ===== Domain Errors =====
    /// Monte Carlo error.
    #[error("Monte Carlo error: {0}")]
    MonteCarlo(String),
}

impl SimError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an input error for a named field.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a bounds error.
    #[must_use]
    pub fn invalid_bounds(a: f64, b: f64, reason: impl Into<String>) -> Self {
        Self::InvalidBounds {
            a,
            b,
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a Monte Carlo error.
    #[must_use]
    pub fn monte_carlo(message: impl Into<String>) -> Self {
        Self::MonteCarlo(message.into())
    }

    /// Check if this error was raised by the run-time estimate guard.
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteValue { .. } | Self::ConstraintViolation { .. }
        )
    }

    /// Check if this error was caused by user-supplied parameters.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidRange { .. }
                | Self::InvalidGeometry(_)
                | Self::InvalidBounds { .. }
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
