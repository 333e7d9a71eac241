//! Core sampling engine.
//!
//! - Deterministic RNG (PCG with partitioned seeds)
//! - Uniform samplers owning their own streams
//! - Jidoka guard for stop-on-error

pub mod jidoka;
pub mod rng;
pub mod sampler;

pub use jidoka::{EstimateGuard, JidokaConfig};
pub use rng::SimRng;
pub use sampler::UniformSampler;
