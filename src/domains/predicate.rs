//! Predicate tests for hit-or-miss Monte Carlo.
//!
//! A predicate draws one random point per call and reports whether it
//! landed in the target region. Predicates are stateful: the same instance
//! is reused across every trial runner of a sweep, and each call advances
//! its samplers.

use crate::engine::rng::SimRng;
use crate::engine::sampler::UniformSampler;
use crate::error::{SimError, SimResult};

/// A boolean probe drawing from its own samplers.
pub trait Predicate {
    /// Draw one point and test it.
    fn test(&mut self) -> bool;

    /// Restart every internal sampler from seeds drawn from `rng`.
    ///
    /// Predicates without random state ignore this.
    fn reseed(&mut self, _rng: &mut SimRng) {}
}

/// Adapter turning any `FnMut() -> bool` into a [`Predicate`].
#[derive(Debug, Clone)]
pub struct FnPredicate<F>(pub F);

impl<F: FnMut() -> bool> Predicate for FnPredicate<F> {
    fn test(&mut self) -> bool {
        (self.0)()
    }
}

/// The curve integrated in curve mode: f(v) = v³ + 1.
#[must_use]
pub fn curve(v: f64) -> f64 {
    v * v * v + 1.0
}

/// Exact value of ∫ₐᵇ (v³ + 1) dv.
#[must_use]
pub fn curve_integral(a: f64, b: f64) -> f64 {
    (b.powi(4) - a.powi(4)) / 4.0 + (b - a)
}

/// Draw one seed per coordinate sampler.
///
/// Seeds are PCG outputs rather than stream offsets, so samplers of one
/// series never land on a sibling series' partitioned stream.
fn sampler_seeds(rng: &mut SimRng) -> (u64, u64) {
    (rng.gen_u64(), rng.gen_u64())
}

/// Build two sampler seeds from one master seed, or `None` for entropy.
fn split_seed(seed: Option<u64>) -> Option<(u64, u64)> {
    seed.map(|s| sampler_seeds(&mut SimRng::new(s)))
}

/// Check that a circle can be sampled.
///
/// # Errors
///
/// See [`CirclePredicate::new`].
pub fn validate_circle(x: f64, y: f64, r: f64) -> SimResult<()> {
    if !x.is_finite() || !y.is_finite() || !r.is_finite() {
        return Err(SimError::InvalidGeometry(format!(
            "center ({x}, {y}) and radius {r} must be finite"
        )));
    }
    if r <= 0.0 {
        return Err(SimError::InvalidGeometry(format!(
            "radius must be positive, got {r}"
        )));
    }
    Ok(())
}

fn sampler_pair(
    x_range: (f64, f64),
    y_range: (f64, f64),
    seed: Option<u64>,
) -> SimResult<(UniformSampler, UniformSampler)> {
    match split_seed(seed) {
        Some((sx, sy)) => Ok((
            UniformSampler::new(x_range.0, x_range.1, sx)?,
            UniformSampler::new(y_range.0, y_range.1, sy)?,
        )),
        None => Ok((
            UniformSampler::from_entropy(x_range.0, x_range.1)?,
            UniformSampler::from_entropy(y_range.0, y_range.1)?,
        )),
    }
}

/// Point-in-circle test over the circle's bounding square.
///
/// The hit fraction converges to π/4 for any center and radius.
#[derive(Debug, Clone)]
pub struct CirclePredicate {
    x: f64,
    y: f64,
    r: f64,
    xs: UniformSampler,
    ys: UniformSampler,
}

impl CirclePredicate {
    /// Create a circle test centered at `(x, y)` with radius `r`.
    ///
    /// With `seed = None` each sampler is seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if any parameter is non-finite or `r <= 0`,
    /// and `InvalidRange` if the bounding square cannot be represented.
    pub fn new(x: f64, y: f64, r: f64, seed: Option<u64>) -> SimResult<Self> {
        validate_circle(x, y, r)?;
        let (xs, ys) = sampler_pair((x - r, x + r), (y - r, y + r), seed)?;
        Ok(Self { x, y, r, xs, ys })
    }

    /// Circle center.
    #[must_use]
    pub const fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Circle radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.r
    }
}

impl Predicate for CirclePredicate {
    fn test(&mut self) -> bool {
        let dx = self.xs.next_value() - self.x;
        let dy = self.ys.next_value() - self.y;
        // Points on the boundary count as inside.
        dx * dx + dy * dy - self.r * self.r < f64::EPSILON
    }

    fn reseed(&mut self, rng: &mut SimRng) {
        let (sx, sy) = sampler_seeds(rng);
        self.xs.reseed(sx);
        self.ys.reseed(sy);
    }
}

/// Point-under-curve test for f(v) = v³ + 1 on `[a, b]`.
///
/// Points are drawn from the rectangle `[a, b) × [0, f(b))`. f is strictly
/// increasing, so f(b) bounds the curve on the whole interval.
#[derive(Debug, Clone)]
pub struct CurvePredicate {
    a: f64,
    b: f64,
    xs: UniformSampler,
    ys: UniformSampler,
}

impl CurvePredicate {
    /// Create a rejection-sampling test over `[a, b]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` if a bound is non-finite, `b <= a`, or
    /// `a < -1` (the curve is negative left of -1 and the rectangle would
    /// not contain it).
    pub fn new(a: f64, b: f64, seed: Option<u64>) -> SimResult<Self> {
        validate_curve_bounds(a, b)?;
        let (xs, ys) = sampler_pair((a, b), (0.0, curve(b)), seed)?;
        Ok(Self { a, b, xs, ys })
    }

    /// Integration bounds.
    #[must_use]
    pub const fn bounds(&self) -> (f64, f64) {
        (self.a, self.b)
    }
}

/// Check that `[a, b]` is usable for rejection sampling under the curve.
///
/// # Errors
///
/// See [`CurvePredicate::new`].
pub fn validate_curve_bounds(a: f64, b: f64) -> SimResult<()> {
    if !a.is_finite() || !b.is_finite() {
        return Err(SimError::invalid_bounds(a, b, "bounds must be finite"));
    }
    if b <= a {
        return Err(SimError::invalid_bounds(
            a,
            b,
            "upper bound must exceed lower bound",
        ));
    }
    if a < -1.0 {
        return Err(SimError::invalid_bounds(
            a,
            b,
            "v^3 + 1 is negative below -1; lower bound must be >= -1",
        ));
    }
    if !curve(b).is_finite() {
        return Err(SimError::invalid_bounds(a, b, "curve overflows at upper bound"));
    }
    Ok(())
}

impl Predicate for CurvePredicate {
    fn test(&mut self) -> bool {
        let x = self.xs.next_value();
        let y = self.ys.next_value();
        curve(x) > y
    }

    fn reseed(&mut self, rng: &mut SimRng) {
        let (sx, sy) = sampler_seeds(rng);
        self.xs.reseed(sx);
        self.ys.reseed(sy);
    }
}

/// Either predicate, chosen at run time by the experiment mode.
#[derive(Debug, Clone)]
pub enum ExperimentPredicate {
    /// Point-in-circle.
    Circle(CirclePredicate),
    /// Point-under-curve.
    Curve(CurvePredicate),
}

impl Predicate for ExperimentPredicate {
    fn test(&mut self) -> bool {
        match self {
            Self::Circle(p) => p.test(),
            Self::Curve(p) => p.test(),
        }
    }

    fn reseed(&mut self, rng: &mut SimRng) {
        match self {
            Self::Circle(p) => p.reseed(rng),
            Self::Curve(p) => p.reseed(rng),
        }
    }
}
