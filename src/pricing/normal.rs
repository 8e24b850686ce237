//! Standard normal distribution functions.

use std::f64::consts::{PI, SQRT_2};

/// Standard normal cumulative distribution function (CDF).
///
/// Calculates P(Z ≤ x) through the complementary error function, which
/// keeps full relative precision in the lower tail.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Standard normal probability density function (PDF).
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
