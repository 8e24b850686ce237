//! Error types for option pricing and implied volatility calculation.

use std::fmt;

/// Errors raised by the pricing model and the implied volatility solver.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Contract or market inputs outside the model's domain.
    InvalidInput {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Target price violates the no-arbitrage bounds, or needs a volatility
    /// outside the admissible search domain. No implied volatility exists.
    OutOfBoundsPrice {
        /// Target price observed.
        price: f64,
        /// Lowest price reachable by the model.
        lower: f64,
        /// Highest price reachable by the model.
        upper: f64,
    },

    /// Solver exhausted its iteration budget without meeting the tolerance.
    NumericalNonConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility estimate before giving up.
        last_vol: f64,
        /// Price residual at `last_vol`.
        residual: f64,
    },
}

impl PricingError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            message: message.into(),
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput { message } => {
                write!(f, "invalid input: {message}")
            }
            PricingError::OutOfBoundsPrice {
                price,
                lower,
                upper,
            } => {
                write!(
                    f,
                    "price {price:.6} is outside the attainable range [{lower:.6}, {upper:.6}], no implied volatility exists"
                )
            }
            PricingError::NumericalNonConvergence {
                iterations,
                last_vol,
                residual,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last vol: {last_vol:.6}, residual: {residual:.3e}"
                )
            }
        }
    }
}

impl std::error::Error for PricingError {}
