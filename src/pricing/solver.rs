//! Newton-Raphson solver with a bisection safeguard for implied volatility.
//!
//! Price is strictly increasing in volatility whenever time to expiry is
//! positive, so the root is unique. Newton steps use the analytic vega;
//! every iterate also tightens a `[low, high]` bracket around the root, and
//! any step that would leave the bracket (or that vega is too flat to
//! support) is replaced by the bracket midpoint.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::black_scholes::PricingInputs;
use super::error::PricingError;
use super::market::MarketData;
use super::types::OptionSpec;

/// Configuration for the implied volatility solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on the absolute price difference.
    pub tolerance: f64,
    /// Initial volatility guess when the caller supplies none (default: 0.2 = 20%).
    pub initial_guess: f64,
    /// Lower end of the admissible volatility domain (default: 0.0).
    pub min_vol: f64,
    /// Upper end of the admissible volatility domain (default: 5.0 = 500%).
    pub max_vol: f64,
    /// Vega below which the Newton step is replaced by bisection.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            initial_guess: 0.2,
            min_vol: 0.0,
            max_vol: 5.0,
            min_vega: 1e-12,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial volatility guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the admissible volatility domain.
    #[must_use]
    pub fn with_bounds(mut self, min_vol: f64, max_vol: f64) -> Self {
        self.min_vol = min_vol;
        self.max_vol = max_vol;
        self
    }

    /// Checks that the configuration describes a usable search.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] if the bounds are not an ordered
    /// non-negative finite interval, the tolerance is not positive, or the
    /// iteration budget is zero.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.min_vol.is_finite()
            && self.max_vol.is_finite()
            && self.min_vol >= 0.0
            && self.min_vol < self.max_vol)
        {
            return Err(PricingError::invalid_input(format!(
                "volatility bounds must satisfy 0 <= min < max, got [{}, {}]",
                self.min_vol, self.max_vol
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PricingError::invalid_input(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(PricingError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Result of a successful implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVResult {
    /// Implied volatility (e.g., 0.25 = 25%).
    pub iv: f64,
    /// Price evaluations performed inside the iteration loop.
    pub iterations: u32,
    /// How many of those iterations fell back to a bisection step.
    pub bisection_steps: u32,
}

/// Finds the flat volatility that reproduces an observed option price.
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolatilitySolver {
    config: SolverConfig,
}

impl ImpliedVolatilitySolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the volatility σ with `price(spec, σ) == target_price`
    /// within tolerance, seeded from the configured initial guess.
    ///
    /// # Errors
    /// - [`PricingError::InvalidInput`] for invalid contract terms or target
    /// - [`PricingError::OutOfBoundsPrice`] if no volatility in the
    ///   admissible domain reproduces the target
    /// - [`PricingError::NumericalNonConvergence`] if the iteration budget
    ///   runs out
    pub fn solve(
        &self,
        target_price: f64,
        spec: &OptionSpec,
        market: &MarketData,
    ) -> Result<f64, PricingError> {
        self.solve_detailed(target_price, spec, market, None)
            .map(|result| result.iv)
    }

    /// Like [`solve`](Self::solve), with an optional seed and iteration
    /// statistics in the result.
    ///
    /// # Errors
    /// See [`solve`](Self::solve).
    pub fn solve_detailed(
        &self,
        target_price: f64,
        spec: &OptionSpec,
        market: &MarketData,
        seed: Option<f64>,
    ) -> Result<IVResult, PricingError> {
        self.config.validate()?;
        let inputs = PricingInputs::new(spec, market)?;

        if !(target_price.is_finite() && target_price >= 0.0) {
            return Err(PricingError::invalid_input(format!(
                "target price must be finite and non-negative, got {target_price}"
            )));
        }

        let tolerance = self.config.tolerance;
        let (lower, upper) = inputs.price_bounds();

        if inputs.time() <= 0.0 {
            // At expiry every volatility prices to intrinsic value
            if (target_price - lower).abs() < tolerance {
                return Ok(IVResult {
                    iv: 0.0,
                    iterations: 0,
                    bisection_steps: 0,
                });
            }
            return Err(PricingError::OutOfBoundsPrice {
                price: target_price,
                lower,
                upper: lower,
            });
        }

        if target_price < lower - tolerance || target_price >= upper {
            debug!("target {target_price} violates no-arbitrage bounds [{lower}, {upper})");
            return Err(PricingError::OutOfBoundsPrice {
                price: target_price,
                lower,
                upper,
            });
        }

        let mut low = self.config.min_vol;
        let mut high = self.config.max_vol;
        let price_low = inputs.price(low);
        let price_high = inputs.price(high);

        if (price_low - target_price).abs() < tolerance {
            return Ok(IVResult {
                iv: low,
                iterations: 0,
                bisection_steps: 0,
            });
        }
        if (price_high - target_price).abs() < tolerance {
            return Ok(IVResult {
                iv: high,
                iterations: 0,
                bisection_steps: 0,
            });
        }
        if target_price < price_low || target_price > price_high {
            debug!(
                "target {target_price} outside attainable range [{price_low}, {price_high}] for vol in [{low}, {high}]"
            );
            return Err(PricingError::OutOfBoundsPrice {
                price: target_price,
                lower: price_low,
                upper: price_high,
            });
        }

        let guess = seed.unwrap_or(self.config.initial_guess);
        let mut vol = if guess.is_finite() && guess > low && guess < high {
            guess
        } else {
            0.5 * (low + high)
        };

        let mut bisection_steps = 0;
        let mut residual = f64::NAN;

        for iteration in 1..=self.config.max_iterations {
            residual = inputs.price(vol) - target_price;
            trace!("iteration {iteration}: vol={vol:.10} residual={residual:.3e}");

            if residual.abs() < tolerance {
                debug!(
                    "implied vol {vol:.6} converged in {iteration} iterations ({bisection_steps} bisection)"
                );
                return Ok(IVResult {
                    iv: vol,
                    iterations: iteration,
                    bisection_steps,
                });
            }

            if residual > 0.0 {
                high = vol;
            } else {
                low = vol;
            }

            let vega = inputs.vega(vol);
            let newton = vol - residual / vega;

            let newton_in_bracket = newton.is_finite() && newton > low && newton < high;
            vol = if vega >= self.config.min_vega && newton_in_bracket {
                newton
            } else {
                bisection_steps += 1;
                0.5 * (low + high)
            };
        }

        warn!(
            "implied vol solver exhausted {} iterations, last vol {vol:.6}, residual {residual:.3e}",
            self.config.max_iterations
        );
        Err(PricingError::NumericalNonConvergence {
            iterations: self.config.max_iterations,
            last_vol: vol,
            residual,
        })
    }
}
