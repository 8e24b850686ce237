//! Per-position Greeks: solve implied volatility, then evaluate the model.

use tracing::debug;

use super::position::{GreeksRecord, Position};
use crate::pricing::{
    BlackScholesModel, ImpliedVolatilitySolver, MarketData, PricingError, SolverConfig,
};

/// Computes the [`GreeksRecord`] of single positions against one market
/// snapshot.
#[derive(Debug, Clone)]
pub struct PositionGreeksCalculator<'a> {
    market: &'a MarketData,
    solver: ImpliedVolatilitySolver,
}

impl<'a> PositionGreeksCalculator<'a> {
    /// Creates a calculator with the default solver configuration.
    #[must_use]
    pub fn new(market: &'a MarketData) -> Self {
        Self::with_solver_config(market, SolverConfig::default())
    }

    /// Creates a calculator with a custom solver configuration.
    #[must_use]
    pub fn with_solver_config(market: &'a MarketData, config: SolverConfig) -> Self {
        Self {
            market,
            solver: ImpliedVolatilitySolver::new(config),
        }
    }

    /// The market snapshot every position is priced against.
    #[must_use]
    pub fn market(&self) -> &'a MarketData {
        self.market
    }

    /// Solves the position's implied volatility from its market price and
    /// returns the Greeks at that volatility, scaled by quantity.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for a non-finite quantity, otherwise
    /// any [`PricingError`] from the solver or the model, unchanged.
    pub fn compute_greeks(&self, position: &Position) -> Result<GreeksRecord, PricingError> {
        if !position.quantity.is_finite() {
            return Err(PricingError::invalid_input(format!(
                "quantity must be finite, got {}",
                position.quantity
            )));
        }

        let spec = &position.spec;
        let solved =
            self.solver
                .solve_detailed(spec.market_price, spec, self.market, position.vol_guess)?;
        let greeks = BlackScholesModel::greeks(spec, solved.iv, self.market)?;

        debug!(
            "{}: iv={:.6} delta={:.6} gamma={:.6} vega={:.6} theta={:.6} ({} iterations)",
            position.id,
            solved.iv,
            greeks.delta,
            greeks.gamma,
            greeks.vega,
            greeks.theta,
            solved.iterations
        );

        Ok(GreeksRecord::from_greeks(solved.iv, greeks, position.quantity))
    }
}
