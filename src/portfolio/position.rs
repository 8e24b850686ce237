//! Portfolio positions and their per-position Greeks.

use serde::{Deserialize, Serialize};

use super::error::PortfolioError;
use crate::pricing::{Greeks, OptionSpec};

fn default_quantity() -> f64 {
    1.0
}

/// One option holding in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Identifier used in reports and error messages.
    pub id: String,
    /// Contract terms and observed price.
    #[serde(flatten)]
    pub spec: OptionSpec,
    /// Optional seed for the implied volatility search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol_guess: Option<f64>,
    /// Signed number of contracts (negative for short). Defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

impl Position {
    /// Creates a single long contract position.
    #[must_use]
    pub fn new(id: impl Into<String>, spec: OptionSpec) -> Self {
        Self {
            id: id.into(),
            spec,
            vol_guess: None,
            quantity: 1.0,
        }
    }

    /// Sets the implied volatility seed.
    #[must_use]
    pub fn with_vol_guess(mut self, vol_guess: f64) -> Self {
        self.vol_guess = Some(vol_guess);
        self
    }

    /// Sets the signed contract count. Non-finite counts fail at pricing.
    #[must_use]
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Parses an ordered list of positions from a JSON array.
///
/// # Errors
/// [`PortfolioError::DeserializationError`] if the document is malformed.
pub fn positions_from_json(data: &str) -> Result<Vec<Position>, PortfolioError> {
    serde_json::from_str(data).map_err(|error| PortfolioError::DeserializationError {
        message: error.to_string(),
    })
}

/// Implied volatility and Greeks of one position, scaled by its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksRecord {
    /// Solved implied volatility (per contract, not scaled).
    pub implied_vol: f64,
    /// Position delta.
    pub delta: f64,
    /// Position gamma.
    pub gamma: f64,
    /// Position vega, per unit of volatility.
    pub vega: f64,
    /// Position theta, per year.
    pub theta: f64,
}

impl GreeksRecord {
    /// Combines a solved volatility with model Greeks scaled by `quantity`.
    #[must_use]
    pub fn from_greeks(implied_vol: f64, greeks: Greeks, quantity: f64) -> Self {
        Self {
            implied_vol,
            delta: greeks.delta * quantity,
            gamma: greeks.gamma * quantity,
            vega: greeks.vega * quantity,
            theta: greeks.theta * quantity,
        }
    }

    /// Theta per calendar day (Actual/365).
    #[must_use]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Vega per one volatility point (1%).
    #[must_use]
    pub fn vega_per_point(&self) -> f64 {
        self.vega / 100.0
    }
}
