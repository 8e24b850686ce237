//! Contract types for European option pricing.

use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::market::MarketData;

/// European option payoff direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

/// A vanilla European option contract together with its observed price.
///
/// Days to expiry are counted from the evaluation date carried by
/// [`MarketData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Call or Put.
    pub option_type: OptionType,
    /// Option strike price in price units.
    pub strike: f64,
    /// Underlying spot price in price units.
    pub spot: f64,
    /// Calendar days until expiry.
    pub days_to_expiry: i64,
    /// Observed option price in price units.
    pub market_price: f64,
}

impl OptionSpec {
    /// Creates a new option specification.
    #[must_use]
    pub fn new(
        option_type: OptionType,
        strike: f64,
        spot: f64,
        days_to_expiry: i64,
        market_price: f64,
    ) -> Self {
        Self {
            option_type,
            strike,
            spot,
            days_to_expiry,
            market_price,
        }
    }

    /// Creates a call specification.
    #[must_use]
    pub fn call(strike: f64, spot: f64, days_to_expiry: i64, market_price: f64) -> Self {
        Self::new(OptionType::Call, strike, spot, days_to_expiry, market_price)
    }

    /// Creates a put specification.
    #[must_use]
    pub fn put(strike: f64, spot: f64, days_to_expiry: i64, market_price: f64) -> Self {
        Self::new(OptionType::Put, strike, spot, days_to_expiry, market_price)
    }

    /// Returns a copy of this contract quoted at a different market price.
    #[must_use]
    pub fn with_market_price(&self, market_price: f64) -> Self {
        Self {
            market_price,
            ..self.clone()
        }
    }

    /// Checks that strike, spot and expiry are inside the model's domain.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] for a non-positive or
    /// non-finite strike or spot, or a negative expiry.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(PricingError::invalid_input(format!(
                "spot price must be positive, got {}",
                self.spot
            )));
        }

        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(PricingError::invalid_input(format!(
                "strike price must be positive, got {}",
                self.strike
            )));
        }

        if self.days_to_expiry < 0 {
            return Err(PricingError::invalid_input(format!(
                "days to expiry must be non-negative, got {}",
                self.days_to_expiry
            )));
        }

        Ok(())
    }

    /// Time to expiry in years under the market's day count.
    #[must_use]
    pub fn time_to_expiry(&self, market: &MarketData) -> f64 {
        market.year_fraction(self.days_to_expiry)
    }

    /// Undiscounted intrinsic value.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        (self.spot - self.strike).abs() / self.strike < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }
}
