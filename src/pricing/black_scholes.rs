//! Black-Scholes-Merton pricing model and Greeks calculation.
//!
//! Closed-form European prices with continuous dividend yield, together
//! with the analytic partial derivatives used for risk reporting and as
//! the derivative in the implied volatility solver.

use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::market::MarketData;
use super::normal::{norm_cdf, norm_pdf};
use super::types::{OptionSpec, OptionType};

/// Analytic sensitivities of a single option.
///
/// Vega is per unit of volatility (not per 1%). Theta is the change in
/// value per year of calendar time, negative for a decaying long option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S².
    pub gamma: f64,
    /// ∂V/∂σ.
    pub vega: f64,
    /// ∂V/∂t, per year.
    pub theta: f64,
}

/// Black-Scholes-Merton pricing model implementation.
///
/// Every entry point validates its inputs and fails with
/// [`PricingError::InvalidInput`] instead of producing NaN.
pub struct BlackScholesModel;

impl BlackScholesModel {
    /// Calculates the d1 parameter of the Black-Scholes-Merton formula.
    ///
    /// d1 = [ln(S/K) + (r - q + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, dividend: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate - dividend + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes-Merton formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Calculates the theoretical option price.
    ///
    /// For calls: C = S·e^(-qT)·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·e^(-qT)·N(-d1)
    ///
    /// At expiry the price is the intrinsic value; with zero volatility it
    /// is the discounted forward intrinsic value.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for invalid contract terms or volatility.
    pub fn price(spec: &OptionSpec, vol: f64, market: &MarketData) -> Result<f64, PricingError> {
        validate_vol(vol)?;
        Ok(PricingInputs::new(spec, market)?.price(vol))
    }

    /// Calculates vega (∂price/∂σ), identical for calls and puts.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for invalid contract terms or volatility.
    pub fn vega(spec: &OptionSpec, vol: f64, market: &MarketData) -> Result<f64, PricingError> {
        validate_vol(vol)?;
        Ok(PricingInputs::new(spec, market)?.vega(vol))
    }

    /// Calculates delta, gamma, vega and theta at the given volatility.
    ///
    /// When `vol·√T` is zero (at expiry or with zero volatility) delta is
    /// the limiting step function of forward moneyness and the remaining
    /// Greeks are reported as zero.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for invalid contract terms or volatility.
    pub fn greeks(
        spec: &OptionSpec,
        vol: f64,
        market: &MarketData,
    ) -> Result<Greeks, PricingError> {
        validate_vol(vol)?;
        Ok(PricingInputs::new(spec, market)?.greeks(vol))
    }
}

fn validate_vol(vol: f64) -> Result<(), PricingError> {
    if !(vol.is_finite() && vol >= 0.0) {
        return Err(PricingError::invalid_input(format!(
            "volatility must be finite and non-negative, got {vol}"
        )));
    }
    Ok(())
}

/// Validated contract and market terms, resolved once and reused across
/// the many evaluations an implied volatility search performs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PricingInputs {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    dividend: f64,
    rate_discount: f64,
    dividend_discount: f64,
}

impl PricingInputs {
    pub(crate) fn new(spec: &OptionSpec, market: &MarketData) -> Result<Self, PricingError> {
        spec.validate()?;
        Ok(Self::from_parts(
            spec.option_type,
            spec.spot,
            spec.strike,
            spec.time_to_expiry(market),
            market.risk_free_rate(),
            market.dividend_yield(),
        ))
    }

    pub(crate) fn from_parts(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        dividend: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            time,
            rate,
            dividend,
            rate_discount: (-rate * time).exp(),
            dividend_discount: (-dividend * time).exp(),
        }
    }

    pub(crate) fn time(&self) -> f64 {
        self.time
    }

    /// Discounted spot `S·e^(-qT)`.
    fn discounted_spot(&self) -> f64 {
        self.spot * self.dividend_discount
    }

    /// Discounted strike `K·e^(-rT)`.
    fn discounted_strike(&self) -> f64 {
        self.strike * self.rate_discount
    }

    /// No-arbitrage price range `[lower, upper)`.
    ///
    /// The lower bound is the discounted forward intrinsic value, attained
    /// at zero volatility. The upper bound (discounted spot for calls,
    /// discounted strike for puts) is only approached as σ → ∞.
    pub(crate) fn price_bounds(&self) -> (f64, f64) {
        let (s, k) = (self.discounted_spot(), self.discounted_strike());
        match self.option_type {
            OptionType::Call => ((s - k).max(0.0), s),
            OptionType::Put => ((k - s).max(0.0), k),
        }
    }

    /// Standard deviation of log-returns to expiry, `σ√T`.
    fn total_vol(&self, vol: f64) -> f64 {
        vol * self.time.sqrt()
    }

    fn d1_d2(&self, vol: f64) -> (f64, f64) {
        let d1 = BlackScholesModel::d1(
            self.spot,
            self.strike,
            self.rate,
            self.dividend,
            self.time,
            vol,
        );
        (d1, BlackScholesModel::d2(d1, vol, self.time))
    }

    pub(crate) fn price(&self, vol: f64) -> f64 {
        if self.total_vol(vol) <= 0.0 {
            return self.price_bounds().0;
        }

        let (d1, d2) = self.d1_d2(vol);
        let (s, k) = (self.discounted_spot(), self.discounted_strike());

        match self.option_type {
            OptionType::Call => s * norm_cdf(d1) - k * norm_cdf(d2),
            OptionType::Put => k * norm_cdf(-d2) - s * norm_cdf(-d1),
        }
    }

    pub(crate) fn vega(&self, vol: f64) -> f64 {
        if self.total_vol(vol) <= 0.0 {
            return 0.0;
        }

        let (d1, _) = self.d1_d2(vol);
        self.discounted_spot() * norm_pdf(d1) * self.time.sqrt()
    }

    /// Limit of delta as `σ√T → 0`: a step on forward moneyness, zero at
    /// the money.
    fn degenerate_delta(&self) -> f64 {
        let (s, k) = (self.discounted_spot(), self.discounted_strike());
        match self.option_type {
            OptionType::Call if s > k => self.dividend_discount,
            OptionType::Put if s < k => -self.dividend_discount,
            _ => 0.0,
        }
    }

    pub(crate) fn greeks(&self, vol: f64) -> Greeks {
        let total_vol = self.total_vol(vol);
        if total_vol <= 0.0 {
            return Greeks {
                delta: self.degenerate_delta(),
                ..Greeks::default()
            };
        }

        let (d1, d2) = self.d1_d2(vol);
        let (s, k) = (self.discounted_spot(), self.discounted_strike());
        let pdf_d1 = norm_pdf(d1);
        let sqrt_time = self.time.sqrt();

        let gamma = self.dividend_discount * pdf_d1 / (self.spot * total_vol);
        let vega = s * pdf_d1 * sqrt_time;
        let decay = -s * pdf_d1 * vol / (2.0 * sqrt_time);

        let (delta, theta) = match self.option_type {
            OptionType::Call => (
                self.dividend_discount * norm_cdf(d1),
                decay - self.rate * k * norm_cdf(d2) + self.dividend * s * norm_cdf(d1),
            ),
            OptionType::Put => (
                self.dividend_discount * (norm_cdf(d1) - 1.0),
                decay + self.rate * k * norm_cdf(-d2) - self.dividend * s * norm_cdf(-d1),
            ),
        };

        Greeks {
            delta,
            gamma,
            vega,
            theta,
        }
    }
}
