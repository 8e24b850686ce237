//! Market data snapshot shared by every pricing call in a run.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Day count convention used to turn calendar days into year fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCount {
    /// Actual days elapsed divided by 365.
    #[default]
    Actual365Fixed,
}

impl DayCount {
    /// Year fraction between two dates.
    #[must_use]
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        self.year_fraction_for_days((end - start).num_days())
    }

    /// Year fraction spanned by a number of actual calendar days.
    #[must_use]
    pub fn year_fraction_for_days(&self, days: i64) -> f64 {
        match self {
            DayCount::Actual365Fixed => days as f64 / 365.0,
        }
    }
}

/// Immutable market snapshot: evaluation date, flat continuously
/// compounded risk-free rate and dividend yield.
///
/// The evaluation date is passed explicitly with every pricing call.
/// There is no process-wide "today".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    evaluation_date: NaiveDate,
    risk_free_rate: f64,
    dividend_yield: f64,
    #[serde(default)]
    day_count: DayCount,
}

impl MarketData {
    /// Creates a market snapshot.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if either rate is not finite.
    pub fn new(
        evaluation_date: NaiveDate,
        risk_free_rate: f64,
        dividend_yield: f64,
    ) -> Result<Self, PricingError> {
        if !risk_free_rate.is_finite() {
            return Err(PricingError::invalid_input(format!(
                "risk-free rate must be finite, got {risk_free_rate}"
            )));
        }
        if !dividend_yield.is_finite() {
            return Err(PricingError::invalid_input(format!(
                "dividend yield must be finite, got {dividend_yield}"
            )));
        }

        Ok(Self {
            evaluation_date,
            risk_free_rate,
            dividend_yield,
            day_count: DayCount::Actual365Fixed,
        })
    }

    /// Creates a market snapshot evaluated at the current local date.
    ///
    /// # Errors
    /// Same as [`MarketData::new`].
    pub fn today(risk_free_rate: f64, dividend_yield: f64) -> Result<Self, PricingError> {
        Self::new(Local::now().date_naive(), risk_free_rate, dividend_yield)
    }

    /// The calculation's reference date.
    #[must_use]
    pub fn evaluation_date(&self) -> NaiveDate {
        self.evaluation_date
    }

    /// Continuously compounded risk-free rate `r`.
    #[must_use]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Continuous dividend yield `q`.
    #[must_use]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    /// Absolute expiry date for a contract expiring in `days_to_expiry` days.
    ///
    /// Returns `None` if the date is outside chrono's representable range.
    #[must_use]
    pub fn expiry_date(&self, days_to_expiry: i64) -> Option<NaiveDate> {
        Duration::try_days(days_to_expiry)
            .and_then(|offset| self.evaluation_date.checked_add_signed(offset))
    }

    /// Time to expiry in years under the day count convention.
    #[must_use]
    pub fn year_fraction(&self, days_to_expiry: i64) -> f64 {
        self.day_count.year_fraction_for_days(days_to_expiry)
    }

    /// Risk-free discount factor `e^(-r·τ)`.
    #[must_use]
    pub fn discount_factor(&self, tau: f64) -> f64 {
        (-self.risk_free_rate * tau).exp()
    }

    /// Dividend discount factor `e^(-q·τ)`.
    #[must_use]
    pub fn dividend_factor(&self, tau: f64) -> f64 {
        (-self.dividend_yield * tau).exp()
    }
}
