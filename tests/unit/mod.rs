mod model_properties;
mod portfolio_tests;
mod solver_tests;

use chrono::NaiveDate;
use greeks_rs::prelude::*;

/// Market snapshot used across the suite.
pub(crate) fn market(rate: f64, dividend: f64) -> MarketData {
    MarketData::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), rate, dividend).unwrap()
}
