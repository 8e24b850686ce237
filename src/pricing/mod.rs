//! Black-Scholes-Merton pricing and implied volatility.
//!
//! This module provides the analytic pricing engine for vanilla European
//! options and the solver that inverts it to implied volatility.
//!
//! # Overview
//!
//! Implied Volatility (IV) is the option's price expressed in different
//! units: the flat volatility which, plugged into Black-Scholes-Merton,
//! reproduces the observed premium.
//!
//! # Black-Scholes Inversion
//!
//! There is no closed-form inverse, so [`ImpliedVolatilitySolver`] runs
//! Newton-Raphson on the analytic vega, guarded by a shrinking bisection
//! bracket. Prices outside the no-arbitrage range are rejected before
//! iterating, and a search that exhausts its budget returns
//! [`PricingError::NumericalNonConvergence`]. No failure is ever replaced
//! by a default volatility.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use greeks_rs::pricing::{BlackScholesModel, ImpliedVolatilitySolver, MarketData, OptionSpec};
//!
//! let market = MarketData::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 0.0, 0.0)?;
//! let spec = OptionSpec::call(2.9, 2.939, 17, 0.1034);
//!
//! let iv = ImpliedVolatilitySolver::default().solve(spec.market_price, &spec, &market)?;
//! let greeks = BlackScholesModel::greeks(&spec, iv, &market)?;
//! assert!(greeks.delta > 0.0 && greeks.delta < 1.0);
//! # Ok::<(), greeks_rs::pricing::PricingError>(())
//! ```

mod black_scholes;
mod error;
mod market;
mod normal;
mod solver;
mod types;

pub use black_scholes::{BlackScholesModel, Greeks};
pub use error::PricingError;
pub use market::{DayCount, MarketData};
pub use normal::{norm_cdf, norm_pdf};
pub use solver::{IVResult, ImpliedVolatilitySolver, SolverConfig};
pub use types::{OptionSpec, OptionType};
