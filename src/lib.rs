//! # greeks-rs
//!
//! Pricing, implied volatility and portfolio Greeks for vanilla European
//! options under the Black-Scholes-Merton lognormal model.
//!
//! ## Layout
//!
//! - [`pricing`]: market snapshot, contract types, the analytic model and
//!   the implied volatility solver.
//! - [`portfolio`]: per-position Greeks, fail-fast or best-effort
//!   aggregation, and checksummed JSON reports.
//!
//! ## Conventions
//!
//! - Time to expiry is `days_to_expiry / 365` (Actual/365 Fixed) from the
//!   evaluation date carried by [`pricing::MarketData`].
//! - Rates and dividend yields are continuously compounded.
//! - Vega is per unit of volatility; theta is per year. Per-day and
//!   per-point views are available on [`portfolio::GreeksRecord`].
//!
//! ## Failure semantics
//!
//! A price outside the no-arbitrage range, or a solver that runs out of
//! iterations, yields a typed error. A failed position is never replaced
//! by a default volatility or zero Greeks, so a portfolio total is either
//! the exact sum of its positions or an explicit report of what was
//! skipped. The only zero volatility the solver returns is the exact root
//! for a price sitting on its discounted intrinsic floor.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use greeks_rs::prelude::*;
//!
//! let market = MarketData::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 0.0, 0.0)?;
//! let positions = vec![
//!     Position::new("opt1", OptionSpec::call(2.9, 2.939, 17, 0.1034)),
//!     Position::new("opt2", OptionSpec::put(2.9, 2.939, 17, 0.06)),
//! ];
//!
//! let totals = PortfolioAggregator::new(&market).aggregate(&positions)?;
//! println!("portfolio delta: {:.4}", totals.delta);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `parallel`: enables `PortfolioAggregator::evaluate_parallel`, which
//!   prices positions on the rayon thread pool and reduces in input order.

pub mod portfolio;
pub mod pricing;

/// Commonly used types.
pub mod prelude {
    pub use crate::portfolio::{
        AggregationPolicy, GreeksRecord, PortfolioAggregator, PortfolioError, PortfolioReport,
        PortfolioReportPackage, PortfolioTotals, Position, PositionGreeksCalculator,
        positions_from_json,
    };
    pub use crate::pricing::{
        BlackScholesModel, Greeks, ImpliedVolatilitySolver, MarketData, OptionSpec, OptionType,
        PricingError, SolverConfig,
    };
}
