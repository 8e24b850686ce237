//! Portfolio Greeks: per-position evaluation and aggregation.

pub mod aggregator;
/// Single-position implied volatility and Greeks.
pub mod calculator;
pub mod error;
pub mod position;
/// Checksummed JSON packaging of portfolio reports.
pub mod snapshot;

pub use aggregator::{
    AggregationPolicy, PortfolioAggregator, PortfolioReport, PortfolioTotals, PositionFailure,
    PositionGreeks,
};
pub use calculator::PositionGreeksCalculator;
pub use error::PortfolioError;
pub use position::{GreeksRecord, Position, positions_from_json};
pub use snapshot::{PORTFOLIO_REPORT_FORMAT_VERSION, PortfolioReportPackage};
