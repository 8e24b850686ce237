//! Portfolio-level aggregation of position Greeks.
//!
//! Greeks are additive across positions under a flat per-position
//! volatility: the portfolio total is the component-wise sum of the
//! position records. Summation always runs in input order, so repeated
//! runs (and the parallel variant) produce bit-identical totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::calculator::PositionGreeksCalculator;
use super::error::PortfolioError;
use super::position::{GreeksRecord, Position};
use crate::pricing::{MarketData, PricingError, SolverConfig};

/// What to do when a single position fails to price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationPolicy {
    /// Abort on the first failing position and report it.
    #[default]
    FailFast,
    /// Skip failing positions, report them alongside partial totals.
    BestEffort,
}

/// Sum of delta, gamma, vega and theta across positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Net delta.
    pub delta: f64,
    /// Net gamma.
    pub gamma: f64,
    /// Net vega, per unit of volatility.
    pub vega: f64,
    /// Net theta, per year.
    pub theta: f64,
}

impl PortfolioTotals {
    /// Adds one position record. Implied volatility is not summed.
    pub fn accumulate(&mut self, record: &GreeksRecord) {
        self.delta += record.delta;
        self.gamma += record.gamma;
        self.vega += record.vega;
        self.theta += record.theta;
    }

    /// Net theta per calendar day.
    #[must_use]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }
}

impl<'r> std::iter::Sum<&'r GreeksRecord> for PortfolioTotals {
    fn sum<I: Iterator<Item = &'r GreeksRecord>>(iter: I) -> Self {
        iter.fold(PortfolioTotals::default(), |mut totals, record| {
            totals.accumulate(record);
            totals
        })
    }
}

/// A successfully priced position in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGreeks {
    /// Zero-based index in the input order.
    pub index: usize,
    /// Position identifier.
    pub id: String,
    /// Implied volatility and Greeks.
    pub record: GreeksRecord,
}

/// A position skipped under [`AggregationPolicy::BestEffort`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFailure {
    /// Zero-based index in the input order.
    pub index: usize,
    /// Position identifier.
    pub id: String,
    /// Rendered pricing error.
    pub error: String,
}

/// Totals plus per-position detail for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Evaluation date the positions were priced at.
    pub evaluation_date: NaiveDate,
    /// Sum over successfully priced positions.
    pub totals: PortfolioTotals,
    /// Per-position results in input order.
    pub positions: Vec<PositionGreeks>,
    /// Skipped positions in input order (always empty under fail-fast).
    pub failures: Vec<PositionFailure>,
}

impl PortfolioReport {
    /// True when every position priced successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Looks up a position's record by identifier.
    #[must_use]
    pub fn record(&self, id: &str) -> Option<&GreeksRecord> {
        self.positions
            .iter()
            .find(|position| position.id == id)
            .map(|position| &position.record)
    }
}

/// Evaluates every position of a portfolio and sums their Greeks.
#[derive(Debug, Clone)]
pub struct PortfolioAggregator<'a> {
    calculator: PositionGreeksCalculator<'a>,
    policy: AggregationPolicy,
}

impl<'a> PortfolioAggregator<'a> {
    /// Creates a fail-fast aggregator with the default solver configuration.
    #[must_use]
    pub fn new(market: &'a MarketData) -> Self {
        Self::from_calculator(PositionGreeksCalculator::new(market))
    }

    /// Creates an aggregator with a custom solver configuration.
    #[must_use]
    pub fn with_solver_config(market: &'a MarketData, config: SolverConfig) -> Self {
        Self::from_calculator(PositionGreeksCalculator::with_solver_config(market, config))
    }

    /// Wraps an existing calculator.
    #[must_use]
    pub fn from_calculator(calculator: PositionGreeksCalculator<'a>) -> Self {
        Self {
            calculator,
            policy: AggregationPolicy::default(),
        }
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The failure policy in effect.
    #[must_use]
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Sums the Greeks of all positions.
    ///
    /// # Errors
    /// Under [`AggregationPolicy::FailFast`], [`PortfolioError::Position`]
    /// for the first position that fails to price.
    pub fn aggregate(&self, positions: &[Position]) -> Result<PortfolioTotals, PortfolioError> {
        self.evaluate(positions).map(|report| report.totals)
    }

    /// Prices every position in order and builds the full report.
    ///
    /// Under fail-fast, evaluation stops at the first failure.
    ///
    /// # Errors
    /// See [`aggregate`](Self::aggregate).
    pub fn evaluate(&self, positions: &[Position]) -> Result<PortfolioReport, PortfolioError> {
        let results = positions
            .iter()
            .map(|position| self.calculator.compute_greeks(position));
        self.reduce(positions, results)
    }

    /// Prices positions concurrently, then reduces in input order.
    ///
    /// The result is identical to [`evaluate`](Self::evaluate); under
    /// fail-fast the reported error is the lowest failing index, although
    /// every position has been priced by then.
    ///
    /// # Errors
    /// See [`aggregate`](Self::aggregate).
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel(
        &self,
        positions: &[Position],
    ) -> Result<PortfolioReport, PortfolioError> {
        use rayon::prelude::*;

        let results: Vec<Result<GreeksRecord, PricingError>> = positions
            .par_iter()
            .map(|position| self.calculator.compute_greeks(position))
            .collect();
        self.reduce(positions, results.into_iter())
    }

    fn reduce<I>(
        &self,
        positions: &[Position],
        results: I,
    ) -> Result<PortfolioReport, PortfolioError>
    where
        I: Iterator<Item = Result<GreeksRecord, PricingError>>,
    {
        let mut report = PortfolioReport {
            evaluation_date: self.calculator.market().evaluation_date(),
            totals: PortfolioTotals::default(),
            positions: Vec::with_capacity(positions.len()),
            failures: Vec::new(),
        };

        for (index, (position, result)) in positions.iter().zip(results).enumerate() {
            match result {
                Ok(record) => {
                    report.totals.accumulate(&record);
                    report.positions.push(PositionGreeks {
                        index,
                        id: position.id.clone(),
                        record,
                    });
                }
                Err(source) => match self.policy {
                    AggregationPolicy::FailFast => {
                        return Err(PortfolioError::Position {
                            index,
                            id: position.id.clone(),
                            source,
                        });
                    }
                    AggregationPolicy::BestEffort => {
                        warn!("skipping position {index} ({}): {source}", position.id);
                        report.failures.push(PositionFailure {
                            index,
                            id: position.id.clone(),
                            error: source.to_string(),
                        });
                    }
                },
            }
        }

        info!(
            "aggregated {} of {} positions: delta={:.6} gamma={:.6} vega={:.6} theta={:.6}",
            report.positions.len(),
            positions.len(),
            report.totals.delta,
            report.totals.gamma,
            report.totals.vega,
            report.totals.theta
        );

        Ok(report)
    }
}
