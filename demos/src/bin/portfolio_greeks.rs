//! Evaluates a small option portfolio and prints the checksummed report.
//!
//! Usage: `portfolio_greeks [positions.json] [YYYY-MM-DD]`
//!
//! Without arguments a two-leg call/put book on the same strike is priced
//! with zero rates. The positions file is a JSON array of objects with
//! `id`, `option_type`, `strike`, `spot`, `days_to_expiry`, `market_price`
//! and the optional `vol_guess` and `quantity` fields.

use chrono::NaiveDate;
use greeks_rs::prelude::*;
use std::{env, fs};
use tracing::{error, info};

fn default_positions() -> Vec<Position> {
    vec![
        Position::new("opt1", OptionSpec::call(2.9, 2.939, 17, 0.1034)).with_vol_guess(0.22),
        Position::new("opt2", OptionSpec::put(2.9, 2.939, 17, 0.06)).with_vol_guess(0.22),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = env::args().skip(1);
    let positions = match args.next() {
        Some(path) => {
            info!("Loading positions from {path}");
            positions_from_json(&fs::read_to_string(path)?)?
        }
        None => default_positions(),
    };

    let market = match args.next() {
        Some(date) => MarketData::new(NaiveDate::parse_from_str(&date, "%Y-%m-%d")?, 0.0, 0.0)?,
        None => MarketData::today(0.0, 0.0)?,
    };

    info!(
        "Pricing {} positions as of {}",
        positions.len(),
        market.evaluation_date()
    );

    let aggregator = PortfolioAggregator::new(&market).with_policy(AggregationPolicy::BestEffort);
    let report = aggregator.evaluate_parallel(&positions)?;

    for position in &report.positions {
        info!(
            "{:>8}  iv={:>7.3}%  delta={:>9.5}  gamma={:>9.5}  vega={:>9.5}  theta/day={:>9.5}",
            position.id,
            position.record.implied_vol * 100.0,
            position.record.delta,
            position.record.gamma,
            position.record.vega_per_point(),
            position.record.theta_per_day()
        );
    }
    for failure in &report.failures {
        error!("{:>8}  skipped: {}", failure.id, failure.error);
    }

    info!(
        "Portfolio delta={:.5} gamma={:.5} vega={:.5} theta/day={:.5}",
        report.totals.delta,
        report.totals.gamma,
        report.totals.vega,
        report.totals.theta_per_day()
    );

    let package = PortfolioReportPackage::new(report)?;
    println!("{}", package.to_json()?);

    Ok(())
}
