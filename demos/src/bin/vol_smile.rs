//! Prices a strike ladder off a volatility skew, then recovers the skew
//! with the implied volatility solver.

use chrono::NaiveDate;
use greeks_rs::prelude::*;
use serde_json::json;
use tracing::{info, warn};

fn skew(strike: f64, spot: f64) -> f64 {
    let moneyness = (strike / spot).ln();
    0.22 - 0.15 * moneyness + 0.4 * moneyness * moneyness
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let evaluation_date = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid evaluation date")?;
    let market = MarketData::new(evaluation_date, 0.03, 0.01)?;
    let solver = ImpliedVolatilitySolver::new(SolverConfig::default().with_tolerance(1e-8));
    let spot = 100.0;
    let days = 60;

    let mut rows = Vec::new();
    for step in 0..=12 {
        let strike = 70.0 + 5.0 * step as f64;
        let option_type = if strike < spot {
            OptionType::Put
        } else {
            OptionType::Call
        };
        let input_vol = skew(strike, spot);
        let spec = OptionSpec::new(option_type, strike, spot, days, 0.0);
        let price = BlackScholesModel::price(&spec, input_vol, &market)?;

        match solver.solve(price, &spec, &market) {
            Ok(iv) => {
                info!(
                    "K={strike:>6.1} {option_type:?} price={price:>8.4} input={:.4}% solved={:.4}%",
                    input_vol * 100.0,
                    iv * 100.0
                );
                rows.push(json!({
                    "strike": strike,
                    "option_type": option_type,
                    "price": price,
                    "input_vol": input_vol,
                    "implied_vol": iv,
                }));
            }
            Err(err) => warn!("K={strike:>6.1}: {err}"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
