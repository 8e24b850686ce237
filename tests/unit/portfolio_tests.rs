use greeks_rs::prelude::*;

use super::market;

fn two_leg_portfolio() -> Vec<Position> {
    vec![
        Position::new("opt1", OptionSpec::call(2.9, 2.939, 17, 0.1034)).with_vol_guess(0.22),
        Position::new("opt2", OptionSpec::put(2.9, 2.939, 17, 0.06)).with_vol_guess(0.22),
    ]
}

#[test]
fn test_two_leg_delta_is_sum_of_legs() {
    let m = market(0.0, 0.0);
    let positions = two_leg_portfolio();
    let calculator = PositionGreeksCalculator::new(&m);
    let call = calculator.compute_greeks(&positions[0]).unwrap();
    let put = calculator.compute_greeks(&positions[1]).unwrap();

    let totals = PortfolioAggregator::new(&m).aggregate(&positions).unwrap();
    assert_eq!(totals.delta, call.delta + put.delta);
    assert_eq!(totals.gamma, call.gamma + put.gamma);
    assert_eq!(totals.vega, call.vega + put.vega);
    assert_eq!(totals.theta, call.theta + put.theta);

    // Each leg keeps its own implied vol
    assert!(call.implied_vol > put.implied_vol);
    assert!(put.delta < 0.0 && call.delta > 0.0);
}

#[test]
fn test_repeated_runs_are_identical() {
    let m = market(0.0, 0.0);
    let aggregator = PortfolioAggregator::new(&m);

    let first = PortfolioReportPackage::new(aggregator.evaluate(&two_leg_portfolio()).unwrap())
        .unwrap();
    let second = PortfolioReportPackage::new(aggregator.evaluate(&two_leg_portfolio()).unwrap())
        .unwrap();

    assert_eq!(first.report, second.report);
    assert_eq!(first.checksum, second.checksum);
}

#[test]
fn test_fail_fast_identifies_position() {
    let m = market(0.0, 0.0);
    let mut positions = two_leg_portfolio();
    positions.push(Position::new("stale-quote", OptionSpec::put(3.2, 2.939, 17, 0.01)));

    match PortfolioAggregator::new(&m).aggregate(&positions) {
        Err(PortfolioError::Position { index, id, source }) => {
            assert_eq!(index, 2);
            assert_eq!(id, "stale-quote");
            assert!(matches!(source, PricingError::OutOfBoundsPrice { .. }));
        }
        other => panic!("expected a position error, got {other:?}"),
    }
}

#[test]
fn test_best_effort_from_json() {
    let json = r#"[
        {"id": "opt1", "option_type": "Call", "strike": 2.9, "spot": 2.939,
         "days_to_expiry": 17, "market_price": 0.1034},
        {"id": "opt2", "option_type": "Put", "strike": 2.9, "spot": 2.939,
         "days_to_expiry": 17, "market_price": 0.06},
        {"id": "opt3", "option_type": "Put", "strike": 2.9, "spot": 2.939,
         "days_to_expiry": -4, "market_price": 0.06}
    ]"#;
    let positions = positions_from_json(json).unwrap();
    let m = market(0.0, 0.0);

    let report = PortfolioAggregator::new(&m)
        .with_policy(AggregationPolicy::BestEffort)
        .evaluate(&positions)
        .unwrap();

    assert_eq!(report.positions.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, "opt3");
    assert!(report.failures[0].error.contains("days to expiry"));

    let clean = PortfolioAggregator::new(&m)
        .aggregate(&positions[..2])
        .unwrap();
    assert_eq!(report.totals, clean);
}

#[test]
fn test_signed_quantities_net_out() {
    let m = market(0.01, 0.0);
    let long = Position::new("long", OptionSpec::call(100.0, 100.0, 60, 4.5)).with_quantity(2.0);
    let short = Position::new("short", OptionSpec::call(100.0, 100.0, 60, 4.5)).with_quantity(-2.0);

    let totals = PortfolioAggregator::new(&m).aggregate(&[long, short]).unwrap();
    assert_eq!(totals.delta, 0.0);
    assert_eq!(totals.gamma, 0.0);
    assert_eq!(totals.vega, 0.0);
    assert_eq!(totals.theta, 0.0);
}

#[test]
fn test_report_package_json_survives_transport() {
    let m = market(0.0, 0.0);
    let report = PortfolioAggregator::new(&m)
        .evaluate(&two_leg_portfolio())
        .unwrap();
    let json = PortfolioReportPackage::new(report.clone())
        .unwrap()
        .to_json()
        .unwrap();

    let restored = PortfolioReportPackage::from_json(&json)
        .unwrap()
        .into_report()
        .unwrap();
    assert_eq!(restored, report);
}
