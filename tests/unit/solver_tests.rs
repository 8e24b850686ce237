use greeks_rs::prelude::*;

use super::market;

#[test]
fn test_round_trip_recovers_volatility() {
    let solver = ImpliedVolatilitySolver::default();
    for (rate, dividend) in [(0.0, 0.0), (0.05, 0.02)] {
        let m = market(rate, dividend);
        for option_type in [OptionType::Call, OptionType::Put] {
            for strike in [85.0, 100.0, 115.0] {
                for days in [14, 90, 365] {
                    for vol in [0.1, 0.3, 0.8] {
                        let spec = OptionSpec::new(option_type, strike, 100.0, days, 0.0);
                        let price = BlackScholesModel::price(&spec, vol, &m).unwrap();
                        let vega = BlackScholesModel::vega(&spec, vol, &m).unwrap();
                        if vega < 1e-2 {
                            // Too flat for a price tolerance to pin down the vol
                            continue;
                        }

                        let iv = solver.solve(price, &spec, &m).unwrap();
                        let repriced = BlackScholesModel::price(&spec, iv, &m).unwrap();
                        assert!((repriced - price).abs() < 1e-6);
                        assert!(
                            (iv - vol).abs() < 1e-6 / vega * 2.0 + 1e-9,
                            "{option_type:?} K={strike} days={days} vol={vol} iv={iv}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_reference_call_scenario() {
    let m = market(0.0, 0.0);
    let spec = OptionSpec::call(2.9, 2.939, 17, 0.1034);
    let iv = ImpliedVolatilitySolver::default()
        .solve(spec.market_price, &spec, &m)
        .unwrap();
    assert!((iv - 0.328).abs() < 5e-3, "iv={iv}");

    let greeks = BlackScholesModel::greeks(&spec, iv, &m).unwrap();
    assert!(greeks.delta > 0.0 && greeks.delta < 1.0);
}

#[test]
fn test_below_discounted_intrinsic_never_returns_zero() {
    let m = market(0.03, 0.0);
    // Discounted intrinsic: 3.2 - 2.9·e^(-0.03·17/365) ≈ 0.304
    let spec = OptionSpec::call(2.9, 3.2, 17, 0.25);
    let result = ImpliedVolatilitySolver::default().solve(spec.market_price, &spec, &m);
    match result {
        Err(PricingError::OutOfBoundsPrice { price, lower, .. }) => {
            assert_eq!(price, 0.25);
            assert!(lower > 0.3 && lower < 0.31);
        }
        other => panic!("expected OutOfBoundsPrice, got {other:?}"),
    }
}

#[test]
fn test_put_above_discounted_strike_is_out_of_bounds() {
    let m = market(0.05, 0.0);
    let spec = OptionSpec::put(100.0, 90.0, 365, 99.0);
    assert!(matches!(
        ImpliedVolatilitySolver::default().solve(spec.market_price, &spec, &m),
        Err(PricingError::OutOfBoundsPrice { .. })
    ));
}

#[test]
fn test_tight_budget_reports_non_convergence() {
    let m = market(0.0, 0.0);
    let spec = OptionSpec::put(100.0, 100.0, 30, 0.0);
    let price = BlackScholesModel::price(&spec, 0.6, &m).unwrap();
    let solver = ImpliedVolatilitySolver::new(
        SolverConfig::new()
            .with_max_iterations(1)
            .with_initial_guess(0.1),
    );
    match solver.solve(price, &spec, &m) {
        Err(PricingError::NumericalNonConvergence {
            iterations,
            residual,
            ..
        }) => {
            assert_eq!(iterations, 1);
            assert!(residual.abs() > 1e-6);
        }
        other => panic!("expected NumericalNonConvergence, got {other:?}"),
    }
}
