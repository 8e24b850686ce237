use greeks_rs::prelude::*;

use super::market;

#[test]
fn test_put_call_parity_grid() {
    for (rate, dividend) in [(0.0, 0.0), (0.05, 0.0), (0.03, 0.02), (-0.01, 0.04)] {
        let m = market(rate, dividend);
        for strike in [80.0, 100.0, 125.0] {
            for days in [1, 30, 365, 730] {
                for vol in [0.05, 0.3, 1.2] {
                    let call = OptionSpec::call(strike, 100.0, days, 0.0);
                    let put = OptionSpec::put(strike, 100.0, days, 0.0);
                    let tau = call.time_to_expiry(&m);

                    let c = BlackScholesModel::price(&call, vol, &m).unwrap();
                    let p = BlackScholesModel::price(&put, vol, &m).unwrap();
                    let forward_gap =
                        100.0 * m.dividend_factor(tau) - strike * m.discount_factor(tau);

                    assert!(
                        (c - p - forward_gap).abs() < 1e-9,
                        "parity failed: r={rate} q={dividend} K={strike} days={days} vol={vol}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_price_is_monotonic_in_volatility() {
    let m = market(0.02, 0.01);
    for spec in [
        OptionSpec::call(95.0, 100.0, 45, 0.0),
        OptionSpec::put(110.0, 100.0, 200, 0.0),
    ] {
        let mut previous = BlackScholesModel::price(&spec, 0.15, &m).unwrap();
        for step in 16..=200 {
            let vol = step as f64 * 0.01;
            let price = BlackScholesModel::price(&spec, vol, &m).unwrap();
            assert!(price > previous, "{spec:?} not increasing at vol {vol}");
            previous = price;
        }
    }
}

#[test]
fn test_small_volatility_tends_to_discounted_intrinsic() {
    let m = market(0.04, 0.0);
    let spec = OptionSpec::put(110.0, 100.0, 180, 0.0);
    let tau = spec.time_to_expiry(&m);
    let discounted_intrinsic = 110.0 * m.discount_factor(tau) - 100.0;

    let mut previous_gap = f64::INFINITY;
    for vol in [0.1, 0.03, 0.01, 1e-3, 1e-5] {
        let gap = BlackScholesModel::price(&spec, vol, &m).unwrap() - discounted_intrinsic;
        assert!(gap >= 0.0);
        assert!(gap <= previous_gap);
        previous_gap = gap;
    }
    assert!(previous_gap < 1e-10);
}

#[test]
fn test_expiry_limits() {
    let m = market(0.05, 0.0);
    let cases = [
        (OptionSpec::call(100.0, 101.0, 0, 0.0), 1.0),
        (OptionSpec::call(100.0, 99.0, 0, 0.0), 0.0),
        (OptionSpec::call(100.0, 100.0, 0, 0.0), 0.0),
        (OptionSpec::put(100.0, 99.0, 0, 0.0), -1.0),
        (OptionSpec::put(100.0, 101.0, 0, 0.0), 0.0),
    ];
    for (spec, expected_delta) in cases {
        let greeks = BlackScholesModel::greeks(&spec, 0.3, &m).unwrap();
        assert_eq!(greeks.delta, expected_delta, "{spec:?}");
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.vega, 0.0);
        assert_eq!(greeks.theta, 0.0);
    }

    // One day out, a deep in-the-money call already has delta near 1
    let near = BlackScholesModel::greeks(&OptionSpec::call(100.0, 110.0, 1, 0.0), 0.3, &m).unwrap();
    assert!(near.delta > 0.999);
}

#[test]
fn test_gamma_and_vega_identical_for_call_and_put() {
    let m = market(0.03, 0.015);
    let call_spec = OptionSpec::call(105.0, 100.0, 60, 0.0);
    let put_spec = OptionSpec::put(105.0, 100.0, 60, 0.0);
    let call = BlackScholesModel::greeks(&call_spec, 0.35, &m).unwrap();
    let put = BlackScholesModel::greeks(&put_spec, 0.35, &m).unwrap();
    assert!((call.gamma - put.gamma).abs() < 1e-14);
    assert!((call.vega - put.vega).abs() < 1e-12);
}
