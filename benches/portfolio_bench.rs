use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group};
use greeks_rs::prelude::*;
use std::hint::black_box;

fn positions(count: usize, market: &MarketData) -> Vec<Position> {
    (0..count)
        .filter_map(|i| {
            let strike = 80.0 + (i % 40) as f64;
            let days = 7 + (i % 12) as i64 * 30;
            let spec = if i % 2 == 0 {
                OptionSpec::call(strike, 100.0, days, 0.0)
            } else {
                OptionSpec::put(strike, 100.0, days, 0.0)
            };
            let vol = 0.2 + 0.005 * (i % 20) as f64;
            let price = BlackScholesModel::price(&spec, vol, market).ok()?;
            Some(Position::new(format!("opt{i}"), spec.with_market_price(price)))
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let market = MarketData::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 0.02, 0.0).unwrap();
    let aggregator = PortfolioAggregator::new(&market).with_policy(AggregationPolicy::BestEffort);
    let mut group = c.benchmark_group("portfolio_aggregate");

    for size in [10, 100, 1000] {
        let book = positions(size, &market);
        group.bench_with_input(BenchmarkId::from_parameter(size), &book, |b, book| {
            b.iter(|| aggregator.evaluate(black_box(book)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
