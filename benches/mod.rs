use criterion::criterion_main;

mod portfolio_bench;

criterion_main!(pricing_bench::benches, portfolio_bench::benches);
