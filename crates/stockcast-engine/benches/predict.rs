//! Benchmarks for the full prediction path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stockcast_core::types::{PriceBar, PriceSeries};
use stockcast_engine::{FixedRandom, PredictionEngine, PredictionInput};

fn generate_series(size: usize) -> PriceSeries {
    let bars = (0..size)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            PriceBar::new(
                i as i64 * 60_000,
                close,
                close + 1.0,
                close - 1.0,
                close,
                1000 + (i as u64 % 10) * 100,
            )
        })
        .collect();
    PriceSeries::new(bars).expect("generated bars are valid")
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("Predict");
    let engine = PredictionEngine::new();

    for size in [50, 250, 1000].iter() {
        let series = generate_series(*size);
        let input = PredictionInput::new(100.0, 1500, 2e9, 30.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, series| {
            b.iter(|| {
                engine
                    .predict(black_box(&input), black_box(series), &mut FixedRandom::midpoint())
                    .expect("valid input")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_predict);
criterion_main!(benches);
