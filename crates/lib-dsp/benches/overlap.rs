//! Overlap engine performance benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lib_dsp::overlap::{convolve, correlate, OverlapMode};
use lib_dsp::signal::{DynamicSignal, FixedSignal};
use num_complex::Complex64;

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");

    // Different signal lengths
    for signal_len in [1024, 4096, 16384].iter() {
        let samples: Vec<f64> = (0..*signal_len).map(|i| (i as f64 * 0.01).sin()).collect();
        let taps: Vec<f64> = (0..64).map(|i| (-i as f64 * 0.1).exp()).collect();

        for mode in [OverlapMode::Valid, OverlapMode::Full] {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), signal_len),
                &(&samples, &taps),
                |b, (s, t)| {
                    b.iter(|| {
                        let mut sig = DynamicSignal::from_slice(s, s.len(), 1).unwrap();
                        convolve(&mut sig, black_box(t.as_slice()), mode).unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_fixed_valid(c: &mut Criterion) {
    const LEN: usize = 4096;
    let taps: Vec<f32> = (0..64).map(|i| 1.0 / (i as f32 + 1.0)).collect();

    c.bench_function("convolve/fixed_valid/4096", |b| {
        b.iter(|| {
            let mut sig = FixedSignal::<f32, LEN>::from_fn(|i| (i % 17) as f32, LEN, 1).unwrap();
            convolve(&mut sig, black_box(taps.as_slice()), OverlapMode::Valid).unwrap()
        });
    });
}

fn bench_complex_correlation(c: &mut Criterion) {
    let samples: Vec<Complex64> = (0..4096)
        .map(|i| Complex64::from_polar(1.0, i as f64 * 0.05))
        .collect();
    let taps: Vec<Complex64> = (0..32)
        .map(|i| Complex64::from_polar(1.0, -(i as f64) * 0.05))
        .collect();

    c.bench_function("correlate/complex_same/4096", |b| {
        b.iter(|| {
            let mut sig = DynamicSignal::from_slice(&samples, samples.len(), 1).unwrap();
            let mut taps = taps.clone();
            correlate(&mut sig, black_box(taps.as_mut_slice()), OverlapMode::Same).unwrap()
        });
    });
}

criterion_group!(benches, bench_convolution, bench_fixed_valid, bench_complex_correlation);
criterion_main!(benches);
