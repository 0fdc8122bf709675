//! Moving-average smoothing example.
//!
//! This example demonstrates:
//! 1. Building a growable and a fixed-capacity signal
//! 2. Convolving in each boundary mode
//! 3. Correlating against a complex template
//! 4. Inspecting the spectrum before and after smoothing

use lib_dsp::{convolve, correlate, DynamicSignal, FixedSignal, OverlapMode, Vandermonde};
use lib_sample::Complex64;
use std::f64::consts::PI;

fn main() -> anyhow::Result<()> {
    println!("=== Overlap Moving Average Example ===\n");

    let n = 32;
    let rate = 32;
    let noisy = |i: usize| {
        let t = i as f64 / rate as f64;
        (2.0 * PI * 2.0 * t).sin() + 0.3 * (2.0 * PI * 12.0 * t).sin()
    };
    let taps = [0.25; 4];

    for mode in [OverlapMode::Full, OverlapMode::Valid, OverlapMode::Same] {
        let mut signal = DynamicSignal::from_fn(noisy, n, rate)?;
        let range = convolve(&mut signal, &taps, mode)?;
        println!("{:>5}: {} outputs at {:?}", mode, range.len(), range);
    }

    // Fixed storage only admits the in-place mode.
    let mut fixed = FixedSignal::<f64, 32>::from_fn(noisy, n, rate)?;
    println!("\n{}", fixed);
    match convolve(&mut fixed, &taps, OverlapMode::Full) {
        Ok(_) => println!("  full convolution succeeded"),
        Err(e) => println!("  full convolution refused: {}", e),
    }
    let range = convolve(&mut fixed, &taps, OverlapMode::Valid)?;
    println!("  valid convolution: {} outputs", range.len());

    // Spectrum of the raw and smoothed signal, same length for both.
    let raw = DynamicSignal::from_fn(noisy, n, rate)?;
    let mut padded = raw.clone();
    let range = convolve(&mut padded, &taps, OverlapMode::Same)?;
    let smoothed = DynamicSignal::from_slice(&padded.as_slice()[range], n, rate)?;

    let dft = Vandermonde::<f64>::dynamic(n)?;
    let before = dft.apply(&raw)?.magnitudes();
    let after = dft.apply(&smoothed)?.magnitudes();
    println!("\nBin   Freq   Raw       Smoothed");
    for k in [2, 12] {
        println!("{:>3}  {:>5.1}  {:>8.4}  {:>8.4}", k, k as f64, before[k], after[k]);
    }

    // Complex template matching.
    let template: Vec<Complex64> = (0..4)
        .map(|i| Complex64::from_polar(1.0, PI / 2.0 * i as f64))
        .collect();
    let mut stream = DynamicSignal::from_fn(
        |i| Complex64::from_polar(1.0, PI / 2.0 * i as f64),
        16,
        16,
    )?;
    let mut kernel = template.clone();
    let range = correlate(&mut stream, &mut kernel, OverlapMode::Valid)?;
    println!("\nTemplate match magnitudes:");
    for z in &stream.as_slice()[range] {
        print!(" {:.2}", z.norm());
    }
    println!();

    Ok(())
}
