//! Direct discrete Fourier transform

use num_complex::Complex64;
use std::f64::consts::TAU;

/// `X[k] = Σ x[n]·e^{-i2πkn/N}` by direct O(N²) summation
pub fn dft(signal: &[f64]) -> Vec<Complex64> {
    let n = signal.len();
    (0..n)
        .map(|k| {
            signal
                .iter()
                .enumerate()
                .map(|(j, &x)| {
                    let phi = TAU * (k * j) as f64 / n as f64;
                    Complex64::from_polar(x, -phi)
                })
                .sum()
        })
        .collect()
}

/// Magnitude `|X[k]|` per bin
pub fn magnitudes(signal: &[f64]) -> Vec<f64> {
    dft(signal).into_iter().map(|c| c.norm()).collect()
}
