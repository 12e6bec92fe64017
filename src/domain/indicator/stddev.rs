//! Standard Deviation indicator.
//!
//! Population standard deviation over the trailing n closes.
//! STDDEV(n) = sqrt(sum((C[i] - SMA(n))^2 for the last n values) / n)
//! NaN when fewer than n values are available.

use crate::domain::indicator::sma::{trailing_window, window_mean};
use crate::domain::indicator::INSUFFICIENT_DATA;

pub(crate) fn window_std(window: &[f64]) -> f64 {
    let mean = window_mean(window);
    let variance: f64 = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / window.len() as f64;
    variance.sqrt()
}

pub fn rolling_std(series: &[f64], window: usize) -> f64 {
    match trailing_window(series, window) {
        Some(values) => window_std(values),
        None => INSUFFICIENT_DATA,
    }
}
