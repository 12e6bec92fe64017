//! Rolling (simple) mean over a trailing window.
//!
//! SMA(n) = sum(C[len-n..len]) / n
//! NaN when fewer than n values are available.

use crate::domain::indicator::INSUFFICIENT_DATA;

/// The last `window` values of `series`, or `None` when there are fewer.
pub fn trailing_window(series: &[f64], window: usize) -> Option<&[f64]> {
    if window == 0 || series.len() < window {
        return None;
    }
    Some(&series[series.len() - window..])
}

/// Sums front to back; the streaming evaluator relies on this order.
pub(crate) fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

pub fn rolling_mean(series: &[f64], window: usize) -> f64 {
    match trailing_window(series, window) {
        Some(values) => window_mean(values),
        None => INSUFFICIENT_DATA,
    }
}
