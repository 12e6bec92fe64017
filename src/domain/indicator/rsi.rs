//! RSI (Relative Strength Index) over simple rolling averages.
//!
//! Price changes are taken per step, with a zero change at the first close.
//! Gains and losses are averaged with a plain trailing mean over n changes
//! (not Wilder's smoothing):
//!
//!   RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! - avg_loss == 0, avg_gain > 0: RSI = 100
//! - avg_loss == 0, avg_gain == 0: undefined (NaN)
//!
//! Available once the series holds at least n closes.

use crate::domain::indicator::INSUFFICIENT_DATA;

pub fn rsi(series: &[f64], window: usize) -> f64 {
    if window == 0 || series.len() < window {
        return INSUFFICIENT_DATA;
    }

    let start = series.len() - window;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for i in start..series.len() {
        let change = if i == 0 {
            0.0
        } else {
            series[i] - series[i - 1]
        };
        gain_sum += if change > 0.0 { change } else { 0.0 };
        loss_sum += if change < 0.0 { -change } else { 0.0 };
    }

    let avg_gain = gain_sum / window as f64;
    let avg_loss = loss_sum / window as f64;
    rsi_from_averages(avg_gain, avg_loss)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 { 100.0 } else { INSUFFICIENT_DATA }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
