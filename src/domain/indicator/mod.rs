//! Technical indicator functions over closing-price sequences.
//!
//! Every function is pure: it takes the full prefix it is asked about and
//! returns the indicator value as of the last element. Windowed indicators
//! only look at their trailing window internally.
//!
//! Insufficient history is reported as `f64::NAN`. Ordered comparisons
//! against NaN are always false, so a strategy comparing against an
//! unavailable indicator falls through to Hold.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::{ewm_mean, EwmState};
pub use rsi::rsi;
pub use sma::rolling_mean;
pub use stddev::rolling_std;

use std::fmt;

/// Sentinel returned when a window is longer than the available history.
pub const INSUFFICIENT_DATA: f64 = f64::NAN;

/// Indicator identity plus parameters, used for labels and logging.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorType {
    Sma(usize),
    Ewm(usize),
    MacdLike { fast: usize, slow: usize },
    Rsi(usize),
    Stddev(usize),
    Bollinger { period: usize, k: f64 },
}

impl IndicatorType {
    /// Number of closes needed before the indicator stops returning the sentinel.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(period)
            | IndicatorType::Rsi(period)
            | IndicatorType::Stddev(period) => *period,
            IndicatorType::Bollinger { period, .. } => *period,
            IndicatorType::Ewm(_) | IndicatorType::MacdLike { .. } => 1,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ewm(span) => write!(f, "EWM({})", span),
            IndicatorType::MacdLike { fast, slow } => write!(f, "EWM({}) - EWM({})", fast, slow),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Bollinger { period, k } => write!(f, "BOLLINGER({},{})", period, k),
        }
    }
}
