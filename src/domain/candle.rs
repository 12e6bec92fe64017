//! OHLCV candle representation.

use chrono::{DateTime, Utc};

use crate::domain::error::SigtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: DateTime<Utc>,
    pub quote_asset_volume: f64,
    pub number_of_trades: u64,
    pub taker_buy_base_volume: f64,
    pub taker_buy_quote_volume: f64,
}

impl Candle {
    /// Open time as a millisecond epoch.
    pub fn open_time_ms(&self) -> i64 {
        self.open_time.timestamp_millis()
    }

    pub fn close_time_ms(&self) -> i64 {
        self.close_time.timestamp_millis()
    }
}

/// Converts a millisecond epoch into a UTC timestamp.
pub fn timestamp_from_millis(ms: i64) -> Result<DateTime<Utc>, SigtraderError> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| SigtraderError::Decode {
        reason: format!("timestamp {ms} is out of range"),
    })
}
