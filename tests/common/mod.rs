#![allow(dead_code)]

use sigtrader::domain::candle::{timestamp_from_millis, Candle};
use sigtrader::domain::error::SigtraderError;
use sigtrader::domain::price_series::PriceSeries;
use sigtrader::ports::data_port::CandleSource;
use std::cell::RefCell;
use std::collections::HashMap;

pub const START_MS: i64 = 1_700_000_000_000;
pub const HOUR_MS: i64 = 3_600_000;

pub struct MockCandleSource {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, String, usize)>>,
}

impl MockCandleSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl CandleSource for MockCandleSource {
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError> {
        self.requests
            .borrow_mut()
            .push((symbol.to_string(), interval.to_string(), limit));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SigtraderError::Fetch {
                reason: reason.clone(),
            });
        }
        let candles = self.data.get(symbol).cloned().unwrap_or_default();
        let skip = candles.len().saturating_sub(limit);
        Ok(candles.into_iter().skip(skip).collect())
    }
}

/// Hourly candle `index` hours after [`START_MS`], flat at `close`.
pub fn make_candle(index: usize, close: f64) -> Candle {
    let open_ms = START_MS + index as i64 * HOUR_MS;
    Candle {
        open_time: timestamp_from_millis(open_ms).unwrap(),
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume: 1000.0,
        close_time: timestamp_from_millis(open_ms + HOUR_MS - 1).unwrap(),
        quote_asset_volume: 1000.0 * close,
        number_of_trades: 10,
        taker_buy_base_volume: 500.0,
        taker_buy_quote_volume: 500.0 * close,
    }
}

pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_candle(i, close))
        .collect()
}

pub fn make_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(make_candles(closes)).unwrap()
}

/// Deterministic zig-zag walk around 100.
pub fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            100.0 + 10.0 * (t / 7.0).sin() + 3.0 * (t / 2.3).cos() + 0.05 * t
        })
        .collect()
}
