//! CSV file candle adapter.
//!
//! Candles live in `{base_path}/{SYMBOL}_{interval}.csv`, one row per candle
//! with millisecond epoch timestamps, in the column order of the Binance
//! kline payload (minus its unused trailing field).

use crate::domain::candle::{timestamp_from_millis, Candle};
use crate::domain::error::SigtraderError;
use crate::ports::data_port::CandleSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct CandleRecord {
    open_time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    close_time: i64,
    quote_asset_volume: f64,
    number_of_trades: u64,
    taker_buy_base_volume: f64,
    taker_buy_quote_volume: f64,
}

impl CandleRecord {
    fn into_candle(self) -> Result<Candle, SigtraderError> {
        Ok(Candle {
            open_time: timestamp_from_millis(self.open_time)?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            close_time: timestamp_from_millis(self.close_time)?,
            quote_asset_volume: self.quote_asset_volume,
            number_of_trades: self.number_of_trades,
            taker_buy_base_volume: self.taker_buy_base_volume,
            taker_buy_quote_volume: self.taker_buy_quote_volume,
        })
    }
}

impl From<&Candle> for CandleRecord {
    fn from(c: &Candle) -> Self {
        Self {
            open_time: c.open_time_ms(),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
            close_time: c.close_time_ms(),
            quote_asset_volume: c.quote_asset_volume,
            number_of_trades: c.number_of_trades,
            taker_buy_base_volume: c.taker_buy_base_volume,
            taker_buy_quote_volume: c.taker_buy_quote_volume,
        }
    }
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn csv_path(&self, symbol: &str, interval: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, interval))
    }
}

/// Reads every candle in `path`, in file order.
pub fn read_candles(path: &Path) -> Result<Vec<Candle>, SigtraderError> {
    let content = fs::read_to_string(path).map_err(|e| SigtraderError::Fetch {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut candles = Vec::new();

    for (index, result) in rdr.deserialize::<CandleRecord>().enumerate() {
        let record = result.map_err(|e| SigtraderError::MalformedCandle {
            index,
            reason: format!("CSV parse error: {}", e),
        })?;
        candles.push(record.into_candle()?);
    }

    Ok(candles)
}

/// Writes `candles` to `path` with a header row, replacing any existing file.
pub fn write_candles(path: &Path, candles: &[Candle]) -> Result<(), SigtraderError> {
    let mut wtr = csv::Writer::from_path(path).map_err(csv_io_error)?;
    for candle in candles {
        wtr.serialize(CandleRecord::from(candle))
            .map_err(csv_io_error)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn csv_io_error(e: csv::Error) -> SigtraderError {
    SigtraderError::Io(std::io::Error::other(e))
}

impl CandleSource for CsvAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError> {
        let path = self.csv_path(symbol, interval);
        let mut candles = read_candles(&path)?;

        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        debug!(path = %path.display(), candles = candles.len(), "read candles from csv");
        Ok(candles)
    }
}
