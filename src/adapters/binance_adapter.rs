//! Binance spot kline adapter.
//!
//! `GET {base_url}/api/v3/klines` returns at most 1000 rows per request,
//! newest last. Larger limits are served by paging backwards with
//! `endTime = earliest open time - 1` until enough candles are collected or
//! the exchange runs out of history.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::candle::{timestamp_from_millis, Candle};
use crate::domain::error::SigtraderError;
use crate::ports::data_port::CandleSource;

pub const MAX_PAGE_LIMIT: usize = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct BinanceAdapter {
    client: Client,
    base_url: String,
}

impl BinanceAdapter {
    pub fn new(base_url: &str) -> Result<Self, SigtraderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SigtraderError::Fetch {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch_page(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
        end_time: Option<i64>,
    ) -> Result<Vec<Candle>, SigtraderError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let mut query = vec![
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(end) = end_time {
            query.push(("endTime", end.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .map_err(|e| SigtraderError::Fetch {
                reason: format!("request to {url} failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| SigtraderError::Fetch {
            reason: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(decode_api_error(&body).unwrap_or_else(|| SigtraderError::Fetch {
                reason: format!("HTTP {status} from {url}"),
            }));
        }

        decode_klines(&body)
    }
}

impl CandleSource for BinanceAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError> {
        info!(symbol, interval, limit, "fetching klines from {}", self.base_url);
        collect_pages(limit, |page_limit, end_time| {
            self.fetch_page(symbol, interval, page_limit, end_time)
        })
    }
}

/// Pages backwards from the newest candle until `limit` candles are gathered.
///
/// `fetch_page(page_limit, end_time)` must return candles oldest first.
pub fn collect_pages<F>(limit: usize, mut fetch_page: F) -> Result<Vec<Candle>, SigtraderError>
where
    F: FnMut(usize, Option<i64>) -> Result<Vec<Candle>, SigtraderError>,
{
    let mut pages: Vec<Vec<Candle>> = Vec::new();
    let mut remaining = limit;
    let mut end_time: Option<i64> = None;

    while remaining > 0 {
        let page_limit = remaining.min(MAX_PAGE_LIMIT);
        let mut page = fetch_page(page_limit, end_time)?;
        debug!(requested = page_limit, received = page.len(), ?end_time, "kline page");

        if page.is_empty() {
            break;
        }
        if page.len() > page_limit {
            warn!(requested = page_limit, received = page.len(), "page larger than requested, trimming");
            page.drain(..page.len() - page_limit);
        }

        let received = page.len();
        end_time = Some(page[0].open_time_ms() - 1);
        remaining -= received;
        pages.push(page);

        if received < page_limit {
            break;
        }
    }

    Ok(pages.into_iter().rev().flatten().collect())
}

/// Decodes a klines response body: an array of 12-element row arrays.
pub fn decode_klines(body: &str) -> Result<Vec<Candle>, SigtraderError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SigtraderError::Decode {
        reason: format!("invalid JSON: {e}"),
    })?;

    let rows = match value {
        Value::Array(rows) => rows,
        other => {
            return Err(decode_api_error(&other.to_string()).unwrap_or_else(|| {
                SigtraderError::Decode {
                    reason: "expected an array of klines".into(),
                }
            }));
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| decode_row(index, row))
        .collect()
}

fn decode_row(index: usize, row: &Value) -> Result<Candle, SigtraderError> {
    let fields = row.as_array().ok_or_else(|| SigtraderError::MalformedCandle {
        index,
        reason: "row is not an array".into(),
    })?;
    if fields.len() < 11 {
        return Err(SigtraderError::MalformedCandle {
            index,
            reason: format!("expected at least 11 fields, got {}", fields.len()),
        });
    }

    let integer = |pos: usize, name: &str| -> Result<i64, SigtraderError> {
        fields[pos]
            .as_i64()
            .ok_or_else(|| SigtraderError::MalformedCandle {
                index,
                reason: format!("{name} is not an integer"),
            })
    };
    let decimal = |pos: usize, name: &str| -> Result<f64, SigtraderError> {
        let parsed = match &fields[pos] {
            Value::String(s) => s.parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        };
        parsed.ok_or_else(|| SigtraderError::MalformedCandle {
            index,
            reason: format!("{name} is not a decimal"),
        })
    };

    let number_of_trades = integer(8, "number_of_trades")?;
    let number_of_trades = u64::try_from(number_of_trades).map_err(|_| SigtraderError::MalformedCandle {
        index,
        reason: "number_of_trades is negative".into(),
    })?;

    Ok(Candle {
        open_time: timestamp_from_millis(integer(0, "open_time")?)?,
        open: decimal(1, "open")?,
        high: decimal(2, "high")?,
        low: decimal(3, "low")?,
        close: decimal(4, "close")?,
        volume: decimal(5, "volume")?,
        close_time: timestamp_from_millis(integer(6, "close_time")?)?,
        quote_asset_volume: decimal(7, "quote_asset_volume")?,
        number_of_trades,
        taker_buy_base_volume: decimal(9, "taker_buy_base_volume")?,
        taker_buy_quote_volume: decimal(10, "taker_buy_quote_volume")?,
    })
}

/// `{"code": -1121, "msg": "Invalid symbol."}`
fn decode_api_error(body: &str) -> Option<SigtraderError> {
    let value: Value = serde_json::from_str(body).ok()?;
    let code = value.get("code")?.as_i64()?;
    let message = value.get("msg")?.as_str()?.to_string();
    Some(SigtraderError::Api { code, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 3_600_000;

    const SAMPLE: &str = r#"[
        [1499040000000, "0.01634790", "0.80000000", "0.01575800", "0.01577100", "148976.11427815",
         1499644799999, "2434.19055334", 308, "1756.87402397", "28.46694368", "0"],
        [1499644800000, "0.01577100", "0.01600000", "0.01500000", "0.01590000", "1000.0",
         1500249599999, "15.9", 12, "400.0", "6.3", "0"]
    ]"#;

    fn candle_at(open_ms: i64) -> Candle {
        Candle {
            open_time: timestamp_from_millis(open_ms).unwrap(),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1.0,
            close_time: timestamp_from_millis(open_ms + HOUR_MS - 1).unwrap(),
            quote_asset_volume: 1.0,
            number_of_trades: 1,
            taker_buy_base_volume: 1.0,
            taker_buy_quote_volume: 1.0,
        }
    }

    /// Simulated exchange holding `total` hourly candles ending at hour `total - 1`.
    fn exchange(total: i64) -> impl FnMut(usize, Option<i64>) -> Result<Vec<Candle>, SigtraderError> {
        move |limit, end_time| {
            let last_hour = match end_time {
                Some(end) => end.div_euclid(HOUR_MS),
                None => total - 1,
            };
            let first_hour = (last_hour - limit as i64 + 1).max(0);
            Ok((first_hour..=last_hour).map(|h| candle_at(h * HOUR_MS)).collect())
        }
    }

    #[test]
    fn decodes_string_decimals_and_integer_times() {
        let candles = decode_klines(SAMPLE).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open_time_ms(), 1_499_040_000_000);
        assert_eq!(candles[0].close_time_ms(), 1_499_644_799_999);
        assert_eq!(candles[0].open, 0.0163479);
        assert_eq!(candles[0].high, 0.8);
        assert_eq!(candles[0].close, 0.015771);
        assert_eq!(candles[0].number_of_trades, 308);
        assert_eq!(candles[1].taker_buy_quote_volume, 6.3);
    }

    #[test]
    fn decodes_empty_array() {
        assert!(decode_klines("[]").unwrap().is_empty());
    }

    #[test]
    fn api_error_object_is_reported() {
        let err = decode_klines(r#"{"code":-1121,"msg":"Invalid symbol."}"#).unwrap_err();
        assert!(matches!(err, SigtraderError::Api { code: -1121, .. }));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let err = decode_klines("<html>").unwrap_err();
        assert!(matches!(err, SigtraderError::Decode { .. }));
    }

    #[test]
    fn short_row_is_malformed() {
        let err = decode_klines(r#"[[1499040000000, "1.0"]]"#).unwrap_err();
        assert!(matches!(err, SigtraderError::MalformedCandle { index: 0, .. }));
    }

    #[test]
    fn unparsable_decimal_is_malformed() {
        let body = r#"[[1, "1", "1", "1", "1", "1", 2, "1", 1, "1", "1", "0"],
                       [3, "x", "1", "1", "1", "1", 4, "1", 1, "1", "1", "0"]]"#;
        let err = decode_klines(body).unwrap_err();
        assert!(matches!(err, SigtraderError::MalformedCandle { index: 1, .. }));
    }

    #[test]
    fn single_page_when_limit_fits() {
        let mut calls = 0;
        let mut inner = exchange(5000);
        let candles = collect_pages(300, |limit, end| {
            calls += 1;
            inner(limit, end)
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(candles.len(), 300);
        assert_eq!(candles.last().unwrap().open_time_ms(), 4999 * HOUR_MS);
    }

    #[test]
    fn pages_backwards_and_stitches_in_order() {
        let candles = collect_pages(2500, exchange(5000)).unwrap();
        assert_eq!(candles.len(), 2500);
        assert_eq!(candles[0].open_time_ms(), 2500 * HOUR_MS);
        assert_eq!(candles.last().unwrap().open_time_ms(), 4999 * HOUR_MS);
        assert!(candles.windows(2).all(|w| w[0].open_time < w[1].open_time));
    }

    #[test]
    fn stops_when_history_runs_out() {
        let candles = collect_pages(10_000, exchange(1500)).unwrap();
        assert_eq!(candles.len(), 1500);
        assert_eq!(candles[0].open_time_ms(), 0);
    }

    #[test]
    fn propagates_page_errors() {
        let result = collect_pages(10, |_, _| {
            Err(SigtraderError::Fetch {
                reason: "connection reset".into(),
            })
        });
        assert!(matches!(result, Err(SigtraderError::Fetch { .. })));
    }
}
