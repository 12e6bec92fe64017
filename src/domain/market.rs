//! Market selection: which pair, interval and how many candles to load.

pub const DEFAULT_SYMBOL: &str = "XRPUSDT";
pub const DEFAULT_INTERVAL: &str = "1h";
pub const DEFAULT_LIMIT: usize = 1000;
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Kline intervals accepted by the Binance spot API.
pub const VALID_INTERVALS: &[&str] = &[
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w",
    "1M",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub symbol: String,
    pub interval: String,
    pub limit: usize,
    pub base_url: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            limit: DEFAULT_LIMIT,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub fn is_valid_interval(interval: &str) -> bool {
    VALID_INTERVALS.contains(&interval)
}
