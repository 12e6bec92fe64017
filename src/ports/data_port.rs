//! Candle data access port trait.

use crate::domain::candle::Candle;
use crate::domain::error::SigtraderError;

pub trait CandleSource {
    /// Up to `limit` most recent candles, oldest first.
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError>;
}
