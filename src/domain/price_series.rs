//! Validated, read-only candle series with prefix views.

use chrono::{DateTime, Utc};

use crate::domain::candle::Candle;
use crate::domain::error::SigtraderError;

/// Candles in strictly increasing `open_time` order.
///
/// The provider's ordering is checked here rather than trusted; the input is
/// never re-sorted.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    candles: Vec<Candle>,
    closes: Vec<f64>,
}

/// Borrowed view over the first `len` candles of a [`PriceSeries`].
#[derive(Debug, Clone, Copy)]
pub struct PriceView<'a> {
    candles: &'a [Candle],
    closes: &'a [f64],
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, SigtraderError> {
        if candles.is_empty() {
            return Err(SigtraderError::EmptySeries);
        }

        for (index, candle) in candles.iter().enumerate() {
            for (name, value) in [
                ("open", candle.open),
                ("high", candle.high),
                ("low", candle.low),
                ("close", candle.close),
                ("volume", candle.volume),
            ] {
                if !value.is_finite() {
                    return Err(SigtraderError::MalformedCandle {
                        index,
                        reason: format!("{name} is not finite"),
                    });
                }
            }

            if index > 0 {
                let previous = &candles[index - 1];
                if candle.open_time <= previous.open_time {
                    return Err(SigtraderError::OutOfOrder {
                        index,
                        open_time_ms: candle.open_time_ms(),
                        previous_ms: previous.open_time_ms(),
                    });
                }
            }
        }

        let closes = candles.iter().map(|c| c.close).collect();
        Ok(Self { candles, closes })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn open_times(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.candles.iter().map(|c| c.open_time)
    }

    /// View over candles `[0..len]`. `len` is clamped to the series length.
    pub fn prefix(&self, len: usize) -> PriceView<'_> {
        let len = len.min(self.candles.len());
        PriceView {
            candles: &self.candles[..len],
            closes: &self.closes[..len],
        }
    }

    /// Prefix views of every length from 1 to N, in order.
    pub fn prefixes(&self) -> impl Iterator<Item = PriceView<'_>> + '_ {
        (1..=self.candles.len()).map(move |len| self.prefix(len))
    }
}

impl<'a> PriceView<'a> {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &'a [Candle] {
        self.candles
    }

    pub fn closes(&self) -> &'a [f64] {
        self.closes
    }

    pub fn last(&self) -> Option<&'a Candle> {
        self.candles.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::timestamp_from_millis;

    const HOUR_MS: i64 = 3_600_000;

    fn make_candle(open_ms: i64, close: f64) -> Candle {
        Candle {
            open_time: timestamp_from_millis(open_ms).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10.0,
            close_time: timestamp_from_millis(open_ms + HOUR_MS - 1).unwrap(),
            quote_asset_volume: 10.0 * close,
            number_of_trades: 5,
            taker_buy_base_volume: 5.0,
            taker_buy_quote_volume: 5.0 * close,
        }
    }

    fn make_series(closes: &[f64]) -> PriceSeries {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| make_candle(i as i64 * HOUR_MS, c))
            .collect();
        PriceSeries::new(candles).unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = PriceSeries::new(vec![]).unwrap_err();
        assert!(matches!(err, SigtraderError::EmptySeries));
    }

    #[test]
    fn duplicate_open_time_is_rejected() {
        let candles = vec![make_candle(0, 1.0), make_candle(HOUR_MS, 2.0), make_candle(HOUR_MS, 3.0)];
        let err = PriceSeries::new(candles).unwrap_err();
        assert!(matches!(err, SigtraderError::OutOfOrder { index: 2, .. }));
    }

    #[test]
    fn descending_open_time_is_rejected() {
        let candles = vec![make_candle(HOUR_MS, 1.0), make_candle(0, 2.0)];
        let err = PriceSeries::new(candles).unwrap_err();
        assert!(matches!(
            err,
            SigtraderError::OutOfOrder {
                index: 1,
                open_time_ms: 0,
                previous_ms: HOUR_MS,
            }
        ));
    }

    #[test]
    fn non_finite_close_is_rejected() {
        let candles = vec![make_candle(0, 1.0), make_candle(HOUR_MS, f64::NAN)];
        let err = PriceSeries::new(candles).unwrap_err();
        assert!(matches!(err, SigtraderError::MalformedCandle { index: 1, .. }));
    }

    #[test]
    fn closes_follow_input_order() {
        let series = make_series(&[3.0, 1.0, 2.0]);
        assert_eq!(series.closes(), &[3.0, 1.0, 2.0]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn prefix_borrows_leading_candles() {
        let series = make_series(&[1.0, 2.0, 3.0, 4.0]);
        let view = series.prefix(2);
        assert_eq!(view.len(), 2);
        assert_eq!(view.closes(), &[1.0, 2.0]);
        assert_eq!(view.last().unwrap().close, 2.0);
        assert!(std::ptr::eq(view.closes().as_ptr(), series.closes().as_ptr()));
    }

    #[test]
    fn prefix_len_is_clamped() {
        let series = make_series(&[1.0, 2.0]);
        assert_eq!(series.prefix(10).len(), 2);
        assert!(series.prefix(0).is_empty());
    }

    #[test]
    fn prefixes_cover_every_length() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let lens: Vec<usize> = series.prefixes().map(|v| v.len()).collect();
        assert_eq!(lens, vec![1, 2, 3]);
    }
}
