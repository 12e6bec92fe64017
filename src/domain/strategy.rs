//! The five signal strategies.
//!
//! Each strategy reads the closes of a prefix and returns one [`Signal`].
//! Indicators are handed the whole prefix; windowed ones only use their
//! trailing window. Nothing here holds state between calls.
//!
//! | #  | Buy                      | Sell                     |
//! |----|--------------------------|--------------------------|
//! | 1  | close > SMA(50)          | close < SMA(50)          |
//! | 2  | close > SMA(200)         | close < SMA(200)         |
//! | 3  | close > EWM(12)-EWM(26)  | close < EWM(12)-EWM(26)  |
//! | 4  | RSI(14) > 30             | RSI(14) < 70             |
//! | 5  | close > upper band       | close < lower band       |
//!
//! Strategy 4's bounds overlap: any RSI above 30 is a Buy because the Buy
//! check runs first, so Sell only fires below 30 and Hold only when RSI is
//! exactly 30 or undefined. This is a known quirk of the rule and is
//! preserved.

use crate::domain::indicator::{bollinger, ewm_mean, rolling_mean, rsi, IndicatorType};
use crate::domain::signal::Signal;

/// Windows and thresholds for the five strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub sma_fast_window: usize,
    pub sma_slow_window: usize,
    pub ewm_fast_span: usize,
    pub ewm_slow_span: usize,
    pub rsi_window: usize,
    pub rsi_buy_threshold: f64,
    pub rsi_sell_threshold: f64,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            sma_fast_window: 50,
            sma_slow_window: 200,
            ewm_fast_span: 12,
            ewm_slow_span: 26,
            rsi_window: 14,
            rsi_buy_threshold: 30.0,
            rsi_sell_threshold: 70.0,
            bollinger_window: 20,
            bollinger_k: 2.0,
        }
    }
}

impl StrategyParams {
    /// Longest trailing window any windowed strategy reads.
    pub fn max_window(&self) -> usize {
        self.sma_fast_window
            .max(self.sma_slow_window)
            .max(self.rsi_window)
            .max(self.bollinger_window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    FastSma,
    SlowSma,
    EwmSpread,
    RsiThreshold,
    BollingerBreakout,
}

pub const STRATEGY_COUNT: usize = 5;

impl Strategy {
    pub const ALL: [Strategy; STRATEGY_COUNT] = [
        Strategy::FastSma,
        Strategy::SlowSma,
        Strategy::EwmSpread,
        Strategy::RsiThreshold,
        Strategy::BollingerBreakout,
    ];

    /// 1-based position of the strategy in a signal row.
    pub fn number(&self) -> usize {
        match self {
            Strategy::FastSma => 1,
            Strategy::SlowSma => 2,
            Strategy::EwmSpread => 3,
            Strategy::RsiThreshold => 4,
            Strategy::BollingerBreakout => 5,
        }
    }

    pub fn label(&self) -> String {
        format!("Strategy {}", self.number())
    }

    pub fn indicator(&self, params: &StrategyParams) -> IndicatorType {
        match self {
            Strategy::FastSma => IndicatorType::Sma(params.sma_fast_window),
            Strategy::SlowSma => IndicatorType::Sma(params.sma_slow_window),
            Strategy::EwmSpread => IndicatorType::MacdLike {
                fast: params.ewm_fast_span,
                slow: params.ewm_slow_span,
            },
            Strategy::RsiThreshold => IndicatorType::Rsi(params.rsi_window),
            Strategy::BollingerBreakout => IndicatorType::Bollinger {
                period: params.bollinger_window,
                k: params.bollinger_k,
            },
        }
    }

    /// Signal as of the last close in `closes`. An empty prefix is Hold.
    pub fn evaluate(&self, params: &StrategyParams, closes: &[f64]) -> Signal {
        let Some(&close) = closes.last() else {
            return Signal::Hold;
        };

        match self {
            Strategy::FastSma => Signal::compare(close, rolling_mean(closes, params.sma_fast_window)),
            Strategy::SlowSma => Signal::compare(close, rolling_mean(closes, params.sma_slow_window)),
            Strategy::EwmSpread => ewm_spread_signal(
                close,
                ewm_mean(closes, params.ewm_fast_span),
                ewm_mean(closes, params.ewm_slow_span),
            ),
            Strategy::RsiThreshold => rsi_signal(params, rsi(closes, params.rsi_window)),
            Strategy::BollingerBreakout => {
                let bands = bollinger(closes, params.bollinger_window, params.bollinger_k);
                Signal::from_bounds(close, bands.upper, bands.lower)
            }
        }
    }
}

/// Signals of all five strategies, in row order.
pub fn evaluate_all(params: &StrategyParams, closes: &[f64]) -> [Signal; STRATEGY_COUNT] {
    Strategy::ALL.map(|strategy| strategy.evaluate(params, closes))
}

pub(crate) fn ewm_spread_signal(close: f64, fast_ewm: f64, slow_ewm: f64) -> Signal {
    Signal::compare(close, fast_ewm - slow_ewm)
}

pub(crate) fn rsi_signal(params: &StrategyParams, rsi_value: f64) -> Signal {
    Signal::from_bounds(rsi_value, params.rsi_buy_threshold, params.rsi_sell_threshold)
}
