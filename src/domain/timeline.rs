//! Walk-forward signal timeline.
//!
//! One row per prefix length L = 1..=N, keyed by the open time of candle
//! L-1. [`SignalTimeline::build`] re-evaluates every prefix from scratch,
//! which is O(N²) over the series. [`SignalTimeline::build_streaming`]
//! produces the same rows incrementally.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::price_series::PriceSeries;
use crate::domain::signal::Signal;
use crate::domain::strategy::{evaluate_all, Strategy, StrategyParams, STRATEGY_COUNT};
use crate::domain::streaming::StreamingEvaluator;

#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    pub timestamp: DateTime<Utc>,
    pub signals: [Signal; STRATEGY_COUNT],
}

impl SignalRow {
    pub fn signal(&self, strategy: Strategy) -> Signal {
        self.signals[strategy.number() - 1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalTimeline {
    rows: Vec<SignalRow>,
}

impl SignalTimeline {
    pub fn build(series: &PriceSeries, params: &StrategyParams) -> Self {
        log_indicators(params);
        let rows: Vec<SignalRow> = series
            .prefixes()
            .filter_map(|view| {
                let candle = view.last()?;
                Some(SignalRow {
                    timestamp: candle.open_time,
                    signals: evaluate_all(params, view.closes()),
                })
            })
            .collect();

        debug!(rows = rows.len(), "built signal timeline");
        Self { rows }
    }

    pub fn build_streaming(series: &PriceSeries, params: &StrategyParams) -> Self {
        log_indicators(params);
        let mut evaluator = StreamingEvaluator::new(params.clone());
        let rows: Vec<SignalRow> = series
            .candles()
            .iter()
            .map(|candle| SignalRow {
                timestamp: candle.open_time,
                signals: evaluator.push(candle.close),
            })
            .collect();

        debug!(rows = rows.len(), "built signal timeline (streaming)");
        Self { rows }
    }

    pub fn rows(&self) -> &[SignalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row for the full series: the current recommendation set.
    pub fn latest(&self) -> Option<&SignalRow> {
        self.rows.last()
    }

    pub fn get(&self, timestamp: DateTime<Utc>) -> Option<&SignalRow> {
        self.rows
            .binary_search_by_key(&timestamp, |row| row.timestamp)
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.rows.iter().map(|row| row.timestamp)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignalRow> {
        self.rows.iter()
    }
}

fn log_indicators(params: &StrategyParams) {
    for strategy in Strategy::ALL {
        let indicator = strategy.indicator(params);
        debug!(
            strategy = strategy.number(),
            indicator = %indicator,
            warmup = indicator.warmup(),
            "strategy indicator"
        );
    }
}

impl<'a> IntoIterator for &'a SignalTimeline {
    type Item = &'a SignalRow;
    type IntoIter = std::slice::Iter<'a, SignalRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
