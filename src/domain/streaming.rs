//! Incremental walk-forward evaluation.
//!
//! Keeps the last `max_window + 1` closes and the two EWM recursions, so each
//! new close costs O(max_window) instead of re-scanning the whole prefix.
//! Windowed indicators are evaluated on the buffered tail through the same
//! functions as the full-prefix path, and the EWM state runs the same
//! recursion, so every signal is identical to recomputing from scratch.

use std::collections::VecDeque;

use crate::domain::indicator::EwmState;
use crate::domain::signal::Signal;
use crate::domain::strategy::{ewm_spread_signal, Strategy, StrategyParams, STRATEGY_COUNT};

#[derive(Debug, Clone)]
pub struct StreamingEvaluator {
    params: StrategyParams,
    capacity: usize,
    recent: VecDeque<f64>,
    fast_ewm: EwmState,
    slow_ewm: EwmState,
    seen: usize,
}

impl StreamingEvaluator {
    pub fn new(params: StrategyParams) -> Self {
        // RSI needs the close before its window starts.
        let capacity = params.max_window().saturating_add(1);
        Self {
            fast_ewm: EwmState::new(params.ewm_fast_span),
            slow_ewm: EwmState::new(params.ewm_slow_span),
            recent: VecDeque::new(),
            capacity,
            params,
            seen: 0,
        }
    }

    /// Number of closes pushed so far.
    pub fn len(&self) -> usize {
        self.seen
    }

    pub fn is_empty(&self) -> bool {
        self.seen == 0
    }

    /// Appends `close` and returns the signals for the prefix ending at it.
    pub fn push(&mut self, close: f64) -> [Signal; STRATEGY_COUNT] {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(close);
        self.seen += 1;

        let fast = self.fast_ewm.update(close);
        let slow = self.slow_ewm.update(close);
        let params = &self.params;
        let tail: &[f64] = self.recent.make_contiguous();

        Strategy::ALL.map(|strategy| match strategy {
            Strategy::EwmSpread => ewm_spread_signal(close, fast, slow),
            windowed => windowed.evaluate(params, tail),
        })
    }
}
