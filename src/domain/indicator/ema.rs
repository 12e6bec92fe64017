//! Exponentially weighted moving average.
//!
//! alpha = 2/(span+1), applied over the whole series from its first element.
//! Weights are normalised (adjusted form):
//!
//!   EWM[t] = sum((1-alpha)^i * C[t-i]) / sum((1-alpha)^i),  i = 0..=t
//!
//! computed recursively as num[t] = C[t] + (1-alpha)*num[t-1] and
//! den[t] = 1 + (1-alpha)*den[t-1]. There is no warmup: EWM[0] = C[0].

use crate::domain::indicator::INSUFFICIENT_DATA;

/// Running state of the adjusted EWM recursion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EwmState {
    span: usize,
    decay: f64,
    numerator: f64,
    denominator: f64,
}

impl EwmState {
    pub fn new(span: usize) -> Self {
        let alpha = 2.0 / (span as f64 + 1.0);
        Self {
            span,
            decay: 1.0 - alpha,
            numerator: 0.0,
            denominator: 0.0,
        }
    }

    pub fn update(&mut self, value: f64) -> f64 {
        self.numerator = value + self.decay * self.numerator;
        self.denominator = 1.0 + self.decay * self.denominator;
        self.value()
    }

    /// Current average; NaN before the first update or for a zero span.
    pub fn value(&self) -> f64 {
        if self.span == 0 || self.denominator == 0.0 {
            INSUFFICIENT_DATA
        } else {
            self.numerator / self.denominator
        }
    }
}

/// EWM as of the last element of `series`.
pub fn ewm_mean(series: &[f64], span: usize) -> f64 {
    let mut state = EwmState::new(span);
    for &value in series {
        state.update(value);
    }
    state.value()
}
