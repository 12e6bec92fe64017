//! Buy/Sell/Hold signal.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Buy when `value > reference`, Sell when `value < reference`, else Hold.
    ///
    /// A NaN on either side fails both comparisons and yields Hold.
    pub fn compare(value: f64, reference: f64) -> Self {
        Self::from_bounds(value, reference, reference)
    }

    /// Buy when `value > buy_above`, otherwise Sell when `value < sell_below`,
    /// otherwise Hold. The Buy check always runs first, so overlapping bounds
    /// resolve to Buy.
    pub fn from_bounds(value: f64, buy_above: f64, sell_below: f64) -> Self {
        if value > buy_above {
            Signal::Buy
        } else if value < sell_below {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_strict_inequalities() {
        assert_eq!(Signal::compare(2.0, 1.0), Signal::Buy);
        assert_eq!(Signal::compare(1.0, 2.0), Signal::Sell);
        assert_eq!(Signal::compare(1.0, 1.0), Signal::Hold);
    }

    #[test]
    fn compare_against_nan_is_hold() {
        assert_eq!(Signal::compare(1.0, f64::NAN), Signal::Hold);
        assert_eq!(Signal::compare(f64::NAN, 1.0), Signal::Hold);
    }

    #[test]
    fn overlapping_bounds_prefer_buy() {
        assert_eq!(Signal::from_bounds(50.0, 30.0, 70.0), Signal::Buy);
        assert_eq!(Signal::from_bounds(20.0, 30.0, 70.0), Signal::Sell);
        assert_eq!(Signal::from_bounds(30.0, 30.0, 30.0), Signal::Hold);
    }

    #[test]
    fn display_names() {
        assert_eq!(Signal::Buy.to_string(), "Buy");
        assert_eq!(Signal::Sell.to_string(), "Sell");
        assert_eq!(Signal::Hold.to_string(), "Hold");
    }
}
