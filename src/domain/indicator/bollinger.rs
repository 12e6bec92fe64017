//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: rolling mean over n periods
//! - Upper: Middle + (k × StdDev)
//! - Lower: Middle - (k × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, k=2.0
//! All three bands are NaN until `period` closes are available.

use crate::domain::indicator::sma::{trailing_window, window_mean};
use crate::domain::indicator::stddev::window_std;
use crate::domain::indicator::INSUFFICIENT_DATA;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    const UNAVAILABLE: Self = Self {
        upper: INSUFFICIENT_DATA,
        middle: INSUFFICIENT_DATA,
        lower: INSUFFICIENT_DATA,
    };
}

pub fn bollinger(series: &[f64], period: usize, k: f64) -> BollingerBands {
    let Some(window) = trailing_window(series, period) else {
        return BollingerBands::UNAVAILABLE;
    };

    let middle = window_mean(window);
    let stddev = window_std(window);
    BollingerBands {
        upper: middle + k * stddev,
        middle,
        lower: middle - k * stddev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_warmup() {
        let closes = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert!(bollinger(&closes[..2], 3, 2.0).middle.is_nan());
        assert!(!bollinger(&closes[..3], 3, 2.0).middle.is_nan());
        assert!(!bollinger(&closes, 3, 2.0).middle.is_nan());
    }

    #[test]
    fn bollinger_unavailable_bands_are_nan() {
        let bands = bollinger(&[1.0], 20, 2.0);
        assert!(bands.upper.is_nan());
        assert!(bands.middle.is_nan());
        assert!(bands.lower.is_nan());
    }

    #[test]
    fn bollinger_constant_values() {
        let bands = bollinger(&[100.0, 100.0, 100.0, 100.0, 100.0], 3, 2.0);
        assert!((bands.middle - 100.0).abs() < f64::EPSILON);
        assert!((bands.upper - 100.0).abs() < f64::EPSILON);
        assert!((bands.lower - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let bands = bollinger(&[10.0, 20.0, 30.0], 3, 2.0);

        let expected_middle: f64 = (10.0 + 20.0 + 30.0) / 3.0;
        let variance: f64 = ((10.0 - expected_middle).powi(2)
            + (20.0 - expected_middle).powi(2)
            + (30.0 - expected_middle).powi(2))
            / 3.0;
        let stddev = variance.sqrt();

        assert!((bands.middle - expected_middle).abs() < 1e-10);
        assert!((bands.upper - (expected_middle + 2.0 * stddev)).abs() < 1e-10);
        assert!((bands.lower - (expected_middle - 2.0 * stddev)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_multiplier_variations() {
        let bands = bollinger(&[10.0, 20.0, 30.0], 3, 1.0);
        let stddev = (200.0_f64 / 3.0).sqrt();

        assert!((bands.middle - 20.0).abs() < 1e-10);
        assert!((bands.upper - (20.0 + stddev)).abs() < 1e-10);
        assert!((bands.lower - (20.0 - stddev)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_symmetry() {
        let bands = bollinger(&[10.0, 20.0, 30.0], 3, 2.0);
        let upper_dist = bands.upper - bands.middle;
        let lower_dist = bands.middle - bands.lower;
        assert!((upper_dist - lower_dist).abs() < 1e-10);
    }
}
