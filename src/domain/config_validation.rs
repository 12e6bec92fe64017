//! Configuration validation.
//!
//! Validates all config fields before candles are fetched. Every key is
//! optional; a key that is present must parse and be in range.

use crate::domain::error::SigtraderError;
use crate::domain::market::{is_valid_interval, VALID_INTERVALS};
use crate::ports::config_port::ConfigPort;

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    validate_non_empty(config, "market", "symbol")?;
    validate_interval(config)?;
    validate_min_int(config, "market", "limit", 1)?;
    validate_non_empty(config, "market", "base_url")?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    for key in [
        "sma_fast_window",
        "sma_slow_window",
        "ewm_fast_span",
        "ewm_slow_span",
        "rsi_window",
        "bollinger_window",
    ] {
        validate_min_int(config, "strategy", key, 1)?;
    }
    validate_rsi_threshold(config, "rsi_buy_threshold")?;
    validate_rsi_threshold(config, "rsi_sell_threshold")?;
    validate_bollinger_k(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SigtraderError {
    SigtraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), SigtraderError> {
    match config.get_string(section, key) {
        Some(s) if s.trim().is_empty() => Err(invalid(section, key, format!("{key} must not be empty"))),
        _ => Ok(()),
    }
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    match config.get_string("market", "interval") {
        Some(s) if !is_valid_interval(s.trim()) => Err(invalid(
            "market",
            "interval",
            format!("interval must be one of {}", VALID_INTERVALS.join(", ")),
        )),
        _ => Ok(()),
    }
}

fn validate_min_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    minimum: i64,
) -> Result<(), SigtraderError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, format!("{key} must be an integer")))?;
    if value < minimum {
        return Err(invalid(section, key, format!("{key} must be at least {minimum}")));
    }
    Ok(())
}

fn parse_double(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, SigtraderError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| invalid(section, key, format!("{key} must be a number")))
}

fn validate_rsi_threshold(config: &dyn ConfigPort, key: &str) -> Result<(), SigtraderError> {
    match parse_double(config, "strategy", key)? {
        Some(v) if !(0.0..=100.0).contains(&v) => {
            Err(invalid("strategy", key, format!("{key} must be between 0 and 100")))
        }
        _ => Ok(()),
    }
}

fn validate_bollinger_k(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    match parse_double(config, "strategy", "bollinger_k")? {
        Some(v) if !v.is_finite() || v < 0.0 => Err(invalid(
            "strategy",
            "bollinger_k",
            "bollinger_k must be a non-negative number",
        )),
        _ => Ok(()),
    }
}
