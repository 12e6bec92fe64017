//! Core domain types and logic.

pub mod candle;
pub mod market;
pub mod price_series;
pub mod indicator;
pub mod signal;
pub mod strategy;
pub mod streaming;
pub mod timeline;
pub mod config_validation;
pub mod error;
