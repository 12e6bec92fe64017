//! Domain error types.

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SigtraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("fetch failed: {reason}")]
    Fetch { reason: String },

    #[error("market data API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("failed to decode candle data: {reason}")]
    Decode { reason: String },

    #[error("no candle data for {symbol} ({interval})")]
    NoData { symbol: String, interval: String },

    #[error("cannot evaluate strategies on an empty candle series")]
    EmptySeries,

    #[error("candle {index} is out of order: open time {open_time_ms} does not follow {previous_ms}")]
    OutOfOrder {
        index: usize,
        open_time_ms: i64,
        previous_ms: i64,
    },

    #[error("malformed candle {index}: {reason}")]
    MalformedCandle { index: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigtraderError> for std::process::ExitCode {
    fn from(err: &SigtraderError) -> Self {
        let code: u8 = match err {
            SigtraderError::Io(_) => 1,
            SigtraderError::ConfigParse { .. }
            | SigtraderError::ConfigMissing { .. }
            | SigtraderError::ConfigInvalid { .. } => 2,
            SigtraderError::Fetch { .. }
            | SigtraderError::Api { .. }
            | SigtraderError::Decode { .. } => 3,
            SigtraderError::NoData { .. }
            | SigtraderError::EmptySeries
            | SigtraderError::OutOfOrder { .. }
            | SigtraderError::MalformedCandle { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
