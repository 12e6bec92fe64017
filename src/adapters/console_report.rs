//! Plain-text summary of the most recent signal row.

use std::io::Write;

use chrono::SecondsFormat;

use crate::domain::error::SigtraderError;
use crate::domain::strategy::{Strategy, StrategyParams};
use crate::domain::timeline::SignalTimeline;
use crate::ports::report_port::SignalReportPort;

/// Prints to stdout.
pub struct ConsoleReport;

pub fn render(timeline: &SignalTimeline, symbol: &str) -> Result<String, SigtraderError> {
    let latest = timeline.latest().ok_or(SigtraderError::EmptySeries)?;

    let mut out = format!(
        "{symbol} as of {}\nMost recent signals:\n",
        latest.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    for strategy in Strategy::ALL {
        out.push_str(&format!(
            "{:<14}{}\n",
            strategy.label(),
            latest.signal(strategy)
        ));
    }
    Ok(out)
}

impl SignalReportPort for ConsoleReport {
    fn write(
        &self,
        timeline: &SignalTimeline,
        _params: &StrategyParams,
        symbol: &str,
    ) -> Result<(), SigtraderError> {
        let text = render(timeline, symbol)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
