//! Signal timeline CSV export implementing SignalReportPort.
//!
//! One row per prefix: `date,strategy_1,...,strategy_5` with RFC 3339 dates.

use std::io::Write;
use std::path::PathBuf;

use chrono::SecondsFormat;
use tracing::info;

use crate::adapters::csv_adapter::csv_io_error;
use crate::domain::error::SigtraderError;
use crate::domain::strategy::{Strategy, StrategyParams};
use crate::domain::timeline::SignalTimeline;
use crate::ports::report_port::SignalReportPort;

pub struct CsvReportAdapter {
    output_path: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

/// Writes the header and every timeline row to `writer`.
pub fn write_timeline<W: Write>(timeline: &SignalTimeline, writer: W) -> Result<(), SigtraderError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string()];
    header.extend(
        Strategy::ALL
            .iter()
            .map(|s| format!("strategy_{}", s.number())),
    );
    wtr.write_record(&header).map_err(csv_io_error)?;

    for row in timeline {
        let date = row.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut record = Vec::with_capacity(header.len());
        record.push(date.as_str());
        record.extend(row.signals.iter().map(|s| s.as_str()));
        wtr.write_record(&record).map_err(csv_io_error)?;
    }

    wtr.flush()?;
    Ok(())
}

impl SignalReportPort for CsvReportAdapter {
    fn write(
        &self,
        timeline: &SignalTimeline,
        _params: &StrategyParams,
        symbol: &str,
    ) -> Result<(), SigtraderError> {
        let file = std::fs::File::create(&self.output_path)?;
        write_timeline(timeline, std::io::BufWriter::new(file))?;
        info!(
            symbol,
            rows = timeline.len(),
            "signal timeline written to {}",
            self.output_path.display()
        );
        Ok(())
    }
}
