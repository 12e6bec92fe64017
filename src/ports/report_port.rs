//! Signal report port trait.

use crate::domain::error::SigtraderError;
use crate::domain::strategy::StrategyParams;
use crate::domain::timeline::SignalTimeline;

/// Port for presenting or exporting a signal timeline.
pub trait SignalReportPort {
    fn write(
        &self,
        timeline: &SignalTimeline,
        params: &StrategyParams,
        symbol: &str,
    ) -> Result<(), SigtraderError>;
}
