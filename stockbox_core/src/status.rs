//! What one station tick did.

use stockbox_traits::ReportEvent;

use crate::error::StationError;
use crate::selector::SelectorEvent;
use crate::tracker::TrackerEvent;

#[derive(Debug, Default)]
pub struct TickOutcome {
    /// 1-based tick counter.
    pub tick: u64,
    /// Sensor was not ready (or failed); nothing else ran.
    pub skipped: bool,
    /// Magnitude of the sample processed this tick.
    pub weight: Option<f32>,
    pub selection: Option<SelectorEvent>,
    pub presence: Option<TrackerEvent>,
    /// Set only on the tick a stabilized weight was handed to the dispatcher.
    pub dispatch: Option<Result<ReportEvent, StationError>>,
}

impl TickOutcome {
    pub fn reported(&self) -> Option<&ReportEvent> {
        self.dispatch.as_ref().and_then(|r| r.as_ref().ok())
    }
}
