//! Fixed-cadence main loop.
//!
//! Every iteration runs one tick and then sleeps for the configured period,
//! whatever the tick did. Blocking I/O inside a tick lengthens that
//! iteration; it is logged but not compensated.

use std::time::Duration;

use crate::selector::SelectorEvent;
use crate::station::Station;
use crate::status::TickOutcome;

/// Totals over one `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub skipped: u64,
    pub placements: u64,
    pub reports: u64,
    pub failed_reports: u64,
    pub confirmations: u64,
}

impl RunSummary {
    fn record(&mut self, out: &TickOutcome) {
        self.ticks += 1;
        if out.skipped {
            self.skipped += 1;
        }
        if matches!(out.presence, Some(crate::tracker::TrackerEvent::Placed { .. })) {
            self.placements += 1;
        }
        if matches!(out.selection, Some(SelectorEvent::Confirmed { .. })) {
            self.confirmations += 1;
        }
        match &out.dispatch {
            Some(Ok(_)) => self.reports += 1,
            Some(Err(_)) => self.failed_reports += 1,
            None => {}
        }
    }
}

/// Why `run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Requested,
    TickLimit,
}

/// Tick `station` until `should_stop` returns true or `max_ticks` ticks
/// have run. `on_tick` sees every outcome.
pub fn run<S, F>(
    station: &mut Station,
    max_ticks: Option<u64>,
    mut should_stop: S,
    mut on_tick: F,
) -> (RunSummary, StopReason)
where
    S: FnMut() -> bool,
    F: FnMut(&TickOutcome),
{
    let clock = station.clock();
    let period = Duration::from_millis(station.sampling().tick_ms);
    let mut summary = RunSummary::default();

    tracing::info!(tick_ms = station.sampling().tick_ms, ?max_ticks, "station loop started");
    let reason = loop {
        if should_stop() {
            break StopReason::Requested;
        }
        if max_ticks.is_some_and(|m| summary.ticks >= m) {
            break StopReason::TickLimit;
        }

        let started = clock.now();
        let out = station.tick();
        summary.record(&out);
        on_tick(&out);

        let spent = clock.ms_since(started);
        if spent > station.sampling().tick_ms {
            tracing::debug!(tick = out.tick, spent_ms = spent, "tick overran its period");
        }
        clock.sleep(period);
    };
    tracing::info!(?reason, ?summary, "station loop stopped");
    (summary, reason)
}
