//! Station assembly from config and the trace-driven run loop.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::json;
use stockbox_config::Config;
use stockbox_core::{RunSummary, SelectorEvent, Station, TickOutcome, TrackerEvent};
use stockbox_hardware::{
    ConsoleDisplay, FileCatalogSource, HttpCatalogSource, HttpReportSink, JsonLinesSink,
    SystemWallClock, TracePlayer, TraceStep,
};
use stockbox_traits::clock::{Clock, ManualClock, MonotonicClock};
use stockbox_traits::{CatalogSource, ReportSink};

/// How the loop is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Real monotonic clock; the tick delay actually sleeps.
    RealTime,
    /// Simulated clock advanced by the tick delay; runs at full speed.
    Simulated,
}

pub fn report_sink(cfg: &Config) -> eyre::Result<Box<dyn ReportSink>> {
    match cfg.report.url.as_deref() {
        Some(url) => Ok(Box::new(HttpReportSink::new(
            url,
            cfg.report.zone.clone(),
            Duration::from_millis(cfg.report.timeout_ms),
        )?)),
        None => Ok(Box::new(JsonLinesSink::new(
            std::io::stdout(),
            cfg.report.zone.clone(),
        ))),
    }
}

/// Remote catalog when `catalog.url` is set, else the local file, else none.
pub fn catalog_source(cfg: &Config) -> eyre::Result<Option<Box<dyn CatalogSource>>> {
    if let Some(url) = cfg.catalog.url.as_deref() {
        let src = HttpCatalogSource::new(url, Duration::from_millis(cfg.catalog.timeout_ms))?;
        return Ok(Some(Box::new(src)));
    }
    Ok(cfg
        .catalog
        .file
        .as_deref()
        .map(|f| Box::new(FileCatalogSource::new(f)) as Box<dyn CatalogSource>))
}

pub fn build_station(
    cfg: &Config,
    player: &TracePlayer,
    clock: Arc<dyn Clock + Send + Sync>,
) -> eyre::Result<Station> {
    let mut builder = Station::builder()
        .apply_config(cfg)
        .with_sensor(player.sensor())
        .with_control(player.control())
        .with_display(ConsoleDisplay::new())
        .with_boxed_sink(report_sink(cfg)?)
        .with_wall_clock(SystemWallClock::new(cfg.clock.utc_offset_secs)?)
        .with_clock(clock);
    if let Some(src) = catalog_source(cfg)? {
        builder = builder.with_boxed_catalog_source(src);
    }
    builder.build()
}

/// One JSON object per noteworthy tick event.
pub fn event_lines(out: &TickOutcome) -> Vec<serde_json::Value> {
    let tick = out.tick;
    let mut lines = Vec::new();
    match out.selection {
        Some(SelectorEvent::Candidate { index }) => {
            lines.push(json!({ "tick": tick, "event": "candidate", "index": index }));
        }
        Some(SelectorEvent::Confirmed { index }) => {
            lines.push(json!({ "tick": tick, "event": "selected", "index": index }));
        }
        None => {}
    }
    match out.presence {
        Some(TrackerEvent::Placed { weight }) => {
            lines.push(json!({ "tick": tick, "event": "placed", "weight": weight }));
        }
        Some(TrackerEvent::Removed) => {
            lines.push(json!({ "tick": tick, "event": "removed" }));
        }
        Some(TrackerEvent::ReportReady { weight }) => match &out.dispatch {
            Some(Ok(ev)) => lines.push(json!({
                "tick": tick,
                "event": "reported",
                "weight": weight,
                "product": ev.product_designation,
                "timestamp": ev.timestamp,
            })),
            Some(Err(e)) => lines.push(json!({
                "tick": tick,
                "event": "not_reported",
                "weight": weight,
                "error": e.to_string(),
            })),
            None => {}
        },
        None => {}
    }
    lines
}

pub fn run_trace(
    cfg: &Config,
    trace: &Path,
    pace: Pace,
    max_ticks: Option<u64>,
    shutdown: Arc<AtomicBool>,
) -> eyre::Result<RunSummary> {
    let rows = stockbox_config::load_trace_csv(trace)?;
    let player = TracePlayer::new(
        rows.iter()
            .map(|r| TraceStep {
                weight: r.weight,
                control: r.control,
            })
            .collect(),
    );
    let clock: Arc<dyn Clock + Send + Sync> = match pace {
        Pace::RealTime => Arc::new(MonotonicClock::new()),
        Pace::Simulated => Arc::new(ManualClock::new()),
    };
    let mut station = build_station(cfg, &player, clock)?;
    if let Err(e) = station.start() {
        tracing::warn!(error = %e, "starting without a catalog; reports are blocked until one loads");
    }

    let print_events = pace == Pace::Simulated;
    let (summary, reason) = stockbox_core::run(
        &mut station,
        max_ticks,
        || shutdown.load(Ordering::Relaxed) || player.exhausted(),
        |out| {
            if print_events {
                for line in event_lines(out) {
                    println!("{line}");
                }
            }
        },
    );
    tracing::debug!(?reason, "trace run finished");
    Ok(summary)
}
