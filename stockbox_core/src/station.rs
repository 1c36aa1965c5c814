//! The weighing station: one tick reads the sensor and the selector
//! control, advances both state machines and reports stabilized weights.

use std::sync::Arc;

use stockbox_traits::clock::Clock;
use stockbox_traits::{CatalogSource, ControlInput, Display, WeightSensor};

use crate::builder::StationBuilder;
use crate::catalog::ProductCatalog;
use crate::config::SamplingCfg;
use crate::dispatcher::{DispatchStats, ReportDispatcher};
use crate::display::Screen;
use crate::error::StationError;
use crate::hw_error::map_hw_error;
use crate::selector::{ProductSelector, SelectorEvent};
use crate::status::TickOutcome;
use crate::tracker::{Presence, TrackerEvent, WeightStabilityTracker};

fn show(display: &mut dyn Display, screen: &Screen<'_>) {
    let (a, b) = screen.lines();
    display.show_lines(&a, &b);
}

pub struct Station {
    pub(crate) sensor: Box<dyn WeightSensor>,
    pub(crate) control: Box<dyn ControlInput>,
    pub(crate) display: Box<dyn Display>,
    pub(crate) catalog_source: Option<Box<dyn CatalogSource>>,
    pub(crate) catalog: ProductCatalog,
    pub(crate) tracker: WeightStabilityTracker,
    pub(crate) selector: ProductSelector,
    pub(crate) dispatcher: ReportDispatcher,
    pub(crate) sampling: SamplingCfg,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    pub(crate) ticks: u64,
}

impl core::fmt::Debug for Station {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Station")
            .field("ticks", &self.ticks)
            .field("catalog_len", &self.catalog.len())
            .field("presence", &self.tracker.presence())
            .field("selector", &self.selector)
            .finish()
    }
}

impl Station {
    pub fn builder() -> StationBuilder {
        StationBuilder::default()
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn presence(&self) -> Presence {
        self.tracker.presence()
    }

    pub fn confirmed(&self) -> Option<usize> {
        self.selector.confirmed()
    }

    pub fn dispatch_stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }

    pub fn sampling(&self) -> &SamplingCfg {
        &self.sampling
    }

    pub fn clock(&self) -> Arc<dyn Clock + Send + Sync> {
        Arc::clone(&self.clock)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Load the catalog once and show the idle screen.
    pub fn start(&mut self) -> Result<usize, StationError> {
        let loaded = self.load_catalog();
        if loaded.is_ok() && !self.catalog.is_empty() {
            let product = self.confirmed().and_then(|i| self.catalog.designation(i));
            show(self.display.as_mut(), &Screen::Ready { product });
        }
        loaded
    }

    /// Fetch the catalog from the configured source. On failure the
    /// previous catalog is kept. Without a source, a preloaded catalog is
    /// used as is.
    pub fn load_catalog(&mut self) -> Result<usize, StationError> {
        let Some(source) = self.catalog_source.as_mut() else {
            if !self.catalog.is_empty() {
                tracing::debug!(
                    entries = self.catalog.len(),
                    "no catalog source; keeping preloaded catalog"
                );
                return Ok(self.catalog.len());
            }
            tracing::warn!("no catalog source configured");
            show(self.display.as_mut(), &Screen::CatalogUnavailable);
            return Err(StationError::CatalogUnavailable);
        };
        let result = self.catalog.reload(source.as_mut());
        self.selector.retain_within(self.catalog.len());
        if result.is_err() || self.catalog.is_empty() {
            show(self.display.as_mut(), &Screen::CatalogUnavailable);
        }
        result
    }

    /// One pass of the main loop. Never fails: every error is logged and
    /// reflected in the outcome.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        let mut out = TickOutcome {
            tick: self.ticks,
            ..TickOutcome::default()
        };

        if !self.sensor.is_ready() {
            tracing::trace!(tick = self.ticks, "sensor not ready; tick skipped");
            out.skipped = true;
            return out;
        }
        let weight = match self.sensor.read_weight(self.sampling.read_samples) {
            Ok(w) => w.abs(),
            Err(e) => {
                let err = map_hw_error(&*e);
                tracing::warn!(tick = self.ticks, error = %err, "weight read failed; tick skipped");
                out.skipped = true;
                return out;
            }
        };
        out.weight = Some(weight);

        match self.control.read_raw() {
            Ok(raw) => out.selection = self.selector.observe(raw, self.catalog.len()),
            Err(e) => {
                let err = map_hw_error(&*e);
                tracing::warn!(tick = self.ticks, error = %err, "selector read failed; selection held");
            }
        }
        match out.selection {
            Some(SelectorEvent::Confirmed { index }) => {
                self.tracker.rearm();
                let product = self.catalog.designation(index).unwrap_or_default();
                show(self.display.as_mut(), &Screen::Selected { product });
            }
            Some(SelectorEvent::Candidate { index }) => {
                let product = self.catalog.designation(index).unwrap_or_default();
                let screen = if self.selector.confirmed() == Some(index) {
                    Screen::Selected { product }
                } else {
                    Screen::Candidate { product }
                };
                show(self.display.as_mut(), &screen);
            }
            None => {}
        }

        out.presence = self.tracker.observe(weight);
        match out.presence {
            Some(TrackerEvent::Placed { weight }) => {
                show(self.display.as_mut(), &Screen::Weighing { weight });
            }
            Some(TrackerEvent::Removed) => {
                let product = self.confirmed().and_then(|i| self.catalog.designation(i));
                show(self.display.as_mut(), &Screen::Ready { product });
            }
            Some(TrackerEvent::ReportReady { weight }) => {
                let result =
                    self.dispatcher
                        .dispatch(weight, self.selector.confirmed(), &self.catalog);
                let screen = match &result {
                    Ok(ev) => Screen::Reported {
                        product: &ev.product_designation,
                        weight,
                    },
                    Err(StationError::CatalogUnavailable) => Screen::CatalogUnavailable,
                    Err(StationError::NoSelection) => Screen::NoProduct { weight },
                    Err(_) => Screen::SendFailed { weight },
                };
                show(self.display.as_mut(), &screen);
                out.dispatch = Some(result);
            }
            None => {}
        }
        out
    }
}
