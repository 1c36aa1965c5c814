//! Builder for `Station`.
//!
//! Sensor, control, report sink and wall clock are required. Everything
//! else has a default: no display output, no catalog source, the monotonic
//! clock and the stock thresholds.

use std::sync::Arc;

use stockbox_traits::clock::{Clock, MonotonicClock};
use stockbox_traits::{
    CatalogEntry, CatalogSource, ControlInput, Display, ReportSink, WallClock, WeightSensor,
};

use crate::catalog::ProductCatalog;
use crate::config::{CATALOG_CAPACITY, SamplingCfg, SelectorCfg, TrackerCfg};
use crate::dispatcher::ReportDispatcher;
use crate::error::{BuildError, Result};
use crate::mocks::NullDisplay;
use crate::selector::ProductSelector;
use crate::station::Station;
use crate::tracker::WeightStabilityTracker;

#[derive(Default)]
pub struct StationBuilder {
    sensor: Option<Box<dyn WeightSensor>>,
    control: Option<Box<dyn ControlInput>>,
    display: Option<Box<dyn Display>>,
    sink: Option<Box<dyn ReportSink>>,
    catalog_source: Option<Box<dyn CatalogSource>>,
    initial_catalog: Option<Vec<CatalogEntry>>,
    wall_clock: Option<Arc<dyn WallClock + Send + Sync>>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    tracker: Option<TrackerCfg>,
    selector: Option<SelectorCfg>,
    sampling: Option<SamplingCfg>,
    catalog_capacity: Option<usize>,
}

impl StationBuilder {
    pub fn with_sensor(mut self, s: impl WeightSensor + 'static) -> Self {
        self.sensor = Some(Box::new(s));
        self
    }

    pub fn with_control(mut self, c: impl ControlInput + 'static) -> Self {
        self.control = Some(Box::new(c));
        self
    }

    pub fn with_display(mut self, d: impl Display + 'static) -> Self {
        self.display = Some(Box::new(d));
        self
    }

    pub fn with_sink(mut self, s: impl ReportSink + 'static) -> Self {
        self.sink = Some(Box::new(s));
        self
    }

    /// Same as `with_sink` for an already boxed sink.
    pub fn with_boxed_sink(mut self, s: Box<dyn ReportSink>) -> Self {
        self.sink = Some(s);
        self
    }

    pub fn with_catalog_source(mut self, s: impl CatalogSource + 'static) -> Self {
        self.catalog_source = Some(Box::new(s));
        self
    }

    pub fn with_boxed_catalog_source(mut self, s: Box<dyn CatalogSource>) -> Self {
        self.catalog_source = Some(s);
        self
    }

    /// Preload entries without a fetch.
    pub fn with_catalog(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.initial_catalog = Some(entries);
        self
    }

    pub fn with_catalog_capacity(mut self, n: usize) -> Self {
        self.catalog_capacity = Some(n);
        self
    }

    pub fn with_wall_clock(mut self, w: impl WallClock + Send + Sync + 'static) -> Self {
        self.wall_clock = Some(Arc::new(w));
        self
    }

    /// Injected monotonic clock for selection debounce and tick pacing.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_tracker(mut self, cfg: TrackerCfg) -> Self {
        self.tracker = Some(cfg);
        self
    }

    pub fn with_selector(mut self, cfg: SelectorCfg) -> Self {
        self.selector = Some(cfg);
        self
    }

    pub fn with_sampling(mut self, cfg: SamplingCfg) -> Self {
        self.sampling = Some(cfg);
        self
    }

    /// Configure everything tunable from a validated TOML config.
    pub fn apply_config(self, c: &stockbox_config::Config) -> Self {
        self.with_tracker((&c.station).into())
            .with_sampling((&c.station).into())
            .with_selector((&c.selector).into())
            .with_catalog_capacity(c.catalog.capacity)
    }

    pub fn build(self) -> Result<Station> {
        let sensor = self.sensor.ok_or(BuildError::MissingSensor)?;
        let control = self.control.ok_or(BuildError::MissingControl)?;
        let sink = self.sink.ok_or(BuildError::MissingSink)?;
        let wall_clock = self.wall_clock.ok_or(BuildError::MissingWallClock)?;

        let tracker = self.tracker.unwrap_or_default();
        if !(tracker.presence_threshold.is_finite() && tracker.presence_threshold > 0.0) {
            return Err(BuildError::InvalidConfig("presence_threshold must be > 0").into());
        }
        if !(tracker.stability_margin.is_finite() && tracker.stability_margin > 0.0) {
            return Err(BuildError::InvalidConfig("stability_margin must be > 0").into());
        }
        if tracker.min_stable_ticks == 0 {
            return Err(BuildError::InvalidConfig("min_stable_ticks must be >= 1").into());
        }

        let selector = self.selector.unwrap_or_default();
        if selector.control_max == 0 {
            return Err(BuildError::InvalidConfig("control_max must be >= 1").into());
        }

        let sampling = self.sampling.unwrap_or_default();
        if sampling.read_samples == 0 {
            return Err(BuildError::InvalidConfig("read_samples must be >= 1").into());
        }
        if sampling.tick_ms == 0 {
            return Err(BuildError::InvalidConfig("tick_ms must be >= 1").into());
        }

        let capacity = self.catalog_capacity.unwrap_or(CATALOG_CAPACITY);
        if capacity == 0 {
            return Err(BuildError::InvalidConfig("catalog capacity must be >= 1").into());
        }
        let catalog = match self.initial_catalog {
            Some(entries) => ProductCatalog::from_entries(entries, capacity),
            None => ProductCatalog::new(capacity),
        };

        let clock: Arc<dyn Clock + Send + Sync> = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));

        Ok(Station {
            sensor,
            control,
            display: self.display.unwrap_or_else(|| Box::new(NullDisplay)),
            catalog_source: self.catalog_source,
            catalog,
            tracker: WeightStabilityTracker::new(tracker),
            selector: ProductSelector::new(selector, Arc::clone(&clock)),
            dispatcher: ReportDispatcher::new(sink, wall_clock),
            sampling,
            clock,
            ticks: 0,
        })
    }
}
