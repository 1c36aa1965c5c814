//! In-memory collaborators for driving a `Station` without hardware.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use stockbox_traits::{
    Ack, CatalogEntry, CatalogSource, ControlInput, Display, ReportEvent, ReportSink, WallClock,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Display that discards everything.
pub struct NullDisplay;

impl Display for NullDisplay {
    fn show_lines(&mut self, _line0: &str, _line1: &str) {}
}

/// Display that keeps every screen shown, shared with the test.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub screens: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<(String, String)> {
        self.screens.borrow().last().cloned()
    }
}

impl Display for RecordingDisplay {
    fn show_lines(&mut self, line0: &str, line1: &str) {
        self.screens
            .borrow_mut()
            .push((line0.to_string(), line1.to_string()));
    }
}

/// Sensor fed from a queue; `None` entries are not-ready ticks. Empty queue
/// repeats the last weight.
pub struct ScriptedSensor {
    queue: VecDeque<Option<f32>>,
    current: Option<f32>,
    last: f32,
}

impl ScriptedSensor {
    pub fn new<I: IntoIterator<Item = Option<f32>>>(steps: I) -> Self {
        Self {
            queue: steps.into_iter().collect(),
            current: None,
            last: 0.0,
        }
    }

    /// Every step ready.
    pub fn weights<I: IntoIterator<Item = f32>>(weights: I) -> Self {
        Self::new(weights.into_iter().map(Some))
    }
}

impl stockbox_traits::WeightSensor for ScriptedSensor {
    fn is_ready(&mut self) -> bool {
        self.current = match self.queue.pop_front() {
            Some(step) => step,
            None => Some(self.last),
        };
        self.current.is_some()
    }

    fn read_weight(&mut self, _samples: u8) -> Result<f32, BoxError> {
        let w = self
            .current
            .ok_or_else(|| Box::new(std::io::Error::other("sensor not ready")) as BoxError)?;
        self.last = w;
        Ok(w)
    }
}

/// Control whose raw value the test sets directly.
#[derive(Clone, Default)]
pub struct SharedControl {
    pub raw: Rc<Cell<u16>>,
}

impl SharedControl {
    pub fn new(raw: u16) -> Self {
        Self {
            raw: Rc::new(Cell::new(raw)),
        }
    }

    pub fn set(&self, raw: u16) {
        self.raw.set(raw);
    }
}

impl ControlInput for SharedControl {
    fn read_raw(&mut self) -> Result<u16, BoxError> {
        Ok(self.raw.get())
    }
}

/// Sink that records submissions and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Rc<RefCell<Vec<ReportEvent>>>,
    pub fail: Rc<Cell<bool>>,
}

impl ReportSink for RecordingSink {
    fn submit(&mut self, event: &ReportEvent) -> Result<Ack, BoxError> {
        if self.fail.get() {
            return Err(Box::new(std::io::Error::other("connection refused")));
        }
        self.events.borrow_mut().push(event.clone());
        Ok(Ack { status: 200 })
    }
}

/// Catalog source returning a fixed list, or failing when `entries` is `None`.
#[derive(Clone, Default)]
pub struct StaticCatalog {
    pub entries: Rc<RefCell<Option<Vec<CatalogEntry>>>>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(Some(entries))),
        }
    }

    /// Build entries named `names` with placeholder weights.
    pub fn named(names: &[&str]) -> Self {
        Self::new(
            names
                .iter()
                .map(|n| CatalogEntry {
                    designation: (*n).to_string(),
                    unit_weight: 100.0,
                    units_per_lot: 1,
                })
                .collect(),
        )
    }

    pub fn set(&self, entries: Option<Vec<CatalogEntry>>) {
        *self.entries.borrow_mut() = entries;
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_all(&mut self) -> Result<Vec<CatalogEntry>, BoxError> {
        self.entries
            .borrow()
            .clone()
            .ok_or_else(|| Box::new(std::io::Error::other("catalog json parse failed")) as BoxError)
    }
}

/// Wall clock frozen at one timestamp.
pub struct FixedWallClock(pub String);

impl WallClock for FixedWallClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
