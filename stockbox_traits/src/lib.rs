//! Collaborator contracts for the weighing station core.
//!
//! Everything the core talks to (load cell, selector knob, LCD, report
//! endpoint, product catalog, wall clock) is reached through these traits.
//! Boundary errors are boxed so that implementations can bring their own
//! error types; `stockbox_core::hw_error` maps them back to typed errors.
pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

use serde::{Deserialize, Serialize};

/// Sentinel returned by a [`WallClock`] that has no synchronized time.
pub const UNSYNCED_TIMESTAMP: &str = "0000-00-00 00:00:00";

/// One product the operator can tag a weighing with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub designation: String,
    /// Weight of a single unit, in the same units as the load cell.
    pub unit_weight: f32,
    pub units_per_lot: u32,
}

/// A stabilized weighing tagged with the confirmed product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEvent {
    pub weight: f32,
    pub product_designation: String,
    /// `YYYY-MM-DD HH:MM:SS`, or [`UNSYNCED_TIMESTAMP`].
    pub timestamp: String,
}

/// Acknowledgement from a report sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Transport status (HTTP status for network sinks, 0 for local sinks).
    pub status: u16,
}

pub trait WeightSensor {
    /// Whether a fresh conversion is available. A `false` turns the tick into a no-op.
    fn is_ready(&mut self) -> bool;
    /// Weight averaged over `samples` conversions, already calibrated and tared.
    fn read_weight(
        &mut self,
        samples: u8,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait ControlInput {
    /// Raw position of the selector control (0..=4095 on the reference board).
    fn read_raw(&mut self) -> Result<u16, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait Display {
    /// Fire-and-forget; a failing display never fails the station.
    fn show_lines(&mut self, line0: &str, line1: &str);
}

pub trait ReportSink {
    fn submit(
        &mut self,
        event: &ReportEvent,
    ) -> Result<Ack, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait CatalogSource {
    /// Fetch the complete catalog. A single malformed entry fails the whole fetch.
    fn fetch_all(&mut self) -> Result<Vec<CatalogEntry>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait WallClock {
    /// Current local time formatted `YYYY-MM-DD HH:MM:SS`, never failing.
    fn timestamp(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entry_serde_shape() {
        let e = CatalogEntry {
            designation: "Yaourt".into(),
            unit_weight: 125.0,
            units_per_lot: 12,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["designation"], "Yaourt");
        assert_eq!(v["units_per_lot"], 12);
        let back: CatalogEntry = serde_json::from_value(v).unwrap();
        assert_eq!(back, e);
    }
}
