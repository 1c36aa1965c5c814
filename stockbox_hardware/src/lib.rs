//! Host-side collaborators for the weighing station.
//!
//! Physical drivers live on the device; here we provide what the core needs
//! to run off-target: trace-driven sensor and control, a console display,
//! HTTP and JSON-lines report sinks, HTTP and file catalog sources, and a
//! system wall clock.
pub mod catalog;
pub mod console;
pub mod error;
pub mod http;
pub mod payload;
pub mod sim;
pub mod wall_clock;

pub use catalog::{FileCatalogSource, parse_catalog_json};
pub use console::{ConsoleDisplay, JsonLinesSink};
pub use error::HwError;
pub use http::{HttpCatalogSource, HttpReportSink};
pub use sim::{SimulatedControl, SimulatedSensor, TracePlayer, TraceStep};
pub use wall_clock::SystemWallClock;
