#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Weighing station core (hardware-agnostic).
//!
//! All I/O goes through the traits in `stockbox_traits`; this crate holds
//! the state machines and the loop that drives them.
//!
//! ## Architecture
//!
//! - **Presence and stability**: one report per placed object (`tracker`)
//! - **Product selection**: analog control mapped to a catalog index and
//!   debounced in time (`selector`)
//! - **Catalog**: bounded list of products, reloadable (`catalog`)
//! - **Reporting**: report events built and submitted, failures dropped
//!   (`dispatcher`)
//! - **Station**: per-tick orchestration and operator screens (`station`,
//!   `display`)
//! - **Runner**: fixed-cadence loop (`runner`)

pub mod builder;
pub mod catalog;
pub mod config;
pub mod conversions;
pub mod dispatcher;
pub mod display;
pub mod error;
pub mod hw_error;
pub mod mocks;
pub mod runner;
pub mod selector;
pub mod station;
pub mod status;
pub mod tracker;

pub use builder::StationBuilder;
pub use catalog::ProductCatalog;
pub use config::{CATALOG_CAPACITY, SamplingCfg, SelectorCfg, TrackerCfg};
pub use dispatcher::{DispatchStats, ReportDispatcher};
pub use display::{Screen, format_weight};
pub use error::{BuildError, Result, StationError};
pub use hw_error::map_hw_error;
pub use runner::{RunSummary, StopReason, run};
pub use selector::{ProductSelector, SelectorEvent, map_control_to_index};
pub use station::Station;
pub use status::TickOutcome;
pub use tracker::{Presence, TrackerEvent, WeightStabilityTracker};
