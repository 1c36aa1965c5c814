//! Builds report events and hands them to the sink.
//!
//! Delivery is fire-and-forget: a failed submission is logged, counted and
//! dropped. The session that produced it stays reported.

use std::sync::Arc;

use stockbox_traits::{ReportEvent, ReportSink, WallClock};

use crate::catalog::ProductCatalog;
use crate::error::StationError;
use crate::hw_error::map_hw_error;

/// Delivery counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub submitted: u64,
    pub dropped: u64,
    pub refused: u64,
}

pub struct ReportDispatcher {
    sink: Box<dyn ReportSink>,
    wall_clock: Arc<dyn WallClock + Send + Sync>,
    stats: DispatchStats,
}

impl ReportDispatcher {
    pub fn new(sink: Box<dyn ReportSink>, wall_clock: Arc<dyn WallClock + Send + Sync>) -> Self {
        Self {
            sink,
            wall_clock,
            stats: DispatchStats::default(),
        }
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Report a stabilized `weight` against the confirmed product.
    ///
    /// Fails without touching the sink when the catalog is empty or no
    /// product is confirmed. A sink failure is logged and returned as
    /// `StationError::Transport`; nothing is retried.
    pub fn dispatch(
        &mut self,
        weight: f32,
        confirmed: Option<usize>,
        catalog: &ProductCatalog,
    ) -> Result<ReportEvent, StationError> {
        if catalog.is_empty() {
            self.stats.refused += 1;
            tracing::warn!(weight, "stabilized weight not reported: catalog unavailable");
            return Err(StationError::CatalogUnavailable);
        }
        let Some(index) = confirmed else {
            self.stats.refused += 1;
            tracing::warn!(weight, "stabilized weight not reported: no product selected");
            return Err(StationError::NoSelection);
        };
        let Some(entry) = catalog.get(index) else {
            self.stats.refused += 1;
            tracing::warn!(weight, index, "confirmed index outside catalog");
            return Err(StationError::CatalogUnavailable);
        };

        let event = ReportEvent {
            weight,
            product_designation: entry.designation.clone(),
            timestamp: self.wall_clock.timestamp(),
        };

        match self.sink.submit(&event) {
            Ok(ack) => {
                self.stats.submitted += 1;
                tracing::info!(
                    weight,
                    product = %event.product_designation,
                    timestamp = %event.timestamp,
                    status = ack.status,
                    "report submitted"
                );
                Ok(event)
            }
            Err(e) => {
                self.stats.dropped += 1;
                let err = match map_hw_error(&*e) {
                    StationError::Transport(m) => StationError::Transport(m),
                    other => StationError::Transport(other.to_string()),
                };
                tracing::warn!(
                    weight,
                    product = %event.product_designation,
                    error = %err,
                    "report dropped"
                );
                Err(err)
            }
        }
    }
}
