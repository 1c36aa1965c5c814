//! Product selection from an analog control, debounced in time.
//!
//! The raw control value maps onto a catalog index. A new candidate is
//! confirmed once it has held for `settle_ms`. Confirmation happens at most
//! once per distinct candidate; returning to the confirmed index does not
//! confirm again.

use std::sync::Arc;
use std::time::Instant;

use stockbox_traits::clock::Clock;

use crate::config::SelectorCfg;

/// Map a raw control value onto `[0, size)`.
///
/// The range `0..=control_max` is cut into `size` equal buckets so every
/// index is reachable and the mapping is non-decreasing. Values above
/// `control_max` clamp to the last index. `None` when `size == 0`.
pub fn map_control_to_index(raw: u16, control_max: u16, size: usize) -> Option<usize> {
    if size == 0 {
        return None;
    }
    let max = u64::from(control_max.max(1));
    let raw = u64::from(raw).min(max);
    let idx = raw * size as u64 / (max + 1);
    Some((idx as usize).min(size - 1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    /// The control moved to a different product; not confirmed yet.
    Candidate { index: usize },
    /// The candidate held long enough and became the selection.
    Confirmed { index: usize },
}

pub struct ProductSelector {
    cfg: SelectorCfg,
    clock: Arc<dyn Clock + Send + Sync>,
    epoch: Instant,
    candidate: Option<usize>,
    candidate_since_ms: u64,
    confirmed: Option<usize>,
}

impl core::fmt::Debug for ProductSelector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductSelector")
            .field("candidate", &self.candidate)
            .field("confirmed", &self.confirmed)
            .field("settle_ms", &self.cfg.settle_ms)
            .finish()
    }
}

impl ProductSelector {
    pub fn new(cfg: SelectorCfg, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let epoch = clock.now();
        Self {
            cfg,
            clock,
            epoch,
            candidate: None,
            candidate_since_ms: 0,
            confirmed: None,
        }
    }

    /// Currently confirmed catalog index, if any.
    pub fn confirmed(&self) -> Option<usize> {
        self.confirmed
    }

    pub fn candidate(&self) -> Option<usize> {
        self.candidate
    }

    /// Drop any candidate or selection that no longer fits a catalog of
    /// `size` entries.
    pub fn retain_within(&mut self, size: usize) {
        if self.confirmed.is_some_and(|i| i >= size) {
            tracing::info!(size, "confirmed product fell outside the catalog; selection cleared");
            self.confirmed = None;
        }
        if self.candidate.is_some_and(|i| i >= size) {
            self.candidate = None;
        }
    }

    /// Feed one raw control reading against a catalog of `size` entries.
    pub fn observe(&mut self, raw: u16, size: usize) -> Option<SelectorEvent> {
        self.retain_within(size);
        let index = map_control_to_index(raw, self.cfg.control_max, size)?;
        let now = self.clock.ms_since(self.epoch);

        let moved = self.candidate != Some(index);
        if moved {
            self.candidate = Some(index);
            self.candidate_since_ms = now;
        }

        let held = now.saturating_sub(self.candidate_since_ms);
        if held >= self.cfg.settle_ms && self.confirmed != Some(index) {
            self.confirmed = Some(index);
            tracing::info!(index, held_ms = held, "product selection confirmed");
            return Some(SelectorEvent::Confirmed { index });
        }

        moved.then_some(SelectorEvent::Candidate { index })
    }
}
