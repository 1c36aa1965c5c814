//! Weight stability tracking: one report per object placement.
//!
//! Each tick feeds one weight sample. Below the presence threshold the
//! platform is empty. The first sample at or above it seeds an anchor
//! (`reference`). Later samples within `stability_margin` of the anchor
//! count as settled; anything farther moves the anchor and restarts the
//! count. Once `min_stable_ticks` settled samples have been seen the
//! tracker emits `ReportReady` exactly once, then keeps following the
//! weight silently until the object is removed or `rearm` is called.

use crate::config::TrackerCfg;

/// Phase of the current object session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    /// Nothing on the platform.
    Idle,
    /// Object present, not reported yet.
    Settling { reference: f32, settled: u32 },
    /// Object present and reported for this session.
    Reported { reference: f32 },
}

/// What a single observation produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerEvent {
    /// Weight crossed the presence threshold.
    Placed { weight: f32 },
    /// The weight settled; report it.
    ReportReady { weight: f32 },
    /// Weight dropped below the presence threshold.
    Removed,
}

#[derive(Debug, Clone)]
pub struct WeightStabilityTracker {
    cfg: TrackerCfg,
    state: Presence,
}

impl WeightStabilityTracker {
    pub fn new(cfg: TrackerCfg) -> Self {
        Self {
            cfg,
            state: Presence::Idle,
        }
    }

    pub fn presence(&self) -> Presence {
        self.state
    }

    pub fn cfg(&self) -> &TrackerCfg {
        &self.cfg
    }

    /// True while an object is on the platform.
    pub fn is_present(&self) -> bool {
        !matches!(self.state, Presence::Idle)
    }

    /// Feed one weight sample. Negative readings are folded to their
    /// magnitude; non-finite ones are ignored.
    pub fn observe(&mut self, weight: f32) -> Option<TrackerEvent> {
        if !weight.is_finite() {
            tracing::warn!(weight, "ignoring non-finite weight sample");
            return None;
        }
        let w = weight.abs();

        if w < self.cfg.presence_threshold {
            if self.is_present() {
                self.state = Presence::Idle;
                tracing::debug!(weight = w, "object removed");
                return Some(TrackerEvent::Removed);
            }
            return None;
        }

        let margin = self.cfg.stability_margin;
        match self.state {
            Presence::Idle => {
                self.state = Presence::Settling {
                    reference: w,
                    settled: 0,
                };
                tracing::debug!(weight = w, "object placed");
                Some(TrackerEvent::Placed { weight: w })
            }
            Presence::Settling { reference, settled } => {
                if (w - reference).abs() >= margin {
                    self.state = Presence::Settling {
                        reference: w,
                        settled: 0,
                    };
                    return None;
                }
                let settled = settled.saturating_add(1);
                if settled >= self.cfg.min_stable_ticks {
                    self.state = Presence::Reported { reference };
                    tracing::debug!(weight = w, reference, "weight stabilized");
                    Some(TrackerEvent::ReportReady { weight: w })
                } else {
                    self.state = Presence::Settling { reference, settled };
                    None
                }
            }
            Presence::Reported { reference } => {
                if (w - reference).abs() >= margin {
                    self.state = Presence::Reported { reference: w };
                }
                None
            }
        }
    }

    /// Allow one more report for the object currently on the platform.
    /// No effect while the platform is empty.
    pub fn rearm(&mut self) {
        if let Presence::Reported { reference } = self.state {
            self.state = Presence::Settling {
                reference,
                settled: 0,
            };
        }
    }
}

impl Default for WeightStabilityTracker {
    fn default() -> Self {
        Self::new(TrackerCfg::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_present_sample_only_seeds_the_anchor() {
        let mut t = WeightStabilityTracker::default();
        assert_eq!(t.observe(30.0), Some(TrackerEvent::Placed { weight: 30.0 }));
        assert_eq!(
            t.presence(),
            Presence::Settling {
                reference: 30.0,
                settled: 0
            }
        );
    }

    #[test]
    fn negative_readings_are_magnitudes() {
        let mut t = WeightStabilityTracker::default();
        assert!(matches!(t.observe(-40.0), Some(TrackerEvent::Placed { weight }) if weight == 40.0));
        assert!(matches!(t.observe(-41.0), Some(TrackerEvent::ReportReady { weight }) if weight == 41.0));
    }

    #[test]
    fn nan_is_ignored() {
        let mut t = WeightStabilityTracker::default();
        t.observe(30.0);
        assert_eq!(t.observe(f32::NAN), None);
        assert!(t.is_present());
    }

    #[test]
    fn rearm_is_noop_when_idle() {
        let mut t = WeightStabilityTracker::default();
        t.rearm();
        assert_eq!(t.presence(), Presence::Idle);
    }
}
