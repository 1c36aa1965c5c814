//! `From` implementations bridging `stockbox_config` types to core types.

use crate::config::{SamplingCfg, SelectorCfg, TrackerCfg};

// ── TrackerCfg ───────────────────────────────────────────────────────────────

impl From<&stockbox_config::StationCfg> for TrackerCfg {
    fn from(c: &stockbox_config::StationCfg) -> Self {
        Self {
            presence_threshold: c.presence_threshold,
            stability_margin: c.stability_margin,
            min_stable_ticks: c.min_stable_ticks,
        }
    }
}

// ── SamplingCfg ──────────────────────────────────────────────────────────────

impl From<&stockbox_config::StationCfg> for SamplingCfg {
    fn from(c: &stockbox_config::StationCfg) -> Self {
        Self {
            read_samples: c.read_samples,
            tick_ms: c.tick_ms,
        }
    }
}

// ── SelectorCfg ──────────────────────────────────────────────────────────────

impl From<&stockbox_config::SelectorCfg> for SelectorCfg {
    fn from(c: &stockbox_config::SelectorCfg) -> Self {
        Self {
            settle_ms: c.settle_ms,
            control_max: c.control_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_defaults_match_core_defaults() {
        let cfg = stockbox_config::Config::default();
        let t: TrackerCfg = (&cfg.station).into();
        let s: SamplingCfg = (&cfg.station).into();
        let sel: SelectorCfg = (&cfg.selector).into();
        let (dt, ds, dsel) = (TrackerCfg::default(), SamplingCfg::default(), SelectorCfg::default());
        assert_eq!(t.presence_threshold, dt.presence_threshold);
        assert_eq!(t.stability_margin, dt.stability_margin);
        assert_eq!(t.min_stable_ticks, dt.min_stable_ticks);
        assert_eq!(s.read_samples, ds.read_samples);
        assert_eq!(s.tick_ms, ds.tick_ms);
        assert_eq!(sel.settle_ms, dsel.settle_ms);
        assert_eq!(sel.control_max, dsel.control_max);
    }
}
