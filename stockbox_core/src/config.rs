//! Runtime configuration for the station core.
//!
//! These are the structs the state machines consume. They are separate from
//! the TOML-deserialized config in `stockbox_config`; see `conversions`.

/// Presence and stabilization thresholds.
#[derive(Debug, Clone)]
pub struct TrackerCfg {
    /// Weight at or above which an object is present.
    pub presence_threshold: f32,
    /// A reading closer than this to the anchor counts as settled.
    pub stability_margin: f32,
    /// Consecutive settled ticks required before reporting. 1 reports on the
    /// first settled tick.
    pub min_stable_ticks: u32,
}

impl Default for TrackerCfg {
    fn default() -> Self {
        Self {
            presence_threshold: 10.0,
            stability_margin: 5.0,
            min_stable_ticks: 1,
        }
    }
}

/// Product selection debounce.
#[derive(Debug, Clone)]
pub struct SelectorCfg {
    /// How long a candidate must hold before it is confirmed.
    pub settle_ms: u64,
    /// Full-scale raw control value.
    pub control_max: u16,
}

impl Default for SelectorCfg {
    fn default() -> Self {
        Self {
            settle_ms: 1500,
            control_max: 4095,
        }
    }
}

/// Tick cadence and sensor averaging.
#[derive(Debug, Clone)]
pub struct SamplingCfg {
    /// Conversions averaged per weight read.
    pub read_samples: u8,
    /// Fixed delay after every tick.
    pub tick_ms: u64,
}

impl Default for SamplingCfg {
    fn default() -> Self {
        Self {
            read_samples: 5,
            tick_ms: 200,
        }
    }
}

/// Default catalog capacity.
pub const CATALOG_CAPACITY: usize = 10;
