#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and trace parsing for the weighing station.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - The trace CSV loader enforces headers; traces drive the simulated
//!   sensor and selector control for replays and tests.
use serde::Deserialize;

/// Replay trace CSV schema: one row per tick.
///
/// Expected headers:
/// weight,control
///
/// An empty `weight` cell means the sensor was not ready on that tick.
///
/// Example:
/// weight,control
/// 0.0,0
/// ,0
/// 51.2,2048
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub weight: Option<f32>,
    pub control: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StationCfg {
    /// Weight at or above which an object is considered placed.
    pub presence_threshold: f32,
    /// Maximum deviation from the anchor still considered settled.
    pub stability_margin: f32,
    /// Consecutive in-band ticks required before reporting (1 = first in-band tick).
    pub min_stable_ticks: u32,
    /// Conversions averaged per weight read.
    pub read_samples: u8,
    /// Fixed delay after every tick.
    pub tick_ms: u64,
}

impl Default for StationCfg {
    fn default() -> Self {
        Self {
            presence_threshold: 10.0,
            stability_margin: 5.0,
            min_stable_ticks: 1,
            read_samples: 5,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SelectorCfg {
    /// A candidate product must stay put this long before it is confirmed.
    pub settle_ms: u64,
    /// Full-scale raw value of the selector control.
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

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogCfg {
    /// Remote catalog (JSON GET). Takes precedence over `file`.
    pub url: Option<String>,
    /// Local catalog JSON, same format as the remote one.
    pub file: Option<String>,
    /// Maximum number of products kept; extra entries are ignored.
    pub capacity: usize,
    pub timeout_ms: u64,
}

impl Default for CatalogCfg {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            capacity: 10,
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportCfg {
    /// Report endpoint (JSON POST). When absent, reports are printed as JSON lines.
    pub url: Option<String>,
    /// Fixed `zone_prod` metadata attached to every report.
    pub zone: String,
    pub timeout_ms: u64,
}

impl Default for ReportCfg {
    fn default() -> Self {
        Self {
            url: None,
            zone: "TWF".to_string(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClockCfg {
    /// Local time offset applied to report timestamps.
    pub utc_offset_secs: i32,
}

impl Default for ClockCfg {
    fn default() -> Self {
        Self {
            utc_offset_secs: 3 * 3600,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub station: StationCfg,
    pub selector: SelectorCfg,
    pub catalog: CatalogCfg,
    pub report: ReportCfg,
    pub clock: ClockCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_trace_csv(path: &std::path::Path) -> eyre::Result<Vec<TraceRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open trace CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["weight", "control"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "trace CSV must have headers 'weight,control', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<TraceRow>().enumerate() {
        match rec {
            Ok(row) => {
                if let Some(w) = row.weight
                    && !w.is_finite()
                {
                    eyre::bail!("invalid CSV row {}: weight must be finite", idx + 2);
                }
                rows.push(row);
            }
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("trace CSV {:?} has no rows", path);
    }
    Ok(rows)
}

fn check_url(key: &str, url: Option<&str>) -> eyre::Result<()> {
    if let Some(u) = url
        && !(u.starts_with("http://") || u.starts_with("https://"))
    {
        eyre::bail!("{key} must start with http:// or https://");
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Station
        if !(self.station.presence_threshold.is_finite() && self.station.presence_threshold > 0.0)
        {
            eyre::bail!("station.presence_threshold must be > 0");
        }
        if !(self.station.stability_margin.is_finite() && self.station.stability_margin > 0.0) {
            eyre::bail!("station.stability_margin must be > 0");
        }
        if self.station.min_stable_ticks == 0 {
            eyre::bail!("station.min_stable_ticks must be >= 1");
        }
        if !(1..=64).contains(&self.station.read_samples) {
            eyre::bail!("station.read_samples must be in [1, 64]");
        }
        if self.station.tick_ms == 0 {
            eyre::bail!("station.tick_ms must be >= 1");
        }
        if self.station.tick_ms > 60 * 1000 {
            eyre::bail!("station.tick_ms is unreasonably large (>60s)");
        }

        // Selector
        if self.selector.settle_ms > 5 * 60 * 1000 {
            eyre::bail!("selector.settle_ms is unreasonably large (>5min)");
        }
        if self.selector.control_max == 0 {
            eyre::bail!("selector.control_max must be >= 1");
        }

        // Catalog
        check_url("catalog.url", self.catalog.url.as_deref())?;
        if !(1..=64).contains(&self.catalog.capacity) {
            eyre::bail!("catalog.capacity must be in [1, 64]");
        }
        if self.catalog.timeout_ms == 0 {
            eyre::bail!("catalog.timeout_ms must be >= 1");
        }

        // Report
        check_url("report.url", self.report.url.as_deref())?;
        if self.report.zone.trim().is_empty() {
            eyre::bail!("report.zone must not be empty");
        }
        if self.report.timeout_ms == 0 {
            eyre::bail!("report.timeout_ms must be >= 1");
        }

        // Clock
        if self.clock.utc_offset_secs.unsigned_abs() > 18 * 3600 {
            eyre::bail!("clock.utc_offset_secs must be within +/-18h");
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref()
            && !matches!(r, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
