//! Maps `Box<dyn Error>` from trait boundaries to typed `StationError`.
//!
//! The traits in `stockbox_traits` use `Box<dyn Error + Send + Sync>` so any
//! collaborator can plug in; this module converts those to our typed error
//! enum, with an optional feature-gated path for `stockbox_hardware::HwError`
//! downcasting.

use crate::error::StationError;

/// Map a trait-boundary error to a typed `StationError`.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to string-based heuristics.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> StationError {
    #[cfg(feature = "hardware-errors")]
    {
        use stockbox_hardware::HwError;
        if let Some(hw) = e.downcast_ref::<HwError>() {
            return match hw {
                HwError::NotReady => StationError::SensorNotReady,
                HwError::Status(code) => StationError::Transport(format!("http status {code}")),
                HwError::Transport(msg) => StationError::Transport(msg.clone()),
                HwError::Parse(msg) => StationError::Parse(msg.clone()),
                HwError::InvalidOffset(_) => StationError::Config(hw.to_string()),
                HwError::Io(_) => StationError::Hardware(hw.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    let lower = s.to_lowercase();
    if lower.contains("not ready") {
        StationError::SensorNotReady
    } else if lower.contains("parse") || lower.contains("json") {
        StationError::Parse(s)
    } else if lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connect")
        || lower.contains("http")
    {
        StationError::Transport(s)
    } else {
        StationError::Hardware(s)
    }
}
