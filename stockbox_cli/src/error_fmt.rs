//! Human-readable error descriptions and structured JSON error formatting.

use stockbox_core::error::{BuildError, StationError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
            ),
            other => format!(
                "What happened: The station could not be assembled ({other}).\nLikely causes: A collaborator failed to initialize.\nHow to fix: Re-run with --log-level=debug for details."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<StationError>() {
        return match se {
            StationError::Config(msg) => format!(
                "What happened: Configuration is invalid ({msg}).\nLikely causes: A typo or out-of-range value in the TOML.\nHow to fix: Edit the config file and try again."
            ),
            StationError::Transport(msg) => format!(
                "What happened: The server could not be reached ({msg}).\nLikely causes: No network, wrong URL, or the server is down.\nHow to fix: Check catalog.url / report.url and connectivity; raise the timeout_ms values if the link is slow."
            ),
            StationError::Parse(msg) => format!(
                "What happened: The product catalog could not be read ({msg}).\nLikely causes: The catalog document is not an object or array of products.\nHow to fix: Each product needs designation, unit_weight and units_per_lot."
            ),
            StationError::CatalogUnavailable => "What happened: No product catalog is available.\nLikely causes: Neither catalog.url nor catalog.file is set, or the catalog is empty.\nHow to fix: Configure a catalog source in the [catalog] section.".to_string(),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors coming from init
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("trace csv must have headers") {
        return "Invalid headers in trace CSV. Expected 'weight,control'.".to_string();
    }
    if lower.contains("invalid csv row") || lower.contains("open trace csv") {
        return format!(
            "What happened: The trace could not be loaded ({msg}).\nLikely causes: Missing file or a malformed row.\nHow to fix: Each row needs a weight (empty = sensor not ready) and a control value 0..=65535."
        );
    }
    if lower.contains("invalid utc offset") {
        return "What happened: The clock offset is not a valid UTC offset.\nHow to fix: Set clock.utc_offset_secs within +/-18h.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 2 for configuration problems, 3 for catalog problems,
/// 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if matches!(err.downcast_ref::<BuildError>(), Some(BuildError::InvalidConfig(_))) {
        return 2;
    }
    match err.downcast_ref::<StationError>() {
        Some(StationError::Config(_)) => 2,
        Some(
            StationError::CatalogUnavailable | StationError::Parse(_) | StationError::Transport(_),
        ) => 3,
        _ => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<StationError>() {
        Some(StationError::Config(_)) => "Config",
        Some(StationError::CatalogUnavailable) => "CatalogUnavailable",
        Some(StationError::Parse(_)) => "CatalogParse",
        Some(StationError::Transport(_)) => "Transport",
        Some(_) => "Station",
        None if err.downcast_ref::<BuildError>().is_some() => "Build",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_two() {
        let e = eyre::Report::new(StationError::Config("station.tick_ms must be >= 1".into()));
        assert_eq!(exit_code_for_error(&e), 2);
        assert!(humanize(&e).contains("tick_ms"));
    }

    #[test]
    fn catalog_errors_exit_with_three() {
        let e = eyre::Report::new(StationError::Parse("entry a: missing field".into()));
        assert_eq!(exit_code_for_error(&e), 3);
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&e)).unwrap();
        assert_eq!(v["reason"], "CatalogParse");
        assert_eq!(v["exit_code"], 3);
    }

    #[test]
    fn trace_header_message_is_short() {
        let e = eyre::eyre!("trace CSV must have headers 'weight,control', got: w,c");
        assert_eq!(exit_code_for_error(&e), 1);
        assert!(humanize(&e).starts_with("Invalid headers in trace CSV"));
    }
}
