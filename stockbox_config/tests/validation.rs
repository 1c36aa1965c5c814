use stockbox_config::load_toml;
use rstest::rstest;

const VALID: &str = r#"
[station]
presence_threshold = 10.0
stability_margin = 5.0
min_stable_ticks = 1
read_samples = 5
tick_ms = 200

[selector]
settle_ms = 1500
control_max = 4095

[catalog]
file = "etc/catalog.json"
capacity = 10

[report]
url = "https://example.invalid/poids.json"
zone = "TWF"
timeout_ms = 3000

[clock]
utc_offset_secs = 10800
"#;

#[test]
fn accepts_full_config() {
    let cfg = load_toml(VALID).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.report.timeout_ms, 3000);
    assert_eq!(cfg.catalog.file.as_deref(), Some("etc/catalog.json"));
    assert!(cfg.catalog.url.is_none());
}

#[test]
fn partial_sections_fill_in_defaults() {
    let cfg = load_toml("[station]\ntick_ms = 50\n").expect("parse TOML");
    assert_eq!(cfg.station.tick_ms, 50);
    assert_eq!(cfg.station.presence_threshold, 10.0);
    assert_eq!(cfg.selector.settle_ms, 1500);
    cfg.validate().expect("valid");
}

#[rstest]
#[case("[station]\npresence_threshold = 0.0\n", "presence_threshold must be > 0")]
#[case("[station]\nstability_margin = -1.0\n", "stability_margin must be > 0")]
#[case("[station]\nmin_stable_ticks = 0\n", "min_stable_ticks must be >= 1")]
#[case("[station]\nread_samples = 0\n", "read_samples must be in [1, 64]")]
#[case("[station]\ntick_ms = 0\n", "tick_ms must be >= 1")]
#[case("[selector]\ncontrol_max = 0\n", "control_max must be >= 1")]
#[case("[selector]\nsettle_ms = 900000\n", "settle_ms is unreasonably large")]
#[case("[catalog]\ncapacity = 0\n", "capacity must be in [1, 64]")]
#[case("[catalog]\nurl = \"file:///tmp/x\"\n", "catalog.url must start with http")]
#[case("[report]\nzone = \"  \"\n", "report.zone must not be empty")]
#[case("[report]\ntimeout_ms = 0\n", "report.timeout_ms must be >= 1")]
#[case("[clock]\nutc_offset_secs = 90000\n", "utc_offset_secs must be within")]
#[case("[logging]\nrotation = \"weekly\"\n", "rotation must be one of")]
fn rejects_invalid_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        format!("{err}").contains(needle),
        "expected '{needle}' in '{err}'"
    );
}

#[test]
fn rejects_wrong_types_at_parse_time() {
    let err = load_toml("[station]\ntick_ms = \"fast\"\n").expect_err("type error");
    assert!(format!("{err}").contains("tick_ms"));
}
