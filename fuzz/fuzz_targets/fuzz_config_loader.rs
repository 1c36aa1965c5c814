#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    if let Ok(cfg) = stockbox_config::load_toml(data) {
        // A config that validates must describe a station that can be built.
        if cfg.validate().is_ok() {
            assert!(cfg.station.presence_threshold > 0.0);
            assert!(cfg.catalog.capacity >= 1);
        }
    }
    let _ = toml::from_str::<stockbox_config::StationCfg>(data);
});
