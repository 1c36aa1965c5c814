#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(entries) = stockbox_hardware::parse_catalog_json(data) {
        for e in &entries {
            assert!(!e.designation.trim().is_empty());
            assert!(e.unit_weight.is_finite() && e.unit_weight >= 0.0);
        }
    }
});
