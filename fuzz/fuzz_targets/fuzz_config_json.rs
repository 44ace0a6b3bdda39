//! Fuzz target: `SystemConfig::from_json`
//!
//! Feeds arbitrary bytes as JSON and checks that parsing never panics and
//! never hands back a configuration that fails its own validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use firewatch::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SystemConfig::from_json(text) {
        assert!(config.validate().is_ok(), "from_json accepted an invalid config");
        assert!(config.motor_duty_percent <= 100);
    }
});
