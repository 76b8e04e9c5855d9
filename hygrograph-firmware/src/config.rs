//! Configuration loading
//!
//! The configuration is compiled in from `hygrograph.toml`. The build
//! script already rejects a malformed file, so the fallback to defaults
//! only matters when the parser and the build-time check disagree.

use defmt::*;
use hygrograph_core::config::{parse_config, AppConfig};

/// Embedded configuration text
/// Edit hygrograph.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../hygrograph.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_embedded() -> AppConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            AppConfig::default()
        }
    };

    info!(
        "Sampling every {} ms, chart refresh every {} ms, engine tick every {} ms",
        config.acquisition.period_ms, config.refresh.yield_ms, config.graphics.period_ms
    );
    config
}
