//! Build script for hygrograph-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates hygrograph.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Integer keys accepted in a section, with their allowed range
type Keys = &'static [(&'static str, i64, i64)];

const ACQUISITION_KEYS: Keys = &[("period_ms", 1, u32::MAX as i64), ("yield_ms", 1, u32::MAX as i64)];
const GRAPHICS_KEYS: Keys = &[("period_ms", 1, u32::MAX as i64), ("yield_ms", 1, u32::MAX as i64)];
const REFRESH_KEYS: Keys = &[("yield_ms", 1, u32::MAX as i64)];
const CHART_KEYS: Keys = &[
    ("temperature_min_c", i16::MIN as i64, i16::MAX as i64),
    ("temperature_max_c", i16::MIN as i64, i16::MAX as i64),
    ("humidity_min_pct", 0, u8::MAX as i64),
    ("humidity_max_pct", 0, u8::MAX as i64),
];

const SCHEMA: &[(&str, Keys)] = &[
    ("acquisition", ACQUISITION_KEYS),
    ("graphics", GRAPHICS_KEYS),
    ("refresh", REFRESH_KEYS),
    ("chart", CHART_KEYS),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate hygrograph.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=hygrograph.toml");

    let config_path = Path::new("hygrograph.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: hygrograph.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds hygrograph.toml at build time.              ║\n\
            ║  Please create one in the hygrograph-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read hygrograph.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in hygrograph.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    validate_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in hygrograph.toml                 ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=hygrograph.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every section and key must be known, and every value an in-range integer
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (section, value) in root {
        let keys = match SCHEMA.iter().find(|(name, _)| name == section) {
            Some((_, keys)) => *keys,
            None => {
                errors.push(format!("unknown section [{}]", section));
                continue;
            }
        };

        let table = match value.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
        };

        for (key, value) in table {
            let (_, min, max) = match keys.iter().find(|(name, _, _)| name == key) {
                Some(entry) => *entry,
                None => {
                    errors.push(format!("[{}] unknown key '{}'", section, key));
                    continue;
                }
            };

            match value.as_integer() {
                Some(v) if v >= min && v <= max => {}
                Some(_) => errors.push(format!("[{}] {} must be {}..={}", section, key, min, max)),
                None => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        }
    }
}

/// Chart ranges must not be empty
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let chart = match config.get("chart").and_then(|c| c.as_table()) {
        Some(t) => t,
        None => return,
    };

    let get = |key: &str, default: i64| chart.get(key).and_then(|v| v.as_integer()).unwrap_or(default);

    if get("temperature_min_c", -10) >= get("temperature_max_c", 50) {
        errors.push("[chart] temperature_min_c must be below temperature_max_c".to_string());
    }
    if get("humidity_min_pct", 0) >= get("humidity_max_pct", 100) {
        errors.push("[chart] humidity_min_pct must be below humidity_max_pct".to_string());
    }
}
