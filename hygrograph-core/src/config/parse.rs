//! Minimal TOML reader for `hygrograph.toml`
//!
//! Handles only the subset the configuration file uses:
//! - `[section]` headers
//! - `key = integer` pairs
//! - Comments (`# ...`), full-line or trailing
//!
//! Keys not present keep their default. The parsed configuration is
//! validated before it is returned.

use super::types::{AppConfig, ConfigError};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not known in its section (or outside any section)
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value is not an integer in range
    InvalidValue,
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Acquisition,
    Graphics,
    Refresh,
    Chart,
}

/// Parse configuration text into an [`AppConfig`]
pub fn parse_config(input: &str) -> Result<AppConfig, ParseError> {
    let mut config = AppConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "acquisition" => Ok(Section::Acquisition),
        "graphics" => Ok(Section::Graphics),
        "refresh" => Ok(Section::Refresh),
        "chart" => Ok(Section::Chart),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    config: &mut AppConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Acquisition, "period_ms") => config.acquisition.period_ms = parse_int(value)?,
        (Section::Acquisition, "yield_ms") => config.acquisition.yield_ms = parse_int(value)?,
        (Section::Graphics, "period_ms") => config.graphics.period_ms = parse_int(value)?,
        (Section::Graphics, "yield_ms") => config.graphics.yield_ms = parse_int(value)?,
        (Section::Refresh, "yield_ms") => config.refresh.yield_ms = parse_int(value)?,
        (Section::Chart, "temperature_min_c") => config.chart.temperature_min_c = parse_int(value)?,
        (Section::Chart, "temperature_max_c") => config.chart.temperature_max_c = parse_int(value)?,
        (Section::Chart, "humidity_min_pct") => config.chart.humidity_min_pct = parse_int(value)?,
        (Section::Chart, "humidity_max_pct") => config.chart.humidity_max_pct = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(AppConfig::default()));
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
# Sampling
[acquisition]
period_ms = 3000   # slower
yield_ms = 50

[graphics]
period_ms = 10
yield_ms = 10

[refresh]
yield_ms = 250

[chart]
temperature_min_c = -20
temperature_max_c = 40
humidity_min_pct = 10
humidity_max_pct = 90
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.acquisition.period_ms, 3000);
        assert_eq!(config.acquisition.yield_ms, 50);
        assert_eq!(config.graphics.period_ms, 10);
        assert_eq!(config.refresh.yield_ms, 250);
        assert_eq!(config.chart.temperature_min_c, -20);
        assert_eq!(config.chart.humidity_max_pct, 90);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("[refresh]\nyield_ms = 200\n").unwrap();
        assert_eq!(config.refresh.yield_ms, 200);
        assert_eq!(config.acquisition, AppConfig::default().acquisition);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(parse_config("[wifi]\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_key_outside_section_rejected() {
        assert_eq!(parse_config("period_ms = 10\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_bad_values_rejected() {
        assert_eq!(
            parse_config("[acquisition]\nperiod_ms = fast\n"),
            Err(ParseError::InvalidValue)
        );
        // Out of range for u8
        assert_eq!(
            parse_config("[chart]\nhumidity_max_pct = 300\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[chart]\nhumidity_max_pct\n"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_validation_applies() {
        assert_eq!(
            parse_config("[graphics]\nyield_ms = 0\n"),
            Err(ParseError::Invalid(ConfigError::ZeroYield))
        );
    }
}
