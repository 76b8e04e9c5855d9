//! Configuration type definitions

use crate::timing::{
    Millis, ACQUISITION_YIELD_MS, DISPLAY_REFRESH_YIELD_MS, GRAPHICS_TICK_PERIOD_MS,
    GRAPHICS_TICK_YIELD_MS, SENSOR_PERIOD_MS,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period was zero
    ZeroPeriod,
    /// A yield interval was zero
    ZeroYield,
    /// Chart axis range is empty or inverted
    EmptyRange,
}

/// Sensor acquisition task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcquisitionConfig {
    /// Minimum time between sensor reads (ms)
    pub period_ms: Millis,
    /// Yield after each activation (ms)
    pub yield_ms: Millis,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            period_ms: SENSOR_PERIOD_MS,
            yield_ms: ACQUISITION_YIELD_MS,
        }
    }
}

/// Graphics engine tick task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphicsTickConfig {
    /// Minimum time between engine calls (ms)
    pub period_ms: Millis,
    /// Yield after each activation (ms)
    pub yield_ms: Millis,
}

impl Default for GraphicsTickConfig {
    fn default() -> Self {
        Self {
            period_ms: GRAPHICS_TICK_PERIOD_MS,
            yield_ms: GRAPHICS_TICK_YIELD_MS,
        }
    }
}

/// Display refresh task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefreshConfig {
    /// Yield after each activation (ms); this is the refresh cadence
    pub yield_ms: Millis,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            yield_ms: DISPLAY_REFRESH_YIELD_MS,
        }
    }
}

/// Vertical axis ranges of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChartConfig {
    /// Temperature at the bottom of the plot (°C)
    pub temperature_min_c: i16,
    /// Temperature at the top of the plot (°C)
    pub temperature_max_c: i16,
    /// Humidity at the bottom of the plot (%)
    pub humidity_min_pct: u8,
    /// Humidity at the top of the plot (%)
    pub humidity_max_pct: u8,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            temperature_min_c: -10,
            temperature_max_c: 50,
            humidity_min_pct: 0,
            humidity_max_pct: 100,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AppConfig {
    pub acquisition: AcquisitionConfig,
    pub graphics: GraphicsTickConfig,
    pub refresh: RefreshConfig,
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Check the configuration for values the tasks cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.acquisition.period_ms == 0 || self.graphics.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        // A zero yield would starve every other task on a cooperative executor
        if self.acquisition.yield_ms == 0
            || self.graphics.yield_ms == 0
            || self.refresh.yield_ms == 0
        {
            return Err(ConfigError::ZeroYield);
        }

        if self.chart.temperature_min_c >= self.chart.temperature_max_c
            || self.chart.humidity_min_pct >= self.chart.humidity_max_pct
        {
            return Err(ConfigError::EmptyRange);
        }

        Ok(())
    }
}
