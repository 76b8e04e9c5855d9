//! Sensor acquisition
//!
//! One activation walks `Idle → Due → Reading → (Valid | Invalid) → Idle`:
//!
//! - not a full period since the last due activation: stay idle
//! - due: restart the period from now, read humidity then temperature
//! - either reading NaN: discard the pair, leave the buffer untouched
//! - both readings valid: truncate to integers and append to the buffer
//!
//! An invalid reading is not retried; the next attempt happens one period
//! later like any other.

use crate::buffer::{SampleWriter, SensorSample};
use crate::config::AcquisitionConfig;
use crate::timing::{Millis, TaskTiming};
use crate::traits::HumiditySensor;

/// A reading pair rejected because at least one value is NaN
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidReading {
    /// Raw humidity as returned by the sensor
    pub humidity: f32,
    /// Raw temperature as returned by the sensor
    pub temperature: f32,
}

impl InvalidReading {
    /// Humidity read failed
    pub fn humidity_failed(&self) -> bool {
        self.humidity.is_nan()
    }

    /// Temperature read failed
    pub fn temperature_failed(&self) -> bool {
        self.temperature.is_nan()
    }
}

/// Result of one acquisition activation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionOutcome {
    /// Period not yet elapsed; sensor not touched
    NotDue,
    /// Valid reading appended to the buffer
    Stored {
        sample: SensorSample,
        /// Untruncated humidity (%)
        humidity: f32,
        /// Untruncated temperature (°C)
        temperature: f32,
    },
    /// Reading discarded
    Rejected(InvalidReading),
}

/// Sensor acquisition task body
pub struct Acquisition<S> {
    sensor: S,
    timing: TaskTiming,
    yield_ms: Millis,
}

impl<S: HumiditySensor> Acquisition<S> {
    /// Initialise the sensor and start the sampling period at `now_ms`
    ///
    /// The first read happens one full period after `now_ms`.
    pub fn begin(mut sensor: S, config: &AcquisitionConfig, now_ms: Millis) -> Result<Self, S::Error> {
        sensor.begin()?;

        Ok(Self {
            sensor,
            timing: TaskTiming::new(config.period_ms, now_ms),
            yield_ms: config.yield_ms,
        })
    }

    /// Run one activation
    pub fn activate<const N: usize>(
        &mut self,
        now_ms: Millis,
        writer: &mut SampleWriter<'_, N>,
    ) -> AcquisitionOutcome {
        if !self.timing.fire_if_due(now_ms) {
            return AcquisitionOutcome::NotDue;
        }

        // Both reads happen even if the first fails; each one is checked
        let humidity = self.sensor.read_humidity();
        let temperature = self.sensor.read_temperature();

        match SensorSample::from_readings(temperature, humidity) {
            Some(sample) => {
                writer.append(sample);
                AcquisitionOutcome::Stored {
                    sample,
                    humidity,
                    temperature,
                }
            }
            None => AcquisitionOutcome::Rejected(InvalidReading {
                humidity,
                temperature,
            }),
        }
    }

    /// Yield interval after each activation
    pub fn yield_ms(&self) -> Millis {
        self.yield_ms
    }

    /// Timing state
    pub fn timing(&self) -> &TaskTiming {
        &self.timing
    }

    /// Access the sensor
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
