//! Sensor acquisition task

use defmt::*;
use embassy_rp::gpio::OutputOpenDrain;
use embassy_time::{Delay, Timer};

use hygrograph_core::buffer::SampleWriter;
use hygrograph_core::tasks::{Acquisition, AcquisitionOutcome};
use hygrograph_drivers::Dht22;

use super::now_ms;
use crate::SAMPLE_CAPACITY;

/// DHT22 on an open-drain GPIO, timed with a busy-wait delay
pub type Sensor = Dht22<OutputOpenDrain<'static>, Delay>;

/// Acquisition task - reads the DHT22 once per period into the sample buffer
#[embassy_executor::task]
pub async fn acquisition_task(
    mut acquisition: Acquisition<Sensor>,
    mut samples: SampleWriter<'static, SAMPLE_CAPACITY>,
) {
    info!("Acquisition task started");

    loop {
        match acquisition.activate(now_ms(), &mut samples) {
            AcquisitionOutcome::NotDue => {}
            AcquisitionOutcome::Stored {
                sample,
                humidity,
                temperature,
            } => {
                info!("Humidity: {}%  Temperature: {} C", humidity, temperature);
                trace!("Stored {}, next slot {}", sample, samples.cursor());
            }
            AcquisitionOutcome::Rejected(reading) => {
                warn!(
                    "Failed to read from DHT sensor! (humidity failed: {}, temperature failed: {}, cause: {})",
                    reading.humidity_failed(),
                    reading.temperature_failed(),
                    acquisition.sensor_mut().last_error()
                );
            }
        }

        Timer::after_millis(acquisition.yield_ms() as u64).await;
    }
}
