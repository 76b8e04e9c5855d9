//! DHT22 (AM2302) temperature/humidity sensor
//!
//! Single-wire protocol on one open-drain pin with an external pull-up:
//!
//! 1. Host drives the line low for at least 1 ms, then releases it
//! 2. Sensor answers with ~80 µs low followed by ~80 µs high
//! 3. Sensor sends 40 bits, MSB first; each bit is ~50 µs low followed by
//!    a high pulse of ~26 µs (0) or ~70 µs (1)
//!
//! Bits are classified by comparing the high pulse with the low pulse that
//! preceded it, so only relative timing matters.
//!
//! Frame layout: humidity ×10 (2 bytes), temperature ×10 (2 bytes, bit 15
//! is the sign), checksum (low byte of the sum of the first four bytes).
//!
//! One bus transaction yields both values. A humidity read starts a
//! transaction and caches the frame; the temperature read that follows
//! reuses it, so a humidity+temperature pair costs one transaction.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use hygrograph_core::traits::HumiditySensor;

/// Host start pulse length
const START_LOW_US: u32 = 1_100;

/// Longest level the sensor is allowed to hold during a frame
const PULSE_TIMEOUT_US: u32 = 100;

/// Bits per frame
const FRAME_BITS: usize = 40;

/// DHT22 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dht22Error {
    /// Sensor did not respond or a pulse was too long
    Timeout,
    /// Checksum byte does not match the data
    Checksum,
    /// The GPIO reported an error
    Pin,
}

/// One decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dht22Frame {
    /// Relative humidity in 0.1 %
    pub humidity_x10: u16,
    /// Temperature in 0.1 °C
    pub temperature_x10: i16,
}

impl Dht22Frame {
    /// Decode the five raw bytes of a frame
    pub fn decode(bytes: [u8; 5]) -> Result<Self, Dht22Error> {
        let sum = bytes[0]
            .wrapping_add(bytes[1])
            .wrapping_add(bytes[2])
            .wrapping_add(bytes[3]);
        if sum != bytes[4] {
            return Err(Dht22Error::Checksum);
        }

        let humidity_x10 = u16::from_be_bytes([bytes[0], bytes[1]]);

        let magnitude = u16::from_be_bytes([bytes[2] & 0x7F, bytes[3]]) as i16;
        let temperature_x10 = if bytes[2] & 0x80 != 0 {
            -magnitude
        } else {
            magnitude
        };

        Ok(Self {
            humidity_x10,
            temperature_x10,
        })
    }

    /// Relative humidity in percent
    pub fn humidity(&self) -> f32 {
        self.humidity_x10 as f32 / 10.0
    }

    /// Temperature in degrees Celsius
    pub fn temperature(&self) -> f32 {
        self.temperature_x10 as f32 / 10.0
    }
}

/// DHT22 driver
///
/// `P` is an open-drain pin that can be both driven and sampled. Reads
/// report NaN on failure; the cause is kept in [`Dht22::last_error`].
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
    last: Result<Dht22Frame, Dht22Error>,
    /// A frame read for humidity that temperature has not consumed yet
    pending_temperature: bool,
    transactions: u32,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a driver; the line is not touched until [`HumiditySensor::begin`]
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            last: Err(Dht22Error::Timeout),
            pending_temperature: false,
            transactions: 0,
        }
    }

    /// Run one bus transaction and decode the frame
    pub fn read_frame(&mut self) -> Result<Dht22Frame, Dht22Error> {
        self.transactions = self.transactions.wrapping_add(1);

        self.pin.set_low().map_err(|_| Dht22Error::Pin)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| Dht22Error::Pin)?;

        // Line floats high until the sensor takes it
        self.wait_while(true)?;
        // Response: low then high
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut bytes = [0u8; 5];
        for bit in 0..FRAME_BITS {
            let low_us = self.wait_while(false)?;
            let high_us = self.wait_while(true)?;
            if high_us > low_us {
                bytes[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        Dht22Frame::decode(bytes)
    }

    /// Outcome of the most recent transaction
    pub fn last_frame(&self) -> Result<Dht22Frame, Dht22Error> {
        self.last
    }

    /// Error of the most recent transaction, if it failed
    pub fn last_error(&self) -> Option<Dht22Error> {
        self.last.err()
    }

    /// Number of bus transactions started (wraps)
    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Microseconds the line stayed at `level`
    fn wait_while(&mut self, level: bool) -> Result<u32, Dht22Error> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| Dht22Error::Pin)? == level {
            if elapsed >= PULSE_TIMEOUT_US {
                return Err(Dht22Error::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }

    fn refresh(&mut self) -> Result<Dht22Frame, Dht22Error> {
        self.last = self.read_frame();
        self.last
    }
}

impl<P, D> HumiditySensor for Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    type Error = Dht22Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        // Idle level is high (released)
        self.pin.set_high().map_err(|_| Dht22Error::Pin)?;
        self.delay.delay_ms(1);
        Ok(())
    }

    fn read_humidity(&mut self) -> f32 {
        let frame = self.refresh();
        self.pending_temperature = true;
        frame.map_or(f32::NAN, |f| f.humidity())
    }

    fn read_temperature(&mut self) -> f32 {
        let frame = if core::mem::take(&mut self.pending_temperature) {
            self.last
        } else {
            self.refresh()
        };
        frame.map_or(f32::NAN, |f| f.temperature())
    }
}
