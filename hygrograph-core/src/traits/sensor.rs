//! Temperature/humidity sensor trait

/// Trait for combined temperature and humidity sensors
///
/// Implementations handle the specific sensor type (DHT22, SHT3x, ...).
/// Reads are blocking and may take a few hundred milliseconds on slow
/// single-wire sensors.
///
/// A failed read is reported as NaN rather than an error value, and the
/// caller checks both readings independently before trusting either.
pub trait HumiditySensor {
    /// Error returned by one-time initialisation
    type Error;

    /// One-time initialisation, called before the first acquisition
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Relative humidity in percent, or NaN if the read failed
    ///
    /// Takes `&mut self` because bus access requires mutable access.
    fn read_humidity(&mut self) -> f32;

    /// Temperature in degrees Celsius, or NaN if the read failed
    fn read_temperature(&mut self) -> f32;
}

impl<T: HumiditySensor + ?Sized> HumiditySensor for &mut T {
    type Error = T::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn read_humidity(&mut self) -> f32 {
        (**self).read_humidity()
    }

    fn read_temperature(&mut self) -> f32 {
        (**self).read_temperature()
    }
}
