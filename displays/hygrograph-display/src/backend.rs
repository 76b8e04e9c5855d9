//! Display backend trait
//!
//! A backend is an `embedded-graphics` draw target with an off-screen frame
//! buffer: drawing only touches the buffer, and [`FlushTarget::flush_frame`]
//! transfers it to the panel.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Panel did not accept the initialisation sequence
    InitializationFailed,
    /// Communication error while transferring the frame
    Communication,
    /// Drawing into the frame buffer failed
    Draw,
    /// Rendering attempted before initialisation
    NotInitialized,
}

/// Monochrome draw target with a separate flush step
pub trait FlushTarget: DrawTarget<Color = BinaryColor> {
    /// Send the panel initialisation sequence
    fn init_display(&mut self) -> Result<(), DisplayError>;

    /// Transfer the frame buffer to the panel
    fn flush_frame(&mut self) -> Result<(), DisplayError>;
}

#[cfg(feature = "ssd1306")]
mod oled {
    use display_interface::WriteOnlyDataCommand;
    use display_interface_i2c::I2CInterface;
    use ssd1306::mode::BufferedGraphicsMode;
    use ssd1306::prelude::*;
    use ssd1306::{I2CDisplayInterface, Ssd1306};

    use super::{DisplayError, FlushTarget};

    /// 128×64 SSD1306 on I2C in buffered graphics mode
    pub type Ssd1306I2c<I2C> =
        Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

    /// Build an SSD1306 driver without generating bus traffic
    ///
    /// `address` is the 7-bit device address, usually `0x3C`.
    pub fn ssd1306_i2c<I2C>(i2c: I2C, address: u8) -> Ssd1306I2c<I2C>
    where
        I2C: embedded_hal::i2c::I2c,
    {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode()
    }

    impl<DI, SIZE> FlushTarget for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
    where
        DI: WriteOnlyDataCommand,
        SIZE: DisplaySize,
    {
        fn init_display(&mut self) -> Result<(), DisplayError> {
            self.init().map_err(|_| DisplayError::InitializationFailed)
        }

        fn flush_frame(&mut self) -> Result<(), DisplayError> {
            self.flush().map_err(|_| DisplayError::Communication)
        }
    }
}

#[cfg(feature = "ssd1306")]
pub use oled::{ssd1306_i2c, Ssd1306I2c};
