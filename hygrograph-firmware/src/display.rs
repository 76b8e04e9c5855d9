//! Display wiring
//!
//! SSD1306 128×64 OLED on I2C0. Pin assignment is board-specific
//! (Pico: SDA=GPIO4, SCL=GPIO5).

use defmt::*;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use hygrograph_core::config::ChartConfig;
use hygrograph_core::traits::GraphicsEngine;
use hygrograph_display::{ssd1306_i2c, ChartEngine, Ssd1306I2c};

use crate::SAMPLE_CAPACITY;

/// 7-bit I2C address of the panel
pub const OLED_ADDRESS: u8 = 0x3C;

/// I2C clock for the panel
const I2C_FREQUENCY_HZ: u32 = 400_000;

pub type Panel = Ssd1306I2c<I2c<'static, I2C0, Blocking>>;

/// Chart engine with one point per buffer slot
pub type Chart = ChartEngine<Panel, SAMPLE_CAPACITY>;

/// Chart shared by the display refresh and graphics tick tasks
pub type SharedChart = Mutex<CriticalSectionRawMutex, Chart>;

/// I2C bus configuration for the panel
pub fn i2c_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}

/// Build the chart engine and initialise the panel
///
/// A panel that fails to initialise is logged and left in place; the
/// engine then reports `NotInitialized` on every tick.
pub fn init_chart(i2c: I2c<'static, I2C0, Blocking>, ranges: &ChartConfig) -> Chart {
    let panel = ssd1306_i2c(i2c, OLED_ADDRESS);
    let mut chart = ChartEngine::new(panel, ranges);

    match chart.init() {
        Ok(()) => info!("OLED initialized at {:#x}", OLED_ADDRESS),
        Err(e) => error!("OLED init failed: {}", e),
    }

    chart
}
