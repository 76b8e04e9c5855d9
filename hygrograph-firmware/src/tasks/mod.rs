//! Embassy async tasks
//!
//! Thin wrappers around the task bodies in hygrograph-core. Each wrapper
//! runs one activation, logs the outcome and sleeps for the task's yield
//! interval. All three run on the core 1 executor.

pub mod acquisition;
pub mod display_refresh;
pub mod graphics_tick;

pub use acquisition::{acquisition_task, Sensor};
pub use display_refresh::display_refresh_task;
pub use graphics_tick::graphics_tick_task;

use embassy_time::Instant;
use hygrograph_core::timing::Millis;

/// Milliseconds since boot, wrapping at `u32::MAX`
pub fn now_ms() -> Millis {
    Instant::now().as_millis() as Millis
}
