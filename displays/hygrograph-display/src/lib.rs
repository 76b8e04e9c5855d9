//! Chart rendering for Hygrograph
//!
//! This crate provides:
//! - `FlushTarget` trait for monochrome panels with an off-screen frame buffer
//! - `ChartEngine`, the graphics engine that plots the sample history and
//!   the latest reading
//! - Chart geometry helpers
//!
//! # Backends
//!
//! - **SSD1306** (feature `ssd1306`): 128×64 OLED over I2C, in buffered
//!   graphics mode. Drawing happens in RAM; the engine flushes the frame
//!   only when the chart was invalidated.
//!
//! Any other `embedded-graphics` target can be used by implementing
//! `FlushTarget` for it.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod chart;
pub mod layout;

// Re-export key types
pub use backend::{DisplayError, FlushTarget};
pub use chart::{format_latest, ChartEngine};
pub use layout::ChartLayout;

#[cfg(feature = "ssd1306")]
pub use backend::{ssd1306_i2c, Ssd1306I2c};
