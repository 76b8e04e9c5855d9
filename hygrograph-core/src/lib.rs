//! Board-agnostic core logic for the Hygrograph firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (humidity sensor, graphics engine, chart sink)
//! - The shared sample ring buffer and its producer/consumer handles
//! - Per-task timing and the activation logic of the three tasks
//! - Task table and a host-side cooperative scheduler model
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod scheduler;
pub mod tasks;
pub mod timing;
pub mod traits;

pub use buffer::{SampleBuffer, SampleReader, SampleWriter, SensorSample};
pub use timing::{Millis, TaskTiming};
