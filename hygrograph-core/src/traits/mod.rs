//! Collaborator traits
//!
//! These traits define the interface between the task logic and the
//! hardware-specific sensor and graphics implementations.

pub mod graphics;
pub mod sensor;

pub use graphics::{ChartSink, GraphicsEngine};
pub use sensor::HumiditySensor;
