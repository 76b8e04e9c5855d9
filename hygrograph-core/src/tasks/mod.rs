//! Task activation logic
//!
//! Each task body is a plain struct whose `activate` method performs one
//! scheduler-granted slice of work. The result is a function of the
//! current time, the task's own timing state and its collaborators, so the
//! same code runs under the Embassy executor and under the host-side
//! [`SimScheduler`](crate::scheduler::SimScheduler).

pub mod acquisition;
pub mod display_refresh;
pub mod graphics_tick;

pub use acquisition::{Acquisition, AcquisitionOutcome, InvalidReading};
pub use display_refresh::DisplayRefresh;
pub use graphics_tick::{GraphicsTick, TickOutcome};
