//! Task scheduling
//!
//! Describes the fixed task set (priority, core affinity, stack budget)
//! and provides a deterministic virtual-clock scheduler for running the
//! task bodies on the host.

pub mod sim;
pub mod table;

pub use sim::{Activation, SchedulerError, SimScheduler, Task, TaskHandle};
pub use table::{
    core_stack_bytes, TaskId, TaskSpec, ACQUISITION_TASK, DISPLAY_REFRESH_TASK,
    GRAPHICS_TICK_TASK, MAX_PRIORITIES, TASK_TABLE,
};
