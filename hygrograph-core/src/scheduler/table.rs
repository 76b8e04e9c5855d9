//! Fixed task table
//!
//! Tasks are created once at start-up, in priority order, and run forever.
//! Acquisition has the highest priority so a due sensor read is never held
//! up by rendering; the engine tick has the lowest because it runs often
//! and only does housekeeping.

/// Number of priority levels
pub const MAX_PRIORITIES: u8 = 25;

/// Task identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    /// Sensor acquisition
    Acquisition,
    /// Buffer to chart push
    DisplayRefresh,
    /// Graphics engine timer/event processing
    GraphicsTick,
}

/// Static description of one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskSpec {
    pub id: TaskId,
    /// Name used in logs
    pub name: &'static str,
    /// Higher value runs first when several tasks are ready
    pub priority: u8,
    /// Core the task is pinned to
    pub core: u8,
    /// Stack budget in bytes
    pub stack_bytes: usize,
}

/// Sensor acquisition task
pub const ACQUISITION_TASK: TaskSpec = TaskSpec {
    id: TaskId::Acquisition,
    name: "acquisition",
    priority: MAX_PRIORITIES - 1,
    core: 1,
    stack_bytes: 2048,
};

/// Display refresh task
pub const DISPLAY_REFRESH_TASK: TaskSpec = TaskSpec {
    id: TaskId::DisplayRefresh,
    name: "display_refresh",
    priority: MAX_PRIORITIES - 2,
    core: 1,
    stack_bytes: 2048,
};

/// Graphics engine tick task
pub const GRAPHICS_TICK_TASK: TaskSpec = TaskSpec {
    id: TaskId::GraphicsTick,
    name: "graphics_tick",
    priority: MAX_PRIORITIES - 3,
    core: 1,
    stack_bytes: 2048,
};

/// All tasks, highest priority first (this is also the spawn order)
pub const TASK_TABLE: [TaskSpec; 3] = [ACQUISITION_TASK, DISPLAY_REFRESH_TASK, GRAPHICS_TICK_TASK];

/// Total stack budget of the tasks pinned to `core`
pub const fn core_stack_bytes(core: u8) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < TASK_TABLE.len() {
        if TASK_TABLE[i].core == core {
            total += TASK_TABLE[i].stack_bytes;
        }
        i += 1;
    }
    total
}
