//! Virtual-clock scheduler
//!
//! Runs task bodies against a simulated millisecond clock so the full task
//! set can be exercised on the host without hardware or real time.
//!
//! Rules:
//! - a task is ready once the clock reaches its wake time
//! - of the ready tasks, the highest priority runs; equal priorities run
//!   in spawn order
//! - an activation advances the clock by its busy time, then the task
//!   sleeps for its yield interval (at least 1 ms)
//! - with nothing ready the clock jumps to the earliest wake time

use heapless::Vec;

use super::table::TaskSpec;
use crate::timing::Millis;

/// What one activation cost and how long the task then sleeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Activation {
    /// Simulated execution time
    pub busy_ms: Millis,
    /// Sleep after the activation
    pub yield_ms: Millis,
}

impl Activation {
    /// An activation that takes no simulated time
    pub const fn instant(yield_ms: Millis) -> Self {
        Self { busy_ms: 0, yield_ms }
    }
}

/// A task body driven by [`SimScheduler`]
pub trait Task {
    fn activate(&mut self, now_ms: Millis) -> Activation;
}

/// Scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Task table is full
    Full,
}

/// Handle to a spawned task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskHandle(usize);

struct Slot<'t> {
    spec: TaskSpec,
    task: &'t mut dyn Task,
    wake_ms: Millis,
    activations: u32,
}

/// Deterministic priority scheduler for up to `T` tasks
pub struct SimScheduler<'t, const T: usize> {
    slots: Vec<Slot<'t>, T>,
    now_ms: Millis,
}

impl<'t, const T: usize> Default for SimScheduler<'t, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, const T: usize> SimScheduler<'t, T> {
    /// Create an empty scheduler with the clock at 0
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            now_ms: 0,
        }
    }

    /// Add a task; it becomes ready at the current time
    pub fn spawn(&mut self, spec: &TaskSpec, task: &'t mut dyn Task) -> Result<TaskHandle, SchedulerError> {
        let handle = TaskHandle(self.slots.len());
        self.slots
            .push(Slot {
                spec: *spec,
                task,
                wake_ms: self.now_ms,
                activations: 0,
            })
            .map_err(|_| SchedulerError::Full)?;
        Ok(handle)
    }

    /// Run until the clock reaches `end_ms`
    ///
    /// Activations start strictly before `end_ms`; one that starts just
    /// before may leave the clock past it.
    pub fn run_until(&mut self, end_ms: Millis) {
        while self.now_ms < end_ms {
            match self.next_ready() {
                Some(index) => self.run_slot(index),
                None => {
                    let next_wake = self.slots.iter().map(|s| s.wake_ms).min();
                    match next_wake {
                        Some(wake) if wake < end_ms => self.now_ms = wake,
                        _ => self.now_ms = end_ms,
                    }
                }
            }
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Millis {
        self.now_ms
    }

    /// Number of activations a task has had
    pub fn activations(&self, handle: TaskHandle) -> u32 {
        self.slots.get(handle.0).map_or(0, |s| s.activations)
    }

    /// Static description of a spawned task
    pub fn spec(&self, handle: TaskHandle) -> Option<&TaskSpec> {
        self.slots.get(handle.0).map(|s| &s.spec)
    }

    fn next_ready(&self) -> Option<usize> {
        let mut best: Option<(usize, u8)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.wake_ms > self.now_ms {
                continue;
            }
            match best {
                Some((_, priority)) if priority >= slot.spec.priority => {}
                _ => best = Some((index, slot.spec.priority)),
            }
        }
        best.map(|(index, _)| index)
    }

    fn run_slot(&mut self, index: usize) {
        let now = self.now_ms;
        let slot = &mut self.slots[index];

        let activation = slot.task.activate(now);
        slot.activations = slot.activations.wrapping_add(1);

        self.now_ms = now.saturating_add(activation.busy_ms);
        slot.wake_ms = self.now_ms.saturating_add(activation.yield_ms.max(1));
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use super::*;
    use crate::buffer::{SampleBuffer, SampleWriter};
    use crate::config::{AcquisitionConfig, GraphicsTickConfig, RefreshConfig};
    use crate::scheduler::table::{
        TaskId, ACQUISITION_TASK, DISPLAY_REFRESH_TASK, GRAPHICS_TICK_TASK,
    };
    use crate::tasks::acquisition::test_support::ScriptedSensor;
    use crate::tasks::graphics_tick::test_support::RecordingEngine;
    use crate::tasks::{Acquisition, AcquisitionOutcome, DisplayRefresh, GraphicsTick};

    struct AcquisitionTask<'a, const N: usize> {
        body: Acquisition<ScriptedSensor>,
        writer: SampleWriter<'a, N>,
        stored: u32,
    }

    impl<const N: usize> Task for AcquisitionTask<'_, N> {
        fn activate(&mut self, now_ms: Millis) -> Activation {
            if let AcquisitionOutcome::Stored { .. } = self.body.activate(now_ms, &mut self.writer) {
                self.stored += 1;
            }
            Activation::instant(self.body.yield_ms())
        }
    }

    struct RefreshTask<'a, const N: usize> {
        body: DisplayRefresh<'a, N>,
        engine: &'a RefCell<RecordingEngine>,
    }

    impl<const N: usize> Task for RefreshTask<'_, N> {
        fn activate(&mut self, _now_ms: Millis) -> Activation {
            self.body.activate(&mut *self.engine.borrow_mut());
            Activation {
                busy_ms: 3,
                yield_ms: self.body.yield_ms(),
            }
        }
    }

    struct TickTask<'a> {
        body: GraphicsTick,
        engine: &'a RefCell<RecordingEngine>,
    }

    impl Task for TickTask<'_> {
        fn activate(&mut self, now_ms: Millis) -> Activation {
            self.body.activate(now_ms, &mut *self.engine.borrow_mut());
            Activation {
                busy_ms: 1,
                yield_ms: self.body.yield_ms(),
            }
        }
    }

    struct Probe<'a> {
        id: TaskId,
        log: &'a RefCell<heapless::Vec<TaskId, 8>>,
        yield_ms: Millis,
    }

    impl Task for Probe<'_> {
        fn activate(&mut self, _now_ms: Millis) -> Activation {
            let _ = self.log.borrow_mut().push(self.id);
            Activation::instant(self.yield_ms)
        }
    }

    #[test]
    fn test_ten_second_window_stores_four_or_five_samples() {
        let mut buffer: SampleBuffer<8> = SampleBuffer::new();
        let (writer, reader) = buffer.split();
        let engine = RefCell::new(RecordingEngine::default());

        let sensor = ScriptedSensor::new(&[(40.0, 21.0), (41.0, 22.0), (42.0, 23.0)]);
        let mut acquisition = AcquisitionTask {
            body: Acquisition::begin(sensor, &AcquisitionConfig::default(), 0).unwrap(),
            writer,
            stored: 0,
        };
        let mut refresh = RefreshTask {
            body: DisplayRefresh::new(reader, &RefreshConfig::default()),
            engine: &engine,
        };
        let mut tick = TickTask {
            body: GraphicsTick::new(&GraphicsTickConfig::default(), 0),
            engine: &engine,
        };

        let mut sched: SimScheduler<'_, 3> = SimScheduler::new();
        sched.spawn(&ACQUISITION_TASK, &mut acquisition).unwrap();
        let refresh_handle = sched.spawn(&DISPLAY_REFRESH_TASK, &mut refresh).unwrap();
        let tick_handle = sched.spawn(&GRAPHICS_TICK_TASK, &mut tick).unwrap();

        sched.run_until(10_000);

        let stored = reader.cursor();
        assert!((4..=5).contains(&stored), "stored {stored}");
        assert!(sched.activations(refresh_handle) > 50);
        assert!(sched.activations(tick_handle) > 500);
        assert!(engine.borrow().process_calls > 0);
    }

    #[test]
    fn test_ready_tasks_run_by_priority() {
        let log = RefCell::new(heapless::Vec::new());
        let mut low = Probe {
            id: TaskId::GraphicsTick,
            log: &log,
            yield_ms: 1000,
        };
        let mut mid = Probe {
            id: TaskId::DisplayRefresh,
            log: &log,
            yield_ms: 1000,
        };
        let mut high = Probe {
            id: TaskId::Acquisition,
            log: &log,
            yield_ms: 1000,
        };

        // Spawned lowest first; priority still decides
        let mut sched: SimScheduler<'_, 3> = SimScheduler::new();
        sched.spawn(&GRAPHICS_TICK_TASK, &mut low).unwrap();
        sched.spawn(&DISPLAY_REFRESH_TASK, &mut mid).unwrap();
        sched.spawn(&ACQUISITION_TASK, &mut high).unwrap();

        sched.run_until(1);

        assert_eq!(
            log.borrow().as_slice(),
            &[TaskId::Acquisition, TaskId::DisplayRefresh, TaskId::GraphicsTick]
        );
    }

    #[test]
    fn test_equal_priority_runs_in_spawn_order() {
        let log = RefCell::new(heapless::Vec::new());
        let mut first = Probe {
            id: TaskId::DisplayRefresh,
            log: &log,
            yield_ms: 1000,
        };
        let mut second = Probe {
            id: TaskId::GraphicsTick,
            log: &log,
            yield_ms: 1000,
        };

        let mut sched: SimScheduler<'_, 2> = SimScheduler::new();
        sched.spawn(&ACQUISITION_TASK, &mut first).unwrap();
        sched.spawn(&ACQUISITION_TASK, &mut second).unwrap();
        sched.run_until(1);

        assert_eq!(log.borrow().as_slice(), &[TaskId::DisplayRefresh, TaskId::GraphicsTick]);
    }

    #[test]
    fn test_yield_interval_sets_activation_rate() {
        let log = RefCell::new(heapless::Vec::new());
        let mut probe = Probe {
            id: TaskId::GraphicsTick,
            log: &log,
            yield_ms: 5,
        };

        let mut sched: SimScheduler<'_, 1> = SimScheduler::new();
        let handle = sched.spawn(&GRAPHICS_TICK_TASK, &mut probe).unwrap();
        sched.run_until(100);

        // 0, 5, ..., 95
        assert_eq!(sched.activations(handle), 20);
        assert_eq!(sched.now(), 100);
    }

    #[test]
    fn test_zero_yield_still_advances_clock() {
        let log = RefCell::new(heapless::Vec::new());
        let mut probe = Probe {
            id: TaskId::GraphicsTick,
            log: &log,
            yield_ms: 0,
        };

        let mut sched: SimScheduler<'_, 1> = SimScheduler::new();
        let handle = sched.spawn(&GRAPHICS_TICK_TASK, &mut probe).unwrap();
        sched.run_until(10);

        assert_eq!(sched.activations(handle), 10);
    }

    #[test]
    fn test_spawn_beyond_capacity_fails() {
        let log = RefCell::new(heapless::Vec::new());
        let mut a = Probe {
            id: TaskId::Acquisition,
            log: &log,
            yield_ms: 1,
        };
        let mut b = Probe {
            id: TaskId::Acquisition,
            log: &log,
            yield_ms: 1,
        };

        let mut sched: SimScheduler<'_, 1> = SimScheduler::new();
        assert!(sched.spawn(&ACQUISITION_TASK, &mut a).is_ok());
        assert_eq!(
            sched.spawn(&ACQUISITION_TASK, &mut b),
            Err(SchedulerError::Full)
        );
    }

    #[test]
    fn test_idle_clock_jumps_to_next_wake() {
        let log = RefCell::new(heapless::Vec::new());
        let mut probe = Probe {
            id: TaskId::Acquisition,
            log: &log,
            yield_ms: 2000,
        };

        let mut sched: SimScheduler<'_, 1> = SimScheduler::new();
        let handle = sched.spawn(&ACQUISITION_TASK, &mut probe).unwrap();
        sched.run_until(4001);

        assert_eq!(sched.activations(handle), 3);
        assert_eq!(sched.spec(handle).map(|s| s.id), Some(TaskId::Acquisition));
    }
}
