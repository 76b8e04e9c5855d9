//! Graphics engine tick
//!
//! Keeps the engine's internal timers and redraw machinery alive. Runs on
//! a fine period, independent of sensor timing, and never touches the
//! sample buffer.

use crate::config::GraphicsTickConfig;
use crate::timing::{Millis, TaskTiming};
use crate::traits::GraphicsEngine;

/// Result of one tick activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome<E> {
    /// Period not yet elapsed; engine not called
    NotDue,
    /// Engine processed its pending work
    Processed,
    /// Engine reported an error; the tick schedule is unaffected
    Failed(E),
}

/// Graphics tick task body
pub struct GraphicsTick {
    timing: TaskTiming,
    yield_ms: Millis,
    processed: u32,
}

impl GraphicsTick {
    /// Start the tick period at `now_ms`
    pub fn new(config: &GraphicsTickConfig, now_ms: Millis) -> Self {
        Self {
            timing: TaskTiming::new(config.period_ms, now_ms),
            yield_ms: config.yield_ms,
            processed: 0,
        }
    }

    /// Run one activation: call `process_pending` exactly once if due
    pub fn activate<E: GraphicsEngine>(
        &mut self,
        now_ms: Millis,
        engine: &mut E,
    ) -> TickOutcome<E::Error> {
        if !self.timing.fire_if_due(now_ms) {
            return TickOutcome::NotDue;
        }

        self.processed = self.processed.wrapping_add(1);
        match engine.process_pending() {
            Ok(()) => TickOutcome::Processed,
            Err(e) => TickOutcome::Failed(e),
        }
    }

    /// Yield interval after each activation
    pub fn yield_ms(&self) -> Millis {
        self.yield_ms
    }

    /// Number of engine calls made so far (wraps)
    pub fn processed(&self) -> u32 {
        self.processed
    }

    /// Timing state
    pub fn timing(&self) -> &TaskTiming {
        &self.timing
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::buffer::SensorSample;
    use crate::traits::{ChartSink, GraphicsEngine};

    /// Engine double that records calls
    #[derive(Default)]
    pub struct RecordingEngine {
        pub process_calls: u32,
        pub invalidations: u32,
        pub points: heapless::Vec<(usize, SensorSample), 64>,
        pub latest: Option<SensorSample>,
        pub fail_next: bool,
    }

    impl GraphicsEngine for RecordingEngine {
        type Error = &'static str;

        fn init(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn process_pending(&mut self) -> Result<(), Self::Error> {
            self.process_calls += 1;
            if core::mem::take(&mut self.fail_next) {
                return Err("flush failed");
            }
            Ok(())
        }
    }

    impl ChartSink for RecordingEngine {
        fn set_point(&mut self, index: usize, sample: SensorSample) {
            let _ = self.points.push((index, sample));
        }

        fn set_latest(&mut self, sample: SensorSample) {
            self.latest = Some(sample);
        }

        fn invalidate(&mut self) {
            self.invalidations += 1;
        }
    }
}
