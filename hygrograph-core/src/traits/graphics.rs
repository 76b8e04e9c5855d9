//! Graphics engine traits
//!
//! The graphics engine is split along task ownership: the graphics tick
//! task is the only caller of [`GraphicsEngine::process_pending`], and the
//! display refresh task is the only caller of the [`ChartSink`] methods.

use crate::buffer::SensorSample;

/// Trait for the rendering engine's housekeeping entry points
pub trait GraphicsEngine {
    /// Error from initialisation or rendering
    type Error;

    /// One-time initialisation, before any task starts
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Process pending timers/events and redraw whatever was invalidated
    ///
    /// Must be called periodically, at a cadence fine enough for a
    /// responsive UI.
    fn process_pending(&mut self) -> Result<(), Self::Error>;
}

/// Trait for the chart objects fed with buffered samples
pub trait ChartSink {
    /// Set the point at `index` (0 = oldest) of both series
    fn set_point(&mut self, index: usize, sample: SensorSample);

    /// Set the latest-reading readout
    fn set_latest(&mut self, sample: SensorSample);

    /// Mark the chart for redraw on the next engine tick
    fn invalidate(&mut self);
}
