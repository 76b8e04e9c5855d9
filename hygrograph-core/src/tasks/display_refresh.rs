//! Display refresh
//!
//! Pushes the whole sample buffer into the chart on every activation,
//! oldest slot first so the newest reading sits at the right edge and the
//! graph scrolls as the cursor moves. There is no due-time gate; the
//! cadence comes from the yield interval alone.

use crate::buffer::{SampleReader, SensorSample};
use crate::config::RefreshConfig;
use crate::timing::Millis;
use crate::traits::ChartSink;

/// Display refresh task body
pub struct DisplayRefresh<'a, const N: usize> {
    samples: SampleReader<'a, N>,
    yield_ms: Millis,
    refreshes: u32,
}

impl<'a, const N: usize> DisplayRefresh<'a, N> {
    /// Create a refresh task reading from `samples`
    pub fn new(samples: SampleReader<'a, N>, config: &RefreshConfig) -> Self {
        Self {
            samples,
            yield_ms: config.yield_ms,
            refreshes: 0,
        }
    }

    /// Run one activation
    ///
    /// Returns the sample shown in the latest-reading readout.
    pub fn activate<C: ChartSink + ?Sized>(&mut self, chart: &mut C) -> SensorSample {
        for (index, sample) in self.samples.chronological().enumerate() {
            chart.set_point(index, sample);
        }

        let latest = self.samples.latest();
        chart.set_latest(latest);
        chart.invalidate();

        self.refreshes = self.refreshes.wrapping_add(1);
        latest
    }

    /// Yield interval after each activation
    pub fn yield_ms(&self) -> Millis {
        self.yield_ms
    }

    /// Number of completed refreshes (wraps)
    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SampleBuffer;
    use crate::tasks::graphics_tick::test_support::RecordingEngine;

    #[test]
    fn test_pushes_every_slot_oldest_first() {
        let mut buffer: SampleBuffer<3> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();
        for t in [10, 11, 12, 13] {
            writer.append(SensorSample::new(t, 40));
        }

        let mut refresh = DisplayRefresh::new(reader, &RefreshConfig::default());
        let mut engine = RecordingEngine::default();
        let latest = refresh.activate(&mut engine);

        assert_eq!(
            engine.points.as_slice(),
            &[
                (0, SensorSample::new(11, 40)),
                (1, SensorSample::new(12, 40)),
                (2, SensorSample::new(13, 40)),
            ]
        );
        assert_eq!(latest, SensorSample::new(13, 40));
        assert_eq!(engine.latest, Some(latest));
        assert_eq!(engine.invalidations, 1);
    }

    #[test]
    fn test_refresh_is_unconditional() {
        let buffer: SampleBuffer<2> = SampleBuffer::new();
        let mut refresh = DisplayRefresh::new(buffer.reader(), &RefreshConfig::default());
        let mut engine = RecordingEngine::default();

        for _ in 0..5 {
            refresh.activate(&mut engine);
        }

        assert_eq!(engine.invalidations, 5);
        assert_eq!(refresh.refreshes(), 5);
        assert_eq!(refresh.yield_ms(), 100);
    }

    #[test]
    fn test_empty_buffer_shows_zero_samples() {
        let buffer: SampleBuffer<2> = SampleBuffer::new();
        let mut refresh = DisplayRefresh::new(buffer.reader(), &RefreshConfig::default());
        let mut engine = RecordingEngine::default();

        refresh.activate(&mut engine);

        assert!(engine.points.iter().all(|(_, s)| *s == SensorSample::ZERO));
        assert_eq!(engine.latest, Some(SensorSample::ZERO));
    }
}
