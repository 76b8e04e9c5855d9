//! Scrolling climate chart
//!
//! Holds one point per buffer slot for each series plus the latest
//! reading, and renders them into a [`FlushTarget`]:
//!
//! ```text
//! +----------------------------+
//! | T 21C  H 45%               |  header
//! |     ____/\___              |  temperature (line)
//! | . . . . . . . .  . . . .   |  humidity (dots)
//! +----------------------------+
//! ```
//!
//! Rendering is lazy: [`ChartSink::invalidate`] marks the chart dirty and
//! the next [`GraphicsEngine::process_pending`] redraws the frame buffer
//! and flushes it. A failed flush leaves the chart dirty so the next tick
//! retries.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Polyline, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use heapless::{String, Vec};
use hygrograph_core::buffer::SensorSample;
use hygrograph_core::config::ChartConfig;
use hygrograph_core::traits::{ChartSink, GraphicsEngine};

use crate::backend::{DisplayError, FlushTarget};
use crate::layout::ChartLayout;

/// Header text for the latest reading
pub fn format_latest(sample: SensorSample) -> String<24> {
    let mut line = String::new();
    let _ = write!(
        line,
        "T {}C  H {}%",
        sample.temperature_c, sample.humidity_pct
    );
    line
}

/// Chart engine over a display backend, `N` points per series
pub struct ChartEngine<D, const N: usize> {
    target: D,
    layout: ChartLayout,
    ranges: ChartConfig,
    points: [SensorSample; N],
    latest: SensorSample,
    dirty: bool,
    initialized: bool,
    frames: u32,
}

impl<D: FlushTarget, const N: usize> ChartEngine<D, N> {
    /// Create an engine covering the whole of `target`
    pub fn new(target: D, ranges: &ChartConfig) -> Self {
        let layout = ChartLayout::for_area(target.bounding_box());
        Self {
            target,
            layout,
            ranges: *ranges,
            points: [SensorSample::ZERO; N],
            latest: SensorSample::ZERO,
            dirty: false,
            initialized: false,
            frames: 0,
        }
    }

    /// Draw the current state into the frame buffer (no flush)
    pub fn render(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Draw)?;

        let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let header = format_latest(self.latest);
        Text::with_baseline(
            header.as_str(),
            self.layout.header.top_left,
            text_style,
            Baseline::Top,
        )
        .draw(&mut self.target)
        .map_err(|_| DisplayError::Draw)?;

        let t_min = self.ranges.temperature_min_c as i32;
        let t_max = self.ranges.temperature_max_c as i32;
        let mut trace: Vec<Point, N> = Vec::new();
        for (i, sample) in self.points.iter().enumerate() {
            let x = self.layout.x_for(i, N);
            let y = self.layout.y_for(sample.temperature_c as i32, t_min, t_max);
            let _ = trace.push(Point::new(x, y));
        }
        Polyline::new(&trace)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Draw)?;

        let h_min = self.ranges.humidity_min_pct as i32;
        let h_max = self.ranges.humidity_max_pct as i32;
        let layout = self.layout;
        let dots = self.points.iter().enumerate().map(|(i, sample)| {
            let x = layout.x_for(i, N);
            let y = layout.y_for(sample.humidity_pct as i32, h_min, h_max);
            Pixel(Point::new(x, y), BinaryColor::On)
        });
        self.target
            .draw_iter(dots)
            .map_err(|_| DisplayError::Draw)
    }

    /// Number of frames flushed (wraps)
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Whether a redraw is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Points of both series, oldest first
    pub fn points(&self) -> &[SensorSample; N] {
        &self.points
    }

    /// Latest-reading readout
    pub fn latest(&self) -> SensorSample {
        self.latest
    }

    /// Display backend
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable display backend
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }
}

impl<D: FlushTarget, const N: usize> GraphicsEngine for ChartEngine<D, N> {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), DisplayError> {
        self.target.init_display()?;
        self.initialized = true;
        // First tick paints the empty chart
        self.dirty = true;
        Ok(())
    }

    fn process_pending(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        if !self.dirty {
            return Ok(());
        }

        self.render()?;
        self.target.flush_frame()?;

        self.dirty = false;
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}

impl<D: FlushTarget, const N: usize> ChartSink for ChartEngine<D, N> {
    fn set_point(&mut self, index: usize, sample: SensorSample) {
        if let Some(point) = self.points.get_mut(index) {
            *point = sample;
        }
    }

    fn set_latest(&mut self, sample: SensorSample) {
        self.latest = sample;
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }
}
