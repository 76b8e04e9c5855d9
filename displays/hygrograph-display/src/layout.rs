//! Chart geometry
//!
//! Splits the panel into a one-line header for the latest reading and a
//! plot area below it, and maps sample index and value to pixel positions
//! inside the plot area.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Height of the header line (one row of the 6×10 font plus a gap)
pub const HEADER_HEIGHT: u32 = 11;

/// Header and plot rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    pub header: Rectangle,
    pub plot: Rectangle,
}

impl ChartLayout {
    /// Lay out a chart over `area`
    pub fn for_area(area: Rectangle) -> Self {
        let header_height = HEADER_HEIGHT.min(area.size.height);
        let header = Rectangle::new(area.top_left, Size::new(area.size.width, header_height));
        let plot = Rectangle::new(
            area.top_left + Point::new(0, header_height as i32),
            Size::new(area.size.width, area.size.height - header_height),
        );

        Self { header, plot }
    }

    /// X coordinate of sample `index` out of `count`, oldest at the left
    pub fn x_for(&self, index: usize, count: usize) -> i32 {
        let left = self.plot.top_left.x;
        let span = self.plot.size.width.saturating_sub(1) as i32;
        if count <= 1 {
            return left;
        }
        left + (index.min(count - 1) as i32 * span) / (count as i32 - 1)
    }

    /// Y coordinate of `value` on an axis running from `min` (bottom) to `max` (top)
    ///
    /// Values outside the range are clamped to the plot edge.
    pub fn y_for(&self, value: i32, min: i32, max: i32) -> i32 {
        let top = self.plot.top_left.y;
        let span = self.plot.size.height.saturating_sub(1) as i32;
        let bottom = top + span;
        if max <= min {
            return bottom;
        }

        let clamped = value.clamp(min, max);
        bottom - ((clamped - min) * span) / (max - min)
    }
}
