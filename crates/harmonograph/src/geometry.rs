//! Core geometry types and the signal-to-raster projection.
//!
//! The simulator works in "signal space": origin at the screen center,
//! y pointing up, units of display pixels. Raster space is the usual
//! screen convention (origin top-left, y down). Points stay in signal
//! space through all sampling and distance checks and are only rounded
//! to integer raster coordinates at the final draw step, so quantization
//! never biases the subdivision decisions.

/// A 2D point in signal space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Project a signal-space point onto a raster of the given dimensions.
///
/// Rounding is `f64::round` (half away from zero); the difference from
/// half-to-even only shows at sub-pixel boundaries.
#[inline]
pub fn to_raster(p: Point, screen_w: u32, screen_h: u32) -> (i64, i64) {
    (
        screen_w as i64 / 2 + p.x.round() as i64,
        screen_h as i64 / 2 - p.y.round() as i64,
    )
}
