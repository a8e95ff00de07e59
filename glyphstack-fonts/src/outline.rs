//! Glyph outline extraction.
//!
//! Defines [`OutlineSink`], a trait for receiving glyph outline commands.
//! This is our own trait (not `ttf_parser::OutlineBuilder`) so that
//! consumers do not need to depend on `ttf-parser` directly. Coordinates
//! are pre-scaled to pixels at the requested size.

/// Receiver for glyph outline commands.
///
/// Coordinates are in pixels, Y-up (font convention), snapped to the
/// 1/64-pixel grid.
pub trait OutlineSink {
    /// Start a new contour at the given point.
    fn move_to(&mut self, x: f64, y: f64);
    /// Draw a straight line to the given point.
    fn line_to(&mut self, x: f64, y: f64);
    /// Draw a quadratic Bézier curve (TrueType-style).
    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64);
    /// Draw a cubic Bézier curve (CFF/OpenType-style).
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);
    /// Close the current contour.
    fn close(&mut self);
}
