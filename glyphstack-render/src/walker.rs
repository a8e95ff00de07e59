//! Outline walker: assembles closed rings from outline commands.

use glyphstack_fonts::OutlineSink;
use glyphstack_geometry::flatten::CurveFlattener;
use glyphstack_geometry::{Point, Ring, Rings};

/// An [`OutlineSink`] that accumulates a glyph outline as closed polygons,
/// flattening curve commands as they arrive.
///
/// Rings are closed on `close`, on a `move_to` that starts the next
/// contour, and at [`Self::finish`]: if the last vertex differs from the
/// first, the first is appended.
#[derive(Debug, Default)]
pub struct RingBuilder {
    flattener: CurveFlattener,
    rings: Rings,
    ring: Ring,
}

impl RingBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open contour and return the accumulated rings.
    #[must_use]
    pub fn finish(mut self) -> Rings {
        self.close_ring();
        self.rings
    }

    fn close_ring(&mut self) {
        let Some(&first) = self.ring.first() else {
            return;
        };
        if self.ring.last() != Some(&first) {
            self.ring.push(first);
        }
        self.rings.push(std::mem::take(&mut self.ring));
    }
}

impl OutlineSink for RingBuilder {
    fn move_to(&mut self, x: f64, y: f64) {
        self.close_ring();
        self.ring.push(Point::new(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ring.push(Point::new(x, y));
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        // The flattener re-emits the curve's start point; pop it off the
        // ring so it is not duplicated.
        let Some(start) = self.ring.pop() else {
            return;
        };
        self.flattener.quadratic(
            start,
            Point::new(x1, y1),
            Point::new(x, y),
            &mut self.ring,
        );
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        let Some(start) = self.ring.pop() else {
            return;
        };
        self.flattener.cubic(
            start,
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x, y),
            &mut self.ring,
        );
    }

    fn close(&mut self) {
        self.close_ring();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
