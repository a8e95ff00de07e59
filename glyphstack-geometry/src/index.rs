//! Spatial index over outline segments.
//!
//! A uniform grid keyed by segment bounding boxes. Glyph outlines at text
//! sizes produce a few hundred segments in a canvas a few dozen pixels
//! across, so a grid with pixel-scale cells answers the renderer's
//! fixed-radius window queries in expected sub-linear time without the
//! balancing machinery of a general R-tree.
//!
//! The query is conservative: any segment whose bounding box intersects
//! the window is returned. A segment whose bbox misses the window is
//! separated from the window center by at least the window's half-extent
//! along some axis, so it can never be the nearest segment within that
//! radius.

use kurbo::Point;

use crate::bbox::BoundingBox;

/// Grid cell edge length in pixels.
const CELL_SIZE: f64 = 8.0;

/// A polyline edge with its cached bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    bbox: BoundingBox,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            bbox: BoundingBox::from_corners(start, end),
        }
    }

    /// The segment's axis-aligned bounding box.
    #[must_use]
    pub const fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
}

/// Uniform-grid index over [`Segment`]s.
#[derive(Debug)]
pub struct SegmentIndex {
    segments: Vec<Segment>,
    bounds: BoundingBox,
    cols: usize,
    rows: usize,
    /// `cols * rows` buckets of indices into `segments`.
    cells: Vec<Vec<u32>>,
}

impl SegmentIndex {
    /// Build an index over the given segments.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "cell counts are small positive integers derived from canvas size"
    )]
    #[must_use]
    pub fn build(segments: Vec<Segment>) -> Self {
        let mut bounds = BoundingBox::EMPTY;
        for segment in &segments {
            bounds.union(segment.bbox());
        }

        if !bounds.is_valid() {
            return Self {
                segments,
                bounds,
                cols: 0,
                rows: 0,
                cells: Vec::new(),
            };
        }

        let cols = ((bounds.width() / CELL_SIZE).ceil() as usize).max(1);
        let rows = ((bounds.height() / CELL_SIZE).ceil() as usize).max(1);
        let mut cells = vec![Vec::new(); cols * rows];

        for (i, segment) in segments.iter().enumerate() {
            let (c0, c1, r0, r1) = cell_span(&bounds, cols, rows, segment.bbox());
            for row in r0..=r1 {
                for col in c0..=c1 {
                    cells[row * cols + col].push(i as u32);
                }
            }
        }

        Self {
            segments,
            bounds,
            cols,
            rows,
            cells,
        }
    }

    /// Number of indexed segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the index holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All segments whose bounding box intersects `window`.
    ///
    /// Each segment is returned at most once, in insertion order.
    #[must_use]
    pub fn query(&self, window: &BoundingBox) -> Vec<&Segment> {
        if self.cells.is_empty() || !self.bounds.intersects(window) {
            return Vec::new();
        }

        let (c0, c1, r0, r1) = cell_span(&self.bounds, self.cols, self.rows, window);
        let mut hits: Vec<u32> = Vec::new();
        for row in r0..=r1 {
            for col in c0..=c1 {
                for &id in &self.cells[row * self.cols + col] {
                    let segment = &self.segments[id as usize];
                    if segment.bbox().intersects(window) {
                        hits.push(id);
                    }
                }
            }
        }

        // A segment spanning several cells appears once per cell.
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter()
            .map(|id| &self.segments[id as usize])
            .collect()
    }
}

/// Clamped inclusive cell range covered by `bb` within the grid bounds.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "coordinates are clamped non-negative before conversion"
)]
fn cell_span(
    bounds: &BoundingBox,
    cols: usize,
    rows: usize,
    bb: &BoundingBox,
) -> (usize, usize, usize, usize) {
    let col = |x: f64| {
        let c = ((x - bounds.min_x) / CELL_SIZE).floor().max(0.0) as usize;
        c.min(cols - 1)
    };
    let row = |y: f64| {
        let r = ((y - bounds.min_y) / CELL_SIZE).floor().max(0.0) as usize;
        r.min(rows - 1)
    };
    (col(bb.min_x), col(bb.max_x), row(bb.min_y), row(bb.max_y))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
