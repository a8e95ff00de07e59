//! Geometry primitives for SDF glyph rasterization.
//!
//! This crate is independent of any font format: it operates on polylines
//! in pixel units. Glyph outlines arrive as [`Ring`]s (closed polygons),
//! get bucketed into a [`index::SegmentIndex`], and are queried per pixel
//! by the renderer. Curves are reduced to polylines up front by
//! [`flatten::CurveFlattener`].

pub mod bbox;
pub mod distance;
pub mod flatten;
pub mod index;
pub mod polygon;

pub use kurbo::Point;

/// A closed polygon: one contour of a glyph outline.
///
/// Closure (`first == last`) is the producer's responsibility; the
/// point-in-polygon test and the segment index both iterate consecutive
/// point pairs and rely on the closing edge being present.
pub type Ring = Vec<Point>;

/// A complete glyph outline: outer contours and holes, undistinguished.
pub type Rings = Vec<Ring>;
