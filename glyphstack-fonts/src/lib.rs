//! Font loading, face enumeration, and glyph outline extraction.
//!
//! This crate wraps `ttf-parser` to provide the font-facing half of the
//! SDF pipeline. It is intentionally independent of `glyphstack-geometry`:
//! outlines are reported through the [`OutlineSink`] trait as plain `f64`
//! pixel coordinates, and bridging to geometry types happens in the
//! consuming crate (`glyphstack-render`).
//!
//! Unit discipline: fonts store coordinates in design units; everything
//! downstream works in pixels. The conversion happens in exactly one
//! place, the outline/metrics boundary of [`ScaledFace`], where values are
//! scaled by `pixel_size / units_per_em` and snapped to the 1/64-pixel
//! grid (the resolution of 26.6 fixed-point).

pub mod error;
pub mod face;
pub mod faces;
pub mod outline;

pub use error::FontError;
pub use face::ScaledFace;
pub use faces::{face_count, load_faces, FaceInfo};
pub use outline::OutlineSink;
