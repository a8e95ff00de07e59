//! Per-glyph SDF rendering.

use glyphstack_fonts::ScaledFace;
use glyphstack_geometry::bbox::BoundingBox;
use glyphstack_geometry::distance::segment_distance_squared;
use glyphstack_geometry::index::{Segment, SegmentIndex};
use glyphstack_geometry::{polygon, Point, Rings};

use crate::walker::RingBuilder;

/// Half-extent, in pixels, of the square window queried around each
/// sample point. Distances at or beyond this radius saturate to "far";
/// together with the 256/radius rescale it fixes the SDF falloff range.
pub const QUERY_RADIUS: f64 = 8.0;

/// Samples are taken at pixel centers.
const SAMPLE_OFFSET: f64 = 0.5;

/// Rendering parameters.
///
/// The defaults are the values the map-rendering toolchain expects;
/// bitmaps rendered with different parameters are not interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct SdfParams {
    /// EM size in pixels.
    pub size: f64,
    /// Padding pixels around the tight bbox, so the falloff beyond the
    /// outline stays representable.
    pub buffer: u32,
    /// Fraction of the 8-bit range reserved for outside distances; the
    /// glyph boundary sits at byte value `255 − cutoff · 256`.
    pub cutoff: f64,
}

impl Default for SdfParams {
    fn default() -> Self {
        Self {
            size: 24.0,
            buffer: 3,
            cutoff: 0.25,
        }
    }
}

/// Attributes produced for one rendered glyph.
///
/// `width`, `height`, `left` and `top` describe the tight bbox of the
/// outline; `bitmap` covers the buffered canvas and is present iff the
/// bbox is non-degenerate. `line_height` stays in 26.6 units (consumer
/// contract); everything else is in pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphInfo {
    /// Font-internal glyph index (diagnostic; not serialized).
    pub glyph_index: u16,
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    pub advance: i32,
    pub ascender: i32,
    pub descender: i32,
    pub line_height: f64,
    pub bitmap: Option<Vec<u8>>,
}

/// Render one glyph of `face` as an SDF bitmap.
///
/// Always produces a record: glyphs without a usable outline (spaces,
/// missing glyph data, non-outline formats) come back with metrics set,
/// zero dimensions, and no bitmap.
#[must_use]
pub fn render_glyph(face: &ScaledFace<'_>, glyph_index: u16, params: &SdfParams) -> GlyphInfo {
    let mut glyph = GlyphInfo {
        glyph_index,
        advance: face.advance(glyph_index),
        ascender: face.ascender(),
        descender: face.descender(),
        line_height: face.line_height(),
        ..GlyphInfo::default()
    };

    let mut builder = RingBuilder::new();
    if !face.outline(glyph_index, &mut builder) {
        return glyph;
    }
    let mut rings = builder.finish();
    if rings.is_empty() {
        return glyph;
    }

    render_rings(&mut rings, &mut glyph, params);
    glyph
}

/// Rasterize a decomposed outline into `glyph`.
///
/// Steps, in contractual order: tight bbox (vertex extrema rounded to
/// integers), translation into the buffered canvas, segment indexing,
/// then the pixel sweep. Rings are translated in place. Degenerate
/// outlines (zero rounded width or height) leave `glyph` without a
/// bitmap and with zero dimensions.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "bbox extrema are pre-rounded and canvas-sized"
)]
pub fn render_rings(rings: &mut Rings, glyph: &mut GlyphInfo, params: &SdfParams) {
    let mut bounds = BoundingBox::EMPTY;
    for ring in rings.iter() {
        for point in ring {
            bounds.include_point(*point);
        }
    }
    if !bounds.is_valid() {
        return;
    }

    let bbox_xmin = bounds.min_x.round();
    let bbox_ymin = bounds.min_y.round();
    let bbox_xmax = bounds.max_x.round();
    let bbox_ymax = bounds.max_y.round();

    if bbox_xmax - bbox_xmin == 0.0 || bbox_ymax - bbox_ymin == 0.0 {
        return;
    }

    // Offset so the outline lies inside the buffered canvas.
    let buffer = f64::from(params.buffer);
    for ring in rings.iter_mut() {
        for point in ring {
            point.x += -bbox_xmin + buffer;
            point.y += -bbox_ymin + buffer;
        }
    }

    glyph.left = bbox_xmin as i32;
    glyph.top = bbox_ymax as i32;
    glyph.width = (bbox_xmax - bbox_xmin) as u32;
    glyph.height = (bbox_ymax - bbox_ymin) as u32;

    let mut segments = Vec::new();
    for ring in rings.iter() {
        for pair in ring.windows(2) {
            segments.push(Segment::new(pair[0], pair[1]));
        }
    }
    let index = SegmentIndex::build(segments);

    let buffered_width = glyph.width + 2 * params.buffer;
    let buffered_height = glyph.height + 2 * params.buffer;
    let mut bitmap = vec![0u8; (buffered_width * buffered_height) as usize];

    for y in 0..buffered_height {
        for x in 0..buffered_width {
            // The outline is Y-up; the bitmap is stored top row first.
            let ypos = buffered_height - y - 1;
            let i = (ypos * buffered_width + x) as usize;

            let sample = Point::new(
                f64::from(x) + SAMPLE_OFFSET,
                f64::from(y) + SAMPLE_OFFSET,
            );

            let mut d = min_distance(&index, sample, QUERY_RADIUS) * (256.0 / QUERY_RADIUS);

            // Negative inside.
            if polygon::contains(rings, sample) {
                d = -d;
            }

            // Shift the zero so a few negative values fit into 8 bits,
            // clamp, and invert: 255 is deep inside, 0 far outside.
            d += params.cutoff * 256.0;
            bitmap[i] = 255 - quantize(d);
        }
    }

    glyph.bitmap = Some(bitmap);
}

/// Distance from `p` to the nearest indexed segment, or infinity when no
/// segment lies within `radius`.
///
/// Candidates come from a conservative bbox window query; a segment whose
/// bbox misses the window is farther than `radius` along some axis and
/// can never win.
fn min_distance(index: &SegmentIndex, p: Point, radius: f64) -> f64 {
    let window = BoundingBox::around(p, radius);
    let squared_radius = radius * radius;

    let mut squared_distance = f64::INFINITY;
    for segment in index.query(&window) {
        let d = segment_distance_squared(p, segment.start, segment.end);
        if d < squared_distance && d < squared_radius {
            squared_distance = d;
        }
    }

    squared_distance.sqrt()
}

/// Clamp a shifted distance into `0..=255`, truncating the fraction
/// (not rounding): the boundary byte values depend on it.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped into the u8 range before conversion"
)]
fn quantize(d: f64) -> u8 {
    if d >= 255.0 {
        255
    } else if d <= 0.0 {
        0
    } else {
        d as u8
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
