//! A font face scaled to a pixel size.

use crate::error::FontError;
use crate::faces;
use crate::outline::OutlineSink;

/// One face of a font collection, scaled to a target pixel size.
///
/// Borrows the font blob for the duration of one encoding pass; nothing is
/// retained after the face is dropped. Metrics and outline coordinates are
/// exposed in pixels, converted from design units at this boundary and
/// snapped to the 1/64-pixel grid.
pub struct ScaledFace<'a> {
    face: ttf_parser::Face<'a>,
    scale: f64,
}

impl<'a> ScaledFace<'a> {
    /// Open face `index` of `data` at the given EM size in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::UnreadableFont`] if the blob or the requested
    /// face cannot be parsed.
    pub fn new(data: &'a [u8], index: u32, pixel_size: f64) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(data, index).map_err(|_| FontError::UnreadableFont)?;
        let scale = pixel_size / f64::from(face.units_per_em());
        Ok(Self { face, scale })
    }

    /// Glyph index for a codepoint. `None` when the codepoint is not
    /// covered (including maps to glyph 0, the missing-glyph slot).
    #[must_use]
    pub fn glyph_index(&self, codepoint: u32) -> Option<u16> {
        let ch = char::from_u32(codepoint)?;
        self.face
            .glyph_index(ch)
            .map(|gid| gid.0)
            .filter(|&gid| gid != 0)
    }

    /// Horizontal advance in whole pixels (26.6 value truncated).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a 26.6 advance at text sizes is far below i32::MAX"
    )]
    #[must_use]
    pub fn advance(&self, glyph_id: u16) -> i32 {
        let units = self
            .face
            .glyph_hor_advance(ttf_parser::GlyphId(glyph_id))
            .unwrap_or(0);
        let advance_26_6 = (f64::from(units) * self.scale * 64.0).round() as i32;
        advance_26_6 / 64
    }

    /// Face ascender in whole pixels, rounded up.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scaled face metrics at text sizes are far below i32::MAX"
    )]
    #[must_use]
    pub fn ascender(&self) -> i32 {
        (f64::from(self.face.ascender()) * self.scale).ceil() as i32
    }

    /// Face descender in whole pixels (negative), rounded down.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scaled face metrics at text sizes are far below i32::MAX"
    )]
    #[must_use]
    pub fn descender(&self) -> i32 {
        (f64::from(self.face.descender()) * self.scale).floor() as i32
    }

    /// Face line height in 26.6 units (whole pixels times 64), passed
    /// through to consumers unconverted.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        let units =
            i32::from(self.face.ascender()) - i32::from(self.face.descender())
                + i32::from(self.face.line_gap());
        (f64::from(units) * self.scale).round() * 64.0
    }

    /// Fontstack display name: `family style`, or just the family when
    /// the face reports no style.
    #[must_use]
    pub fn fontstack_name(&self) -> String {
        let family = faces::family_name(&self.face).unwrap_or_default();
        match faces::style_name(&self.face) {
            Some(style) => format!("{family} {style}"),
            None => family,
        }
    }

    /// Decompose a glyph's outline into `sink`, in pixel coordinates.
    ///
    /// Returns `false` when the glyph has no outline (missing, empty like
    /// a space, or a non-outline format such as an embedded bitmap).
    pub fn outline(&self, glyph_id: u16, sink: &mut dyn OutlineSink) -> bool {
        let mut adapter = PixelAdapter {
            sink,
            scale: self.scale,
        };
        self.face
            .outline_glyph(ttf_parser::GlyphId(glyph_id), &mut adapter)
            .is_some()
    }

}

/// Adapter from [`OutlineSink`] to `ttf_parser::OutlineBuilder`.
///
/// All coordinate conversion happens here: design units are scaled to
/// pixels and snapped to the 1/64-pixel grid.
struct PixelAdapter<'a> {
    sink: &'a mut dyn OutlineSink,
    scale: f64,
}

impl PixelAdapter<'_> {
    fn px(&self, v: f32) -> f64 {
        (f64::from(v) * self.scale * 64.0).round() / 64.0
    }
}

impl ttf_parser::OutlineBuilder for PixelAdapter<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.sink.move_to(self.px(x), self.px(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.sink.line_to(self.px(x), self.px(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.sink
            .quad_to(self.px(x1), self.px(y1), self.px(x), self.px(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.sink.curve_to(
            self.px(x1),
            self.px(y1),
            self.px(x2),
            self.px(y2),
            self.px(x),
            self.px(y),
        );
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

impl std::fmt::Debug for ScaledFace<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaledFace")
            .field("units_per_em", &self.face.units_per_em())
            .field("scale", &self.scale)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fonts/DejaVuSans.ttf");

    fn fixture() -> Vec<u8> {
        std::fs::read(FIXTURE).expect("read fixture font")
    }

    struct Recorder {
        moves: usize,
        closes: usize,
        points: Vec<(f64, f64)>,
    }

    impl Recorder {
        const fn new() -> Self {
            Self {
                moves: 0,
                closes: 0,
                points: Vec::new(),
            }
        }
    }

    impl OutlineSink for Recorder {
        fn move_to(&mut self, x: f64, y: f64) {
            self.moves += 1;
            self.points.push((x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.points.push((x, y));
        }
        fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
            self.points.push((x1, y1));
            self.points.push((x, y));
        }
        fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
            self.points.push((x1, y1));
            self.points.push((x2, y2));
            self.points.push((x, y));
        }
        fn close(&mut self) {
            self.closes += 1;
        }
    }

    #[test]
    fn rejects_garbage() {
        let err = ScaledFace::new(b"not a font", 0, 24.0).expect_err("should fail");
        assert_eq!(err, FontError::UnreadableFont);
    }

    #[test]
    fn metrics_at_24px() {
        let data = fixture();
        let face = ScaledFace::new(&data, 0, 24.0).expect("parse");
        // DejaVu Sans: 2048 upem, hhea ascender 1901, descender -483.
        assert_eq!(face.ascender(), 23);
        assert_eq!(face.descender(), -6);
        assert!((face.line_height() - 28.0 * 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn advances_at_24px() {
        let data = fixture();
        let face = ScaledFace::new(&data, 0, 24.0).expect("parse");
        let a = face.glyph_index(u32::from('A')).expect("'A' covered");
        let space = face.glyph_index(0x20).expect("space covered");
        assert_eq!(face.advance(a), 16);
        assert_eq!(face.advance(space), 7);
    }

    #[test]
    fn uncovered_codepoints_have_no_index() {
        let data = fixture();
        let face = ScaledFace::new(&data, 0, 24.0).expect("parse");
        assert_eq!(face.glyph_index(0), None, "NUL maps to the missing glyph");
        assert_eq!(face.glyph_index(0xD800), None, "surrogates are not chars");
        assert_eq!(face.glyph_index(0xFFFE), None);
    }

    #[test]
    fn fontstack_name_joins_family_and_style() {
        let data = fixture();
        let face = ScaledFace::new(&data, 0, 24.0).expect("parse");
        assert_eq!(face.fontstack_name(), "DejaVu Sans Book");
    }

    #[test]
    fn letter_outline_decomposes_in_pixels() {
        let data = fixture();
        let face = ScaledFace::new(&data, 0, 24.0).expect("parse");
        let gid = face.glyph_index(u32::from('A')).expect("'A' covered");

        let mut rec = Recorder::new();
        assert!(face.outline(gid, &mut rec), "'A' should have an outline");
        // 'A' is two contours: the triangle counter and the outer shape.
        assert_eq!(rec.moves, 2);
        assert_eq!(rec.closes, 2);

        for &(x, y) in &rec.points {
            // Pixel-unit sanity: inside the 24px EM box (with slack for
            // overshoot) rather than thousands of design units.
            assert!(x.abs() < 48.0 && y.abs() < 48.0, "({x}, {y}) not in pixels");
            // Snapped to the 1/64-pixel grid.
            assert!(
                ((x * 64.0).round() - x * 64.0).abs() < 1e-9,
                "{x} not on the 1/64 grid"
            );
            assert!(
                ((y * 64.0).round() - y * 64.0).abs() < 1e-9,
                "{y} not on the 1/64 grid"
            );
        }
    }

    #[test]
    fn space_has_no_outline() {
        let data = fixture();
        let face = ScaledFace::new(&data, 0, 24.0).expect("parse");
        let gid = face.glyph_index(0x20).expect("space covered");
        let mut rec = Recorder::new();
        assert!(!face.outline(gid, &mut rec));
        assert_eq!(rec.moves, 0);
    }
}
