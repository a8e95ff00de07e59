//! Range encoding: one serialized fontstack per face.

use glyphstack_fonts::{face_count, ScaledFace};
use glyphstack_pbf::{Fontstack, Glyph, Glyphs};

use crate::error::RangeError;
use crate::sdf::{render_glyph, SdfParams};

/// Encode every face of `font` over the inclusive codepoint range
/// `start..=end` as a serialized [`Glyphs`] buffer.
///
/// The caller guarantees `start <= end <= 65535`; this is the argument
/// contract of the outer interface and is not re-validated here. Glyph
/// records appear in ascending codepoint order; fontstacks appear in
/// collection face order. Codepoints the face does not cover produce no
/// record.
///
/// # Errors
///
/// Returns [`RangeError::UnreadableFont`] if the blob or any face in it
/// cannot be opened. No partial output is produced.
pub fn range(font: &[u8], start: u32, end: u32) -> Result<Vec<u8>, RangeError> {
    let params = SdfParams::default();
    let count = face_count(font);

    let mut glyphs = Glyphs {
        stacks: Vec::with_capacity(count as usize),
    };

    for index in 0..count {
        let face = ScaledFace::new(font, index, params.size)?;

        let mut stack = Fontstack {
            name: face.fontstack_name(),
            range: format!("{start}-{end}"),
            glyphs: Vec::new(),
        };

        for codepoint in start..=end {
            let Some(glyph_index) = face.glyph_index(codepoint) else {
                continue;
            };

            let glyph = render_glyph(&face, glyph_index, &params);
            stack.glyphs.push(Glyph {
                id: codepoint,
                width: glyph.width,
                height: glyph.height,
                left: glyph.left,
                // The serialized offset is relative to the ascender.
                top: glyph.top - glyph.ascender,
                advance: glyph.advance.max(0).unsigned_abs(),
                bitmap: glyph.bitmap,
            });
        }

        glyphs.stacks.push(stack);
    }

    Ok(glyphs.encode_to_bytes())
}
