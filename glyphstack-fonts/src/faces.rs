//! Face enumeration over a font collection.

use std::collections::BTreeSet;

use crate::error::FontError;

/// Metadata for one face of a font collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceInfo {
    /// Family name (name table ID 1).
    pub family_name: String,
    /// Style/subfamily name (name table ID 2), when the face reports one.
    pub style_name: Option<String>,
    /// Covered codepoints, sorted and deduplicated. Codepoint 0 and
    /// entries mapping to the missing glyph are excluded.
    pub points: Vec<u32>,
}

/// Enumerate the faces of a font or TrueType collection.
///
/// Faces are reported in collection order. For a plain (non-collection)
/// font, exactly one face is reported.
///
/// # Errors
///
/// Returns [`FontError::UnreadableFont`] if the blob is not a font, or if
/// any face index fails to parse. A bad face aborts the whole enumeration
/// rather than being skipped.
pub fn load_faces(data: &[u8]) -> Result<Vec<FaceInfo>, FontError> {
    let count = face_count(data);
    let mut faces = Vec::with_capacity(count as usize);

    for index in 0..count {
        let face = ttf_parser::Face::parse(data, index).map_err(|_| FontError::UnreadableFont)?;
        faces.push(FaceInfo {
            family_name: family_name(&face).unwrap_or_default(),
            style_name: style_name(&face),
            points: covered_codepoints(&face),
        });
    }

    Ok(faces)
}

/// Number of faces in a font blob: the collection size for a TrueType
/// collection, otherwise 1. Does not validate the faces themselves.
#[must_use]
pub fn face_count(data: &[u8]) -> u32 {
    ttf_parser::fonts_in_collection(data).unwrap_or(1)
}

/// Family name from the name table.
pub(crate) fn family_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    name_string(face, ttf_parser::name_id::FAMILY)
}

/// Style (subfamily) name from the name table.
pub(crate) fn style_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    name_string(face, ttf_parser::name_id::SUBFAMILY)
}

fn name_string(face: &ttf_parser::Face<'_>, name_id: u16) -> Option<String> {
    let names = face.names();
    for i in 0..names.len() {
        let Some(name) = names.get(i) else { continue };
        if name.name_id != name_id || !name.is_unicode() {
            continue;
        }
        return name.to_string().filter(|value| !value.is_empty());
    }
    None
}

/// All codepoints with a real glyph, across every Unicode cmap subtable.
fn covered_codepoints(face: &ttf_parser::Face<'_>) -> Vec<u32> {
    let mut points = BTreeSet::new();

    if let Some(cmap) = face.tables().cmap {
        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|codepoint| {
                if codepoint == 0 {
                    return;
                }
                // Subtable ranges can include entries that resolve to the
                // missing glyph; those are not coverage.
                if subtable
                    .glyph_index(codepoint)
                    .is_some_and(|gid| gid.0 != 0)
                {
                    points.insert(codepoint);
                }
            });
        }
    }

    points.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fonts/DejaVuSans.ttf");

    #[test]
    fn single_font_reports_one_face() {
        let data = std::fs::read(FIXTURE).expect("read fixture font");
        let faces = load_faces(&data).expect("load");
        assert_eq!(faces.len(), 1);

        let face = &faces[0];
        assert_eq!(face.family_name, "DejaVu Sans");
        assert_eq!(face.style_name.as_deref(), Some("Book"));
    }

    #[test]
    fn points_are_sorted_unique_and_nonzero() {
        let data = std::fs::read(FIXTURE).expect("read fixture font");
        let faces = load_faces(&data).expect("load");
        let points = &faces[0].points;

        assert!(points.len() > 1000, "DejaVu covers thousands of codepoints");
        assert!(points.windows(2).all(|w| w[0] < w[1]), "sorted and unique");
        assert!(!points.contains(&0));
        assert!(points.contains(&u32::from('A')));
        assert!(points.contains(&u32::from(' ')));
    }

    #[test]
    fn malformed_blob_is_rejected() {
        let err = load_faces(&[0u8; 64]).expect_err("garbage should fail");
        assert_eq!(err.to_string(), "could not open font file");
    }

    #[test]
    fn empty_blob_is_rejected() {
        assert!(load_faces(&[]).is_err());
    }
}
