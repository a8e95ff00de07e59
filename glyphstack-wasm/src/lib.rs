//! WebAssembly bindings for the SDF glyph range builder.
//!
//! Exposes the two host-facing operations to JavaScript: `range` returns
//! the serialized fontstack buffer for a codepoint range, and `load`
//! returns face metadata as a JSON string (family/style names plus the
//! covered codepoints per face).

use glyphstack_fonts::{load_faces, FaceInfo, FontError};
use glyphstack_render::{range as render_range, RangeError};
use wasm_bindgen::prelude::*;

/// Render `start..=end` for every face of `font` and return the
/// serialized fontstack buffer.
///
/// # Errors
///
/// Rejects with `"could not open font"` when the blob is unreadable, and
/// with a message when the range arguments are out of bounds.
#[wasm_bindgen]
pub fn range(font: &[u8], start: u32, end: u32) -> Result<Vec<u8>, JsError> {
    if end > 65535 || start > end {
        return Err(JsError::new("`start`/`end` must satisfy 0 <= start <= end <= 65535"));
    }
    encode_range(font, start, end).map_err(|e| JsError::new(&e.to_string()))
}

/// Enumerate the faces of `font` as a JSON string:
/// `[{"family_name", "style_name"?, "points": [...]}]`.
///
/// # Errors
///
/// Rejects with `"could not open font file"` when the blob is unreadable.
#[wasm_bindgen]
pub fn load(font: &[u8]) -> Result<String, JsError> {
    faces_json(font).map_err(|e| JsError::new(&e.to_string()))
}

fn encode_range(font: &[u8], start: u32, end: u32) -> Result<Vec<u8>, RangeError> {
    render_range(font, start, end)
}

fn faces_json(font: &[u8]) -> Result<String, FontError> {
    let faces = load_faces(font)?;
    let entries: Vec<String> = faces.iter().map(face_json).collect();
    Ok(format!("[{}]", entries.join(",")))
}

fn face_json(face: &FaceInfo) -> String {
    let mut fields = vec![format!(
        "\"family_name\":\"{}\"",
        escape_json(&face.family_name)
    )];
    if let Some(ref style) = face.style_name {
        fields.push(format!("\"style_name\":\"{}\"", escape_json(style)));
    }
    let points: Vec<String> = face.points.iter().map(u32::to_string).collect();
    fields.push(format!("\"points\":[{}]", points.join(",")));
    format!("{{{}}}", fields.join(","))
}

fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
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
    fn faces_json_lists_family_and_style() {
        let font = std::fs::read(FIXTURE).expect("read fixture font");
        let json = faces_json(&font).expect("faces");
        assert!(json.starts_with("[{"));
        assert!(json.contains("\"family_name\":\"DejaVu Sans\""));
        assert!(json.contains("\"style_name\":\"Book\""));
        assert!(json.contains("\"points\":["));
    }

    #[test]
    fn faces_json_rejects_garbage() {
        let err = faces_json(&[0u8; 16]).expect_err("garbage should fail");
        assert_eq!(err.to_string(), "could not open font file");
    }

    #[test]
    fn encode_range_produces_bytes() {
        let font = std::fs::read(FIXTURE).expect("read fixture font");
        let bytes = encode_range(&font, 65, 90).expect("range");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn escape_handles_quotes_and_controls() {
        assert_eq!(escape_json(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_json(r"a\b"), r"a\\b");
        assert_eq!(escape_json("a\nb"), "a\\u000ab");
        assert_eq!(escape_json("plain"), "plain");
    }
}
