//! Protocol-buffer schema for SDF glyph ranges.
//!
//! Mirrors the `glyphs.proto` schema consumed by GPU map renderers: a
//! [`Glyphs`] root holding one [`Fontstack`] per face, each with its glyph
//! records. The messages are proto2 (`required` fields, explicit `bitmap`
//! presence) and the tag numbers are the wire contract; do not renumber.
//!
//! ```proto
//! message glyphs { repeated fontstack stacks = 1; }
//! message fontstack {
//!     required string name   = 1;
//!     required string range  = 2;
//!     repeated glyph  glyphs = 3;
//! }
//! message glyph {
//!     required uint32 id      = 1;
//!     optional bytes  bitmap  = 2;
//!     required uint32 width   = 3;
//!     required uint32 height  = 4;
//!     required sint32 left    = 5;
//!     required sint32 top     = 6;
//!     required uint32 advance = 7;
//! }
//! ```

use prost::Message;

// Re-export so consumers decode without naming prost themselves.
pub use prost;

/// Root message: one fontstack per face, in collection order.
#[derive(Clone, PartialEq, Message)]
pub struct Glyphs {
    #[prost(message, repeated, tag = "1")]
    pub stacks: Vec<Fontstack>,
}

/// All glyphs of one face for one codepoint range.
#[derive(Clone, PartialEq, Message)]
pub struct Fontstack {
    /// Display name: `family style` (style omitted when absent).
    #[prost(string, required, tag = "1")]
    pub name: String,
    /// Codepoint range label, `"{start}-{end}"`.
    #[prost(string, required, tag = "2")]
    pub range: String,
    /// Glyph records in ascending codepoint order.
    #[prost(message, repeated, tag = "3")]
    pub glyphs: Vec<Glyph>,
}

/// One rendered glyph.
#[derive(Clone, PartialEq, Message)]
pub struct Glyph {
    /// Unicode codepoint.
    #[prost(uint32, required, tag = "1")]
    pub id: u32,
    /// SDF bitmap, `(width + 2·buffer) · (height + 2·buffer)` bytes,
    /// row-major with the top row first. Present iff `width > 0`.
    #[prost(bytes = "vec", optional, tag = "2")]
    pub bitmap: Option<Vec<u8>>,
    /// Tight bbox width in pixels, excluding the buffer.
    #[prost(uint32, required, tag = "3")]
    pub width: u32,
    /// Tight bbox height in pixels, excluding the buffer.
    #[prost(uint32, required, tag = "4")]
    pub height: u32,
    /// Horizontal offset from the pen origin to the bbox's left edge.
    #[prost(sint32, required, tag = "5")]
    pub left: i32,
    /// Vertical offset of the bbox's top edge, relative to the face
    /// ascender (`tight_top − ascender`).
    #[prost(sint32, required, tag = "6")]
    pub top: i32,
    /// Horizontal advance in pixels.
    #[prost(uint32, required, tag = "7")]
    pub advance: u32,
}

impl Glyphs {
    /// Serialize to the wire encoding.
    #[must_use]
    pub fn encode_to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
