//! Range-encoding errors.

use std::fmt;

use glyphstack_fonts::FontError;

/// Errors that can occur while range-encoding a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The blob is not a parseable font, or a face inside it is
    /// unreadable. Any bad face aborts the whole job; no partial output
    /// is produced.
    UnreadableFont,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableFont => write!(f, "could not open font"),
        }
    }
}

impl std::error::Error for RangeError {}

impl From<FontError> for RangeError {
    fn from(err: FontError) -> Self {
        match err {
            FontError::UnreadableFont => Self::UnreadableFont,
        }
    }
}
