//! Font loading errors.

use std::fmt;

/// Errors that can occur when opening a font collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    /// The blob is not a parseable TrueType/OpenType font or collection,
    /// or a face index inside it is unreadable.
    UnreadableFont,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableFont => write!(f, "could not open font file"),
        }
    }
}

impl std::error::Error for FontError {}
