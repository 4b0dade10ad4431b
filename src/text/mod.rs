pub mod classify;
pub mod replace;
pub mod viewport;
pub mod wrap;

use thiserror::Error;

pub use classify::{ClassifiedLine, Cursor, EmitFilter, classify, cursor_position};
pub use replace::ReplacementRules;
pub use viewport::{fix_height, window_markers, window_start};
pub use wrap::{WrappedGuide, WrappedLine, wrap};

/// Words are separated by a single space in guide text.
pub const SEPARATOR: char = ' ';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("can't fit <{unit}> (plus a possible separator) in a width of {width}")]
    LineTooLong { unit: String, width: usize },
    #[error("expected exactly one character, got {input:?}")]
    InvalidCharacter { input: String },
    #[error("invalid replacement {replacement:?} for {key:?}")]
    InvalidReplacement { key: char, replacement: String },
}
