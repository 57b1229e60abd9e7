//! Error types for the palette engine.

use thiserror::Error;

/// Errors produced by color parsing and palette lookups.
///
/// A harmony that cannot fill every slot is not an error; generators
/// report that as `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwatchError {
    /// A hex string was not six hex digits after stripping a leading `#`.
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// A harmony identifier did not name one of the seven harmony types.
    #[error("unknown harmony type: {0}")]
    UnknownHarmony(String),

    /// Synthesis palette sizes must be at least 2.
    #[error("invalid palette size: {0}")]
    InvalidPaletteSize(usize),

    /// No corpus color matched the requested code or name.
    #[error("color not found: {0}")]
    ColorNotFound(String),
}
