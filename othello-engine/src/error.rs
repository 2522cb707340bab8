//! Error types shared across the engine.

use derive_more::{Display, Error};
use std::io;

/// A coordinate fell outside the 8x8 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display(fmt = "coordinate (col {}, row {}) is outside the board", col, row)]
pub struct OutOfRange {
    pub col: usize,
    pub row: usize,
}

/// What was wrong with a line of a save file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum FormatErrorKind {
    #[display(fmt = "line is missing")]
    MissingLine,
    #[display(fmt = "expected {} tokens, found {}", expected, found)]
    WrongTokenCount { expected: usize, found: usize },
    #[display(fmt = "token is not a valid value")]
    BadToken,
    #[display(fmt = "unexpected content after the last field")]
    TrailingData,
}

/// A save file did not match the fixed 11-line format.
/// `line` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display(fmt = "malformed save data at line {}: {}", line, kind)]
pub struct FormatError {
    pub line: usize,
    pub kind: FormatErrorKind,
}

/// Any failure surfaced by the engine's fallible operations.
#[derive(Debug, Display, Error)]
pub enum GameError {
    #[display(fmt = "{}", _0)]
    OutOfRange(OutOfRange),
    #[display(fmt = "{}", _0)]
    Format(FormatError),
    #[display(fmt = "I/O error: {}", _0)]
    Io(io::Error),
}

impl From<OutOfRange> for GameError {
    fn from(err: OutOfRange) -> Self {
        GameError::OutOfRange(err)
    }
}

impl From<FormatError> for GameError {
    fn from(err: FormatError) -> Self {
        GameError::Format(err)
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}
