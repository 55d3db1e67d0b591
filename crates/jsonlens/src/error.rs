//! Error taxonomy: structural syntax errors, access bounds errors, and
//! numeric conversion errors.
//!
//! Syntax errors are fatal to the parse they occur in: the document is
//! poisoned and further resumption re-raises the stored error, while
//! entries that were already materialized stay readable. Bounds and numeric
//! errors are recoverable and local to the access that produced them.

use alloc::string::String;

use thiserror::Error;

/// The reason a [`SyntaxError`] was raised.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated array or object")]
    UnterminatedContainer,
    #[error("trailing comma")]
    TrailingComma,
    #[error("invalid number format")]
    InvalidNumberFormat,
    #[error("unexpected data after the document")]
    TrailingGarbage,
    #[error("control character inside string")]
    ControlCharacterInString,
    /// Raised only in validating mode.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// Raised only in validating mode.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// Raised only in validating mode with surrogate pairing checks on.
    #[error("unpaired surrogate escape")]
    UnpairedSurrogate,
}

/// A structural grammar violation, fatal to the parse it occurred in.
///
/// Carries the byte offset at which the violation was detected. Offsets are
/// the natural coordinate for a random-access byte parser; use
/// [`line_column`](Self::line_column) to translate one for display.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// Byte offset into the input at which the violation was detected.
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Computes the 1-based line and column of this error within `input`.
    ///
    /// `input` should be the buffer the failing parse ran over; offsets past
    /// its end are clamped.
    #[must_use]
    pub fn line_column(&self, input: &[u8]) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for &b in &input[..self.offset.min(input.len())] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

/// An index or key that is not present in a fully materialized container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    #[error("index {0} out of bounds (length {1})")]
    Index(usize, usize),
    #[error("key {0:?} not found")]
    Key(String),
}

/// The numeric literal cannot be represented in the requested target type.
///
/// Surfaced at the point of conversion only; the rest of the document is
/// unaffected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// The literal has a fraction or exponent part.
    #[error("not an integer literal")]
    NotAnInteger,
    /// The literal is integral but does not fit the target type.
    #[error("out of range for the target type")]
    OutOfRange,
}

/// Union of the error kinds a container access can surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Numeric(#[from] NumericError),
}
