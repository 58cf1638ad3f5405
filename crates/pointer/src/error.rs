//! Pointer resolution error type.

use spillover_json::{JsonError, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PointerError {
    /// Pointer does not start with `/`, contains a `~`, or an array segment
    /// is not a valid non-negative integer.
    #[error("malformed pointer `{0}`")]
    MalformedPointer(String),
    /// An object has no member matching a segment; carries the remaining
    /// unresolved path for diagnostics.
    #[error("property not found at `{0}`")]
    PropertyNotFound(String),
    /// Array segment index is past the end of the array.
    #[error("array index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// The resolved token does not match the requested extraction.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: TokenKind,
    },
    #[error(transparent)]
    Json(#[from] JsonError),
}
