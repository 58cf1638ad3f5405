//! Property store error type.

use spillover_json::JsonError;
use spillover_pointer::PointerError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// Empty property name, or similarly malformed structural input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Accessor called for an absent or tombstoned key.
    #[error("property not found: `{0}`")]
    PropertyNotFound(String),
    /// Stored kind does not match the requested accessor.
    #[error("type mismatch for `{name}`: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Array element index past the end of a stored array.
    #[error("array index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error(transparent)]
    Json(#[from] JsonError),
}
