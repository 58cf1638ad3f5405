//! JSON scanner/encoder error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonError {
    #[error("invalid JSON at byte {0}")]
    Invalid(usize),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("number out of range: `{0}`")]
    NumberOutOfRange(String),
}
