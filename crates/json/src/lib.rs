//! Byte-level JSON scanning and emission.
//!
//! This crate provides the shared JSON machinery for spillover: a token
//! scanner that operates directly on UTF-8 bytes without building a parsed
//! tree, and an encoder that writes JSON members through native primitives.
//!
//! # Overview
//!
//! - [`TokenKind`] - the JSON value kind detected at a buffer position
//! - [`skip_value`] - structurally skip one whole value
//! - [`find_ending_quote`] - locate the closing quote of a JSON string
//! - [`JsonEncoder`] - emit strings, numbers, booleans, null, raw values
//! - [`JsonError`] - scanner/encoder error type

mod encoder;
mod error;
mod scan;

pub use encoder::JsonEncoder;
pub use error::JsonError;
pub use scan::{
    find_ending_quote, parse_f64, parse_i32, skip_value, skip_whitespace, token_kind,
    unescape_string, TokenKind,
};
