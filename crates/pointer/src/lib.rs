//! Zero-copy JSON Pointer (RFC 6901 subset) navigation.
//!
//! This crate locates the value addressed by a pointer string inside a
//! UTF-8 JSON document by scanning the token stream of the original byte
//! buffer, without materializing a parsed tree.
//!
//! # Pointer grammar
//!
//! The accepted syntax is the empty string (whole document) or a sequence
//! of `/`-prefixed segments. Each segment matches an object member name
//! literally (UTF-8 byte comparison) or, when the current value is an
//! array, is parsed as a base-10 non-negative integer index. The RFC escape
//! sequences `~0`/`~1` are deliberately not supported: any `~` in a pointer
//! is rejected as [`PointerError::MalformedPointer`] rather than silently
//! mis-resolved.
//!
//! # Example
//!
//! ```
//! use spillover_pointer::{find, as_i32};
//!
//! let doc = br#"{"a":{"b":[1,2,3]}}"#;
//! assert_eq!(as_i32(doc, "/a/b/1").unwrap(), 2);
//! assert!(find(doc, "/x").is_err());
//! ```

mod error;
mod find;
mod typed;

pub use error::PointerError;
pub use find::{find, ValueHandle};
pub use typed::{
    as_bool, as_f64, as_f64_array, as_i32, as_i32_array, as_str, as_str_array, raw,
    str_array_slices, StrArraySlices,
};
