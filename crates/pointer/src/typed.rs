//! Typed extraction over resolved pointers.
//!
//! Each getter re-runs [`find`] and asserts that the resolved token kind
//! matches the request, failing with [`PointerError::TypeMismatch`] instead
//! of coercing. Array getters materialize eagerly; pointer documents are
//! single-API-payload scale.

use std::borrow::Cow;
use std::str;

use spillover_json::{
    parse_f64, parse_i32, skip_value, skip_whitespace, token_kind, unescape_string, TokenKind,
};

use crate::error::PointerError;
use crate::find::{find, ValueHandle};

/// Returns the raw bytes of the addressed value.
pub fn raw<'a>(json: &'a [u8], pointer: &str) -> Result<&'a [u8], PointerError> {
    find(json, pointer)?.raw()
}

/// Resolves `pointer` to a JSON string and unescapes its contents.
pub fn as_str<'a>(json: &'a [u8], pointer: &str) -> Result<Cow<'a, str>, PointerError> {
    let handle = find(json, pointer)?;
    match handle.kind {
        TokenKind::String => Ok(unescape_string(handle.string_contents()?)?),
        found => Err(PointerError::TypeMismatch {
            expected: "string",
            found,
        }),
    }
}

/// Resolves `pointer` to an integral JSON number.
pub fn as_i32(json: &[u8], pointer: &str) -> Result<i32, PointerError> {
    let handle = find(json, pointer)?;
    match handle.kind {
        TokenKind::Number => {
            parse_i32(handle.raw()?).map_err(|_| PointerError::TypeMismatch {
                expected: "int32",
                found: TokenKind::Number,
            })
        }
        found => Err(PointerError::TypeMismatch {
            expected: "int32",
            found,
        }),
    }
}

/// Resolves `pointer` to a JSON number.
pub fn as_f64(json: &[u8], pointer: &str) -> Result<f64, PointerError> {
    let handle = find(json, pointer)?;
    match handle.kind {
        TokenKind::Number => Ok(parse_f64(handle.raw()?)?),
        found => Err(PointerError::TypeMismatch {
            expected: "number",
            found,
        }),
    }
}

/// Resolves `pointer` to a JSON boolean.
pub fn as_bool(json: &[u8], pointer: &str) -> Result<bool, PointerError> {
    let handle = find(json, pointer)?;
    match handle.kind {
        TokenKind::True => Ok(true),
        TokenKind::False => Ok(false),
        found => Err(PointerError::TypeMismatch {
            expected: "boolean",
            found,
        }),
    }
}

/// Resolves `pointer` to an array of strings, materialized eagerly.
///
/// An empty array yields an empty vector, not an error.
pub fn as_str_array(json: &[u8], pointer: &str) -> Result<Vec<String>, PointerError> {
    let handle = expect_array(json, pointer, "array of strings")?;
    let mut out = Vec::new();
    walk_elements(json, handle.start, |eh| match eh.kind {
        TokenKind::String => {
            out.push(unescape_string(eh.string_contents()?)?.into_owned());
            Ok(())
        }
        found => Err(PointerError::TypeMismatch {
            expected: "string",
            found,
        }),
    })?;
    Ok(out)
}

/// Resolves `pointer` to an array of integral numbers, materialized eagerly.
pub fn as_i32_array(json: &[u8], pointer: &str) -> Result<Vec<i32>, PointerError> {
    let handle = expect_array(json, pointer, "array of int32")?;
    let mut out = Vec::new();
    walk_elements(json, handle.start, |eh| match eh.kind {
        TokenKind::Number => {
            out.push(parse_i32(eh.raw()?).map_err(|_| PointerError::TypeMismatch {
                expected: "int32",
                found: TokenKind::Number,
            })?);
            Ok(())
        }
        found => Err(PointerError::TypeMismatch {
            expected: "int32",
            found,
        }),
    })?;
    Ok(out)
}

/// Resolves `pointer` to an array of numbers, materialized eagerly.
pub fn as_f64_array(json: &[u8], pointer: &str) -> Result<Vec<f64>, PointerError> {
    let handle = expect_array(json, pointer, "array of numbers")?;
    let mut out = Vec::new();
    walk_elements(json, handle.start, |eh| match eh.kind {
        TokenKind::Number => {
            out.push(parse_f64(eh.raw()?)?);
            Ok(())
        }
        found => Err(PointerError::TypeMismatch {
            expected: "number",
            found,
        }),
    })?;
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
enum Span {
    /// Slice aliased directly into the source document.
    Doc { start: usize, len: usize },
    /// Slice into the contiguous backing buffer of unescaped copies.
    Owned { start: usize, len: usize },
}

/// String-array elements as zero-copy slices into the original buffer.
///
/// Built in two passes: a counting pass to size the output, then a
/// collection pass recording start offset and length per element. Elements
/// are aliased directly into the source document; only elements containing
/// escapes are copied, into one contiguous backing buffer.
#[derive(Debug)]
pub struct StrArraySlices<'a> {
    doc: &'a [u8],
    spans: Vec<Span>,
    owned: Vec<u8>,
}

impl<'a> StrArraySlices<'a> {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        let bytes = match *self.spans.get(i)? {
            Span::Doc { start, len } => &self.doc[start..start + len],
            Span::Owned { start, len } => &self.owned[start..start + len],
        };
        Some(str::from_utf8(bytes).unwrap_or(""))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Batch variant of [`as_str_array`] yielding borrowed slices.
pub fn str_array_slices<'a>(
    json: &'a [u8],
    pointer: &str,
) -> Result<StrArraySlices<'a>, PointerError> {
    let handle = expect_array(json, pointer, "array of strings")?;
    // pass 1: count and type-check to size the span table exactly
    let count = walk_elements(json, handle.start, |eh| match eh.kind {
        TokenKind::String => Ok(()),
        found => Err(PointerError::TypeMismatch {
            expected: "string",
            found,
        }),
    })?;
    let mut spans = Vec::with_capacity(count);
    let mut owned = Vec::new();
    // pass 2: record offsets, copying only escaped elements
    walk_elements(json, handle.start, |eh| {
        let contents = eh.string_contents()?;
        if contents.contains(&b'\\') {
            let text = unescape_string(contents)?;
            let start = owned.len();
            owned.extend_from_slice(text.as_bytes());
            spans.push(Span::Owned {
                start,
                len: text.len(),
            });
        } else {
            spans.push(Span::Doc {
                start: eh.start + 1,
                len: contents.len(),
            });
        }
        Ok(())
    })?;
    Ok(StrArraySlices {
        doc: json,
        spans,
        owned,
    })
}

fn expect_array<'a>(
    json: &'a [u8],
    pointer: &str,
    expected: &'static str,
) -> Result<ValueHandle<'a>, PointerError> {
    let handle = find(json, pointer)?;
    match handle.kind {
        TokenKind::Array => Ok(handle),
        found => Err(PointerError::TypeMismatch { expected, found }),
    }
}

/// Visits each element of the array starting at `x` (pointing at `[`),
/// returning the element count.
fn walk_elements<F>(doc: &[u8], x: usize, mut f: F) -> Result<usize, PointerError>
where
    F: FnMut(&ValueHandle<'_>) -> Result<(), PointerError>,
{
    let mut x = skip_whitespace(doc, x + 1);
    if doc.get(x) == Some(&b']') {
        return Ok(0);
    }
    let mut count = 0usize;
    loop {
        let kind = token_kind(doc, x)?;
        f(&ValueHandle {
            doc,
            start: x,
            kind,
        })?;
        count += 1;
        x = skip_value(doc, x)?;
        x = skip_whitespace(doc, x);
        match doc.get(x) {
            Some(b',') => x = skip_whitespace(doc, x + 1),
            Some(b']') => return Ok(count),
            None => return Err(spillover_json::JsonError::UnexpectedEof.into()),
            Some(_) => return Err(spillover_json::JsonError::Invalid(x).into()),
        }
    }
}
