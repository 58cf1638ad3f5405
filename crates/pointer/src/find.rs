//! Pointer resolution over the raw token stream.

use spillover_json::{find_ending_quote, skip_value, skip_whitespace, token_kind, TokenKind};

use crate::error::PointerError;

/// A positioned handle to a value inside a JSON document.
///
/// Returned by [`find`] instead of a materialized value so callers decode
/// only what they need.
#[derive(Debug, Clone, Copy)]
pub struct ValueHandle<'a> {
    /// The whole document the handle points into.
    pub doc: &'a [u8],
    /// Byte offset of the first byte of the value.
    pub start: usize,
    /// Token kind detected at `start`.
    pub kind: TokenKind,
}

impl<'a> ValueHandle<'a> {
    /// Returns the raw bytes of the addressed value.
    pub fn raw(&self) -> Result<&'a [u8], PointerError> {
        let end = skip_value(self.doc, self.start)?;
        Ok(&self.doc[self.start..end])
    }

    /// For string tokens, the contents between the quotes (still escaped).
    pub fn string_contents(&self) -> Result<&'a [u8], PointerError> {
        let start = self.start + 1;
        let end = find_ending_quote(self.doc, start)?;
        Ok(&self.doc[start..end])
    }
}

/// Locates the value addressed by `pointer` inside `json`.
///
/// An empty pointer resolves to the document root. A non-empty pointer must
/// start with `/`; any `~` is rejected (the RFC `~0`/`~1` escapes are not
/// part of the accepted grammar). Resolution is read-only over its input;
/// failures never leave state mutated.
///
/// # Errors
///
/// - [`PointerError::MalformedPointer`] - missing leading `/`, a `~`
///   anywhere, or a non-numeric segment applied to an array
/// - [`PointerError::PropertyNotFound`] - missing object member or a
///   scalar mid-path, with the remaining path in the message
/// - [`PointerError::IndexOutOfRange`] - array ends before the index
pub fn find<'a>(json: &'a [u8], pointer: &str) -> Result<ValueHandle<'a>, PointerError> {
    if pointer.contains('~') {
        return Err(PointerError::MalformedPointer(pointer.to_owned()));
    }
    let mut x = skip_whitespace(json, 0);
    if pointer.is_empty() {
        let kind = token_kind(json, x)?;
        return Ok(ValueHandle {
            doc: json,
            start: x,
            kind,
        });
    }
    if !pointer.starts_with('/') {
        return Err(PointerError::MalformedPointer(pointer.to_owned()));
    }
    let segments: Vec<&str> = pointer[1..].split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
        let kind = token_kind(json, x)?;
        match kind {
            TokenKind::Object => {
                x = resolve_member(json, x, segment, &segments[i..])?;
            }
            TokenKind::Array => {
                let index = parse_index(segment, pointer)?;
                x = resolve_element(json, x, index)?;
            }
            _ => {
                return Err(PointerError::PropertyNotFound(remaining_path(
                    &segments[i..],
                )))
            }
        }
    }
    let kind = token_kind(json, x)?;
    Ok(ValueHandle {
        doc: json,
        start: x,
        kind,
    })
}

fn remaining_path(segments: &[&str]) -> String {
    let mut out = String::new();
    for seg in segments {
        out.push('/');
        out.push_str(seg);
    }
    out
}

fn parse_index(segment: &str, pointer: &str) -> Result<usize, PointerError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PointerError::MalformedPointer(pointer.to_owned()));
    }
    segment
        .parse()
        .map_err(|_| PointerError::MalformedPointer(pointer.to_owned()))
}

/// Searches the members of the object starting at `x` (which must point at
/// `{`) in document order for `segment`, returning the offset of the
/// matching member's value.
fn resolve_member(
    json: &[u8],
    x: usize,
    segment: &str,
    remaining: &[&str],
) -> Result<usize, PointerError> {
    let mut x = x + 1;
    loop {
        x = skip_whitespace(json, x);
        match json.get(x) {
            None => return Err(spillover_json::JsonError::UnexpectedEof.into()),
            Some(b'}') => return Err(PointerError::PropertyNotFound(remaining_path(remaining))),
            Some(b'"') => {
                let key_start = x + 1;
                let key_end = find_ending_quote(json, key_start)?;
                let hit = &json[key_start..key_end] == segment.as_bytes();
                x = skip_whitespace(json, key_end + 1);
                if json.get(x) != Some(&b':') {
                    return Err(spillover_json::JsonError::Invalid(x).into());
                }
                x = skip_whitespace(json, x + 1);
                if hit {
                    return Ok(x);
                }
                x = skip_value(json, x)?;
                x = skip_whitespace(json, x);
                match json.get(x) {
                    Some(b',') => x += 1,
                    Some(b'}') => {
                        return Err(PointerError::PropertyNotFound(remaining_path(remaining)))
                    }
                    _ => return Err(spillover_json::JsonError::Invalid(x).into()),
                }
            }
            Some(_) => return Err(spillover_json::JsonError::Invalid(x).into()),
        }
    }
}

/// Skips `index` sibling elements of the array starting at `x` (which must
/// point at `[`), structurally skipping whole values, and returns the
/// offset of the target element.
fn resolve_element(json: &[u8], x: usize, index: usize) -> Result<usize, PointerError> {
    let mut x = skip_whitespace(json, x + 1);
    if json.get(x) == Some(&b']') {
        return Err(PointerError::IndexOutOfRange { index, len: 0 });
    }
    let mut count = 0usize;
    loop {
        if count == index {
            return Ok(x);
        }
        x = skip_value(json, x)?;
        count += 1;
        x = skip_whitespace(json, x);
        match json.get(x) {
            Some(b',') => x = skip_whitespace(json, x + 1),
            // hit the end: `count` is the full array length
            Some(b']') => return Err(PointerError::IndexOutOfRange { index, len: count }),
            None => return Err(spillover_json::JsonError::UnexpectedEof.into()),
            Some(_) => return Err(spillover_json::JsonError::Invalid(x).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &[u8] = br#"{"a":{"b":[1,2,3]},"s":"txt","t":true,"n":null}"#;

    #[test]
    fn test_root() {
        let handle = find(DOC, "").unwrap();
        assert_eq!(handle.start, 0);
        assert_eq!(handle.kind, TokenKind::Object);
        assert_eq!(handle.raw().unwrap(), DOC);
    }

    #[test]
    fn test_nested_array_element() {
        let handle = find(DOC, "/a/b/1").unwrap();
        assert_eq!(handle.kind, TokenKind::Number);
        assert_eq!(handle.raw().unwrap(), b"2");
    }

    #[test]
    fn test_object_member() {
        let handle = find(DOC, "/s").unwrap();
        assert_eq!(handle.kind, TokenKind::String);
        assert_eq!(handle.raw().unwrap(), br#""txt""#);
    }

    #[test]
    fn test_missing_member() {
        match find(DOC, "/x") {
            Err(PointerError::PropertyNotFound(path)) => assert_eq!(path, "/x"),
            other => panic!("expected PropertyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_member_reports_remaining_path() {
        match find(DOC, "/a/z/deep") {
            Err(PointerError::PropertyNotFound(path)) => assert_eq!(path, "/z/deep"),
            other => panic!("expected PropertyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_index_out_of_range() {
        match find(DOC, "/a/b/9") {
            Err(PointerError::IndexOutOfRange { index: 9, len: 3 }) => {}
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
        let empty = br#"{"e":[]}"#;
        match find(empty, "/e/0") {
            Err(PointerError::IndexOutOfRange { index: 0, len: 0 }) => {}
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_leading_slash() {
        assert!(matches!(
            find(DOC, "x"),
            Err(PointerError::MalformedPointer(_))
        ));
    }

    #[test]
    fn test_tilde_rejected() {
        assert!(matches!(
            find(DOC, "/a~0b"),
            Err(PointerError::MalformedPointer(_))
        ));
        assert!(matches!(
            find(DOC, "/a~1b"),
            Err(PointerError::MalformedPointer(_))
        ));
    }

    #[test]
    fn test_non_numeric_array_segment() {
        assert!(matches!(
            find(DOC, "/a/b/x"),
            Err(PointerError::MalformedPointer(_))
        ));
    }

    #[test]
    fn test_scalar_mid_path() {
        assert!(matches!(
            find(DOC, "/s/inner"),
            Err(PointerError::PropertyNotFound(_))
        ));
    }

    #[test]
    fn test_whitespace_tolerant() {
        let doc = b" { \"a\" : [ 10 , 20 ] } ";
        let handle = find(doc, "/a/1").unwrap();
        assert_eq!(handle.raw().unwrap(), b"20");
    }

    #[test]
    fn test_key_skipped_by_structural_skip() {
        // earlier member value contains the searched key as text
        let doc = br#"{"a":"b","b":1}"#;
        let handle = find(doc, "/b").unwrap();
        assert_eq!(handle.raw().unwrap(), b"1");
    }
}
