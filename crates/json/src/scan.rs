//! Zero-copy JSON token scanning.
//!
//! All functions operate on a UTF-8 byte slice holding one JSON document
//! and an index into it. Nothing here materializes a value tree: values are
//! located, classified and skipped by walking the token stream in place.

use std::borrow::Cow;
use std::str;

use crate::error::JsonError;

/// The kind of JSON value found at a buffer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Object => "object",
            TokenKind::Array => "array",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
        };
        write!(f, "{name}")
    }
}

/// Advances `x` past any JSON whitespace.
pub fn skip_whitespace(data: &[u8], mut x: usize) -> usize {
    while x < data.len() {
        match data[x] {
            b' ' | b'\t' | b'\n' | b'\r' => x += 1,
            _ => break,
        }
    }
    x
}

/// Classifies the value starting at `x` from its first byte.
///
/// `x` must point at the first byte of the value (no leading whitespace).
pub fn token_kind(data: &[u8], x: usize) -> Result<TokenKind, JsonError> {
    if x >= data.len() {
        return Err(JsonError::UnexpectedEof);
    }
    match data[x] {
        b'{' => Ok(TokenKind::Object),
        b'[' => Ok(TokenKind::Array),
        b'"' => Ok(TokenKind::String),
        b't' => Ok(TokenKind::True),
        b'f' => Ok(TokenKind::False),
        b'n' => Ok(TokenKind::Null),
        b'-' | b'0'..=b'9' => Ok(TokenKind::Number),
        _ => Err(JsonError::Invalid(x)),
    }
}

/// Find the position of the closing `"` of a JSON string starting at `x`.
///
/// `x` must point to the first character after the opening `"`. The returned
/// index is the position of the closing `"` (exclusive of the contents).
///
/// Handles backslash escaping: `\"` inside the string does not terminate it.
pub fn find_ending_quote(data: &[u8], mut x: usize) -> Result<usize, JsonError> {
    let len = data.len();
    let mut prev: u8 = 0;
    while x < len {
        let ch = data[x];
        if ch == b'"' && prev != b'\\' {
            return Ok(x);
        }
        // double-backslash cancels the escape
        if ch == b'\\' && prev == b'\\' {
            prev = 0;
        } else {
            prev = ch;
        }
        x += 1;
    }
    Err(JsonError::Invalid(x))
}

/// Structurally skips one whole JSON value starting at `x`.
///
/// Objects and arrays are skipped wholesale by depth counting with string
/// awareness; strings via [`find_ending_quote`]; numbers and literals by
/// byte run. Returns the index one past the value.
pub fn skip_value(data: &[u8], x: usize) -> Result<usize, JsonError> {
    let x = skip_whitespace(data, x);
    if x >= data.len() {
        return Err(JsonError::UnexpectedEof);
    }
    match data[x] {
        b'"' => Ok(find_ending_quote(data, x + 1)? + 1),
        b'{' | b'[' => skip_container(data, x),
        b't' => skip_literal(data, x, b"true"),
        b'f' => skip_literal(data, x, b"false"),
        b'n' => skip_literal(data, x, b"null"),
        b'-' | b'0'..=b'9' => Ok(skip_number(data, x)),
        _ => Err(JsonError::Invalid(x)),
    }
}

fn skip_container(data: &[u8], start: usize) -> Result<usize, JsonError> {
    let mut depth = 0usize;
    let mut x = start;
    while x < data.len() {
        match data[x] {
            b'"' => {
                x = find_ending_quote(data, x + 1)?;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(x + 1);
                }
            }
            _ => {}
        }
        x += 1;
    }
    Err(JsonError::UnexpectedEof)
}

fn skip_literal(data: &[u8], x: usize, lit: &[u8]) -> Result<usize, JsonError> {
    let end = x + lit.len();
    if end > data.len() {
        return Err(JsonError::UnexpectedEof);
    }
    if &data[x..end] != lit {
        return Err(JsonError::Invalid(x));
    }
    Ok(end)
}

fn skip_number(data: &[u8], mut x: usize) -> usize {
    while x < data.len() {
        match data[x] {
            b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E' => x += 1,
            _ => break,
        }
    }
    x
}

/// Parses the raw bytes of a JSON number token as an `i32`.
///
/// Fractional or out-of-range numbers fail with
/// [`JsonError::NumberOutOfRange`]; the caller decides whether that is a
/// type mismatch.
pub fn parse_i32(bytes: &[u8]) -> Result<i32, JsonError> {
    let text = str::from_utf8(bytes).map_err(|_| JsonError::InvalidUtf8)?;
    text.parse::<i32>()
        .map_err(|_| JsonError::NumberOutOfRange(text.to_owned()))
}

/// Parses the raw bytes of a JSON number token as an `f64`.
pub fn parse_f64(bytes: &[u8]) -> Result<f64, JsonError> {
    let text = str::from_utf8(bytes).map_err(|_| JsonError::InvalidUtf8)?;
    text.parse::<f64>()
        .map_err(|_| JsonError::NumberOutOfRange(text.to_owned()))
}

/// Unescapes the contents of a JSON string (the bytes between the quotes).
///
/// Borrows the input when it contains no escapes; otherwise produces an
/// owned string. Handles the standard single-character escapes and
/// `\uXXXX`, including surrogate pairs.
pub fn unescape_string(contents: &[u8]) -> Result<Cow<'_, str>, JsonError> {
    if !contents.contains(&b'\\') {
        return str::from_utf8(contents)
            .map(Cow::Borrowed)
            .map_err(|_| JsonError::InvalidUtf8);
    }
    let mut out = String::with_capacity(contents.len());
    let mut x = 0;
    while x < contents.len() {
        let ch = contents[x];
        if ch != b'\\' {
            // copy the longest escape-free run in one go
            let run_start = x;
            while x < contents.len() && contents[x] != b'\\' {
                x += 1;
            }
            let run = str::from_utf8(&contents[run_start..x])
                .map_err(|_| JsonError::InvalidUtf8)?;
            out.push_str(run);
            continue;
        }
        x += 1;
        if x >= contents.len() {
            return Err(JsonError::UnexpectedEof);
        }
        match contents[x] {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let unit = parse_hex4(contents, x + 1)?;
                x += 4;
                if (0xD800..0xDC00).contains(&unit) {
                    // high surrogate, must be followed by `\uXXXX` low half
                    if x + 6 >= contents.len()
                        || contents[x + 1] != b'\\'
                        || contents[x + 2] != b'u'
                    {
                        return Err(JsonError::Invalid(x));
                    }
                    let low = parse_hex4(contents, x + 3)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(JsonError::Invalid(x));
                    }
                    let cp =
                        0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
                    out.push(char::from_u32(cp).ok_or(JsonError::Invalid(x))?);
                    x += 6;
                } else {
                    out.push(char::from_u32(unit as u32).ok_or(JsonError::Invalid(x))?);
                }
            }
            _ => return Err(JsonError::Invalid(x)),
        }
        x += 1;
    }
    Ok(Cow::Owned(out))
}

fn parse_hex4(contents: &[u8], x: usize) -> Result<u16, JsonError> {
    if x + 4 > contents.len() {
        return Err(JsonError::UnexpectedEof);
    }
    let text = str::from_utf8(&contents[x..x + 4]).map_err(|_| JsonError::InvalidUtf8)?;
    u16::from_str_radix(text, 16).map_err(|_| JsonError::Invalid(x))
}
