//! JSON emitter over an auto-growing buffer.

use spillover_buffers::Writer;

/// Emits JSON text through native primitives.
///
/// The encoder owns its [`Writer`]; callers frame objects/arrays and write
/// members, then [`flush`](JsonEncoder::flush) the accumulated bytes.
/// Pre-validated sub-documents are passed through verbatim with
/// [`write_raw`](JsonEncoder::write_raw).
///
/// # Example
///
/// ```
/// use spillover_json::JsonEncoder;
///
/// let mut enc = JsonEncoder::new();
/// enc.begin_obj();
/// enc.key("a");
/// enc.write_i32(1);
/// enc.comma();
/// enc.key("b");
/// enc.write_str("x\"y");
/// enc.end_obj();
/// assert_eq!(enc.flush(), br#"{"a":1,"b":"x\"y"}"#);
/// ```
pub struct JsonEncoder {
    pub writer: Writer,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Returns the bytes written so far and resets the window.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    pub fn begin_obj(&mut self) {
        self.writer.ascii(b'{');
    }

    pub fn end_obj(&mut self) {
        self.writer.ascii(b'}');
    }

    pub fn begin_arr(&mut self) {
        self.writer.ascii(b'[');
    }

    pub fn end_arr(&mut self) {
        self.writer.ascii(b']');
    }

    pub fn comma(&mut self) {
        self.writer.ascii(b',');
    }

    /// Writes an object key followed by `:`.
    pub fn key(&mut self, name: &str) {
        self.write_str(name);
        self.writer.ascii(b':');
    }

    pub fn write_null(&mut self) {
        self.writer.buf(b"null");
    }

    pub fn write_bool(&mut self, val: bool) {
        self.writer.buf(if val { b"true" } else { b"false" });
    }

    pub fn write_i32(&mut self, val: i32) {
        let mut buf = [0u8; 12];
        let text = format_i32(&mut buf, val);
        self.writer.buf(text);
    }

    /// Writes a JSON string with standard escaping.
    ///
    /// `"` and `\` get their two-character escapes, the named control
    /// characters their short forms, all other control characters `\u00XX`.
    pub fn write_str(&mut self, val: &str) {
        self.writer.ascii(b'"');
        let bytes = val.as_bytes();
        let mut run_start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let esc: Option<&[u8]> = match b {
                b'"' => Some(b"\\\""),
                b'\\' => Some(b"\\\\"),
                0x08 => Some(b"\\b"),
                0x0C => Some(b"\\f"),
                b'\n' => Some(b"\\n"),
                b'\r' => Some(b"\\r"),
                b'\t' => Some(b"\\t"),
                0x00..=0x1F => None, // \u00XX below
                _ => continue,
            };
            self.writer.buf(&bytes[run_start..i]);
            match esc {
                Some(seq) => self.writer.buf(seq),
                None => {
                    const HEX: &[u8; 16] = b"0123456789abcdef";
                    self.writer.buf(b"\\u00");
                    self.writer.u8(HEX[(b >> 4) as usize]);
                    self.writer.u8(HEX[(b & 0x0F) as usize]);
                }
            }
            run_start = i + 1;
        }
        self.writer.buf(&bytes[run_start..]);
        self.writer.ascii(b'"');
    }

    /// Writes a pre-validated JSON value verbatim.
    pub fn write_raw(&mut self, val: &[u8]) {
        self.writer.buf(val);
    }
}

/// Formats an `i32` into the provided scratch buffer, avoiding a heap
/// allocation per number.
fn format_i32(buf: &mut [u8; 12], val: i32) -> &[u8] {
    let mut n = val as i64;
    let negative = n < 0;
    if negative {
        n = -n;
    }
    let mut x = buf.len();
    loop {
        x -= 1;
        buf[x] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if negative {
        x -= 1;
        buf[x] = b'-';
    }
    &buf[x..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(s: &str) -> String {
        let mut enc = JsonEncoder::new();
        enc.write_str(s);
        String::from_utf8(enc.flush()).unwrap()
    }

    #[test]
    fn test_scalars() {
        let mut enc = JsonEncoder::new();
        enc.write_null();
        enc.comma();
        enc.write_bool(true);
        enc.comma();
        enc.write_bool(false);
        enc.comma();
        enc.write_i32(0);
        enc.comma();
        enc.write_i32(-123);
        enc.comma();
        enc.write_i32(i32::MAX);
        enc.comma();
        enc.write_i32(i32::MIN);
        assert_eq!(
            enc.flush(),
            b"null,true,false,0,-123,2147483647,-2147483648"
        );
    }

    #[test]
    fn test_string_escaping_matches_serde() {
        let cases = [
            "plain",
            "",
            "quote\"inside",
            "back\\slash",
            "line\nbreak\ttab\rret",
            "ctrl\u{1}\u{1f}",
            "unicode é 🎉 stays raw",
        ];
        for case in cases {
            assert_eq!(encode_str(case), serde_json::to_string(case).unwrap());
        }
    }

    #[test]
    fn test_object_framing() {
        let mut enc = JsonEncoder::new();
        enc.begin_obj();
        enc.key("nums");
        enc.begin_arr();
        enc.write_i32(1);
        enc.comma();
        enc.write_i32(2);
        enc.end_arr();
        enc.end_obj();
        assert_eq!(enc.flush(), br#"{"nums":[1,2]}"#);
    }

    #[test]
    fn test_write_raw_passthrough() {
        let mut enc = JsonEncoder::new();
        enc.write_raw(br#"{"pre": "encoded"}"#);
        assert_eq!(enc.flush(), br#"{"pre": "encoded"}"#);
    }
}
