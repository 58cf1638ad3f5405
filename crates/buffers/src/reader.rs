//! Binary buffer reader with cursor tracking.

use std::str;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides methods for reading
/// little-endian integers, UTF-8 runs and raw byte runs. It is used to
/// decode property records, whose buffers are produced by this crate's
/// [`Writer`](crate::Writer) and are therefore trusted to be well-formed;
/// accessors index directly and panic on truncated input.
///
/// # Example
///
/// ```
/// use spillover_buffers::Reader;
///
/// let data = [0x03, 0x02, 0x01];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u16_le(), 0x0203);
/// assert_eq!(reader.u8(), 0x01);
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub bytes: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        let end = bytes.len();
        Self { bytes, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(bytes: &'a [u8], x: usize, end: usize) -> Self {
        Self { bytes, x, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> u8 {
        self.bytes[self.x]
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Returns a subslice of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> &'a [u8] {
        let x = self.x;
        let end = x + size;
        let bin = &self.bytes[x..end];
        self.x = end;
        bin
    }

    /// Returns the remaining bytes without advancing the cursor.
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.x..self.end]
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> u8 {
        let val = self.bytes[self.x];
        self.x += 1;
        val
    }

    /// Reads an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16_le(&mut self) -> u16 {
        let val = u16::from_le_bytes([self.bytes[self.x], self.bytes[self.x + 1]]);
        self.x += 2;
        val
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self) -> u32 {
        let val = u32::from_le_bytes([
            self.bytes[self.x],
            self.bytes[self.x + 1],
            self.bytes[self.x + 2],
            self.bytes[self.x + 3],
        ]);
        self.x += 4;
        val
    }

    /// Reads a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32_le(&mut self) -> i32 {
        let val = i32::from_le_bytes([
            self.bytes[self.x],
            self.bytes[self.x + 1],
            self.bytes[self.x + 2],
            self.bytes[self.x + 3],
        ]);
        self.x += 4;
        val
    }

    /// Reads a UTF-8 string of the given byte size.
    pub fn utf8(&mut self, size: usize) -> &'a str {
        let start = self.x;
        self.x += size;
        str::from_utf8(&self.bytes[start..self.x]).unwrap_or("")
    }
}
