//! Binary buffer writer with auto-growing capacity.

/// A binary buffer writer that grows automatically as needed.
///
/// Property records and serialized JSON output are assembled through this
/// type. Fixed-width integers are written little-endian, matching the
/// record layout.
///
/// # Example
///
/// ```
/// use spillover_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u16_le(0x0203);
/// writer.u8(0x01);
/// let data = writer.flush();
/// assert_eq!(data, [0x03, 0x02, 0x01]);
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub bytes: Vec<u8>,
    /// Position where the last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when the buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size (4KB).
    ///
    /// Property payloads are single-API-document scale, so the default is
    /// much smaller than a streaming codec would pick.
    pub fn new() -> Self {
        Self::with_alloc_size(4 * 1024)
    }

    /// Creates a new writer with a custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        let bytes = vec![0u8; alloc_size];
        Self {
            bytes,
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.bytes.len() - self.x;
        if remaining < capacity {
            let total = self.bytes.len() - self.x0;
            let required = capacity - remaining;
            let total_required = total + required;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    fn grow(&mut self, new_size: usize) {
        let x0 = self.x0;
        let x = self.x;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..x - x0].copy_from_slice(&self.bytes[x0..x]);
        self.bytes = new_buf;
        self.x = x - x0;
        self.x0 = 0;
    }

    /// Returns the number of bytes written since the last flush.
    pub fn written(&self) -> usize {
        self.x - self.x0
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.bytes[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.bytes[self.x] = val;
        self.x += 1;
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16_le(&mut self, val: u16) {
        self.ensure_capacity(2);
        self.bytes[self.x..self.x + 2].copy_from_slice(&val.to_le_bytes());
        self.x += 2;
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self, val: u32) {
        self.ensure_capacity(4);
        self.bytes[self.x..self.x + 4].copy_from_slice(&val.to_le_bytes());
        self.x += 4;
    }

    /// Writes a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32_le(&mut self, val: i32) {
        self.ensure_capacity(4);
        self.bytes[self.x..self.x + 4].copy_from_slice(&val.to_le_bytes());
        self.x += 4;
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, val: &[u8]) {
        self.ensure_capacity(val.len());
        self.bytes[self.x..self.x + val.len()].copy_from_slice(val);
        self.x += val.len();
    }

    /// Writes a string as UTF-8 bytes.
    pub fn utf8(&mut self, val: &str) {
        self.buf(val.as_bytes());
    }

    /// Writes a single ASCII byte, `u8` alias kept for call-site clarity
    /// when emitting JSON punctuation.
    #[inline]
    pub fn ascii(&mut self, ch: u8) {
        self.u8(ch);
    }
}
