//! The binary property record.

use spillover_buffers::{Reader, Writer};

use crate::error::StoreError;
use crate::kind::ValueKind;

/// Byte offset where the name begins: value offset (2) + kind (1) +
/// reserved (1).
const HEADER_LEN: usize = 4;

/// One stored property: `(name, kind, value)` in a single contiguous
/// buffer.
///
/// Layout:
///
/// ```text
/// [ value_offset: u16 LE ][ kind: u8 ][ reserved: u8 ][ name bytes ][ value bytes ]
/// ```
///
/// `value_offset` is the byte offset within the buffer where the value
/// begins. The name is the UTF-8 property key and must never be empty. The
/// value is the kind-specific payload: raw JSON bytes for `Json`, 4-byte
/// little-endian for `Int32`, UTF-8 text for `Utf8String`, empty for
/// booleans/null/removed.
///
/// Records are immutable once created except for the same-kind in-place
/// numeric/boolean updates; a rename or kind change always replaces the
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    buf: Vec<u8>,
}

impl PropertyRecord {
    /// Builds a record from its parts. The caller has validated that the
    /// name is non-empty and fits the offset field.
    pub(crate) fn build(name: &[u8], kind: ValueKind, value: &[u8]) -> Self {
        let value_offset = HEADER_LEN + name.len();
        let mut writer = Writer::with_alloc_size(value_offset + value.len());
        writer.u16_le(value_offset as u16);
        writer.u8(kind as u8);
        writer.u8(0);
        writer.buf(name);
        writer.buf(value);
        Self {
            buf: writer.flush(),
        }
    }

    /// The UTF-8 property key bytes.
    pub fn name(&self) -> &[u8] {
        &self.buf[HEADER_LEN..self.value_offset()]
    }

    /// The kind tag.
    pub fn kind(&self) -> ValueKind {
        // the tag byte is written by `build` from a ValueKind
        ValueKind::from_u8(self.buf[2]).unwrap_or(ValueKind::Removed)
    }

    /// The kind-specific value payload.
    pub fn value(&self) -> &[u8] {
        &self.buf[self.value_offset()..]
    }

    fn value_offset(&self) -> usize {
        let mut reader = Reader::new(&self.buf);
        reader.u16_le() as usize
    }

    /// Decodes the payload of an `Int32` record.
    pub fn value_i32(&self) -> Result<i32, StoreError> {
        if self.kind() != ValueKind::Int32 {
            return Err(self.kind_mismatch("int32"));
        }
        let mut reader = Reader::new(self.value());
        Ok(reader.i32_le())
    }

    /// Overwrites only the fixed-width payload of an `Int32` record.
    ///
    /// Fast path: no reallocation. Valid only when the kind already
    /// matches.
    pub(crate) fn set_i32_value(&mut self, val: i32) -> Result<(), StoreError> {
        if self.kind() != ValueKind::Int32 {
            return Err(self.kind_mismatch("int32"));
        }
        let offset = self.value_offset();
        self.buf[offset..offset + 4].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Rewrites the tag byte between the two boolean kinds.
    ///
    /// Fast path counterpart of [`set_i32_value`](Self::set_i32_value) for
    /// booleans, whose payload is empty.
    pub(crate) fn set_bool_kind(&mut self, val: bool) -> Result<(), StoreError> {
        if !self.kind().is_boolean() {
            return Err(self.kind_mismatch("boolean"));
        }
        self.buf[2] = if val {
            ValueKind::BooleanTrue as u8
        } else {
            ValueKind::BooleanFalse as u8
        };
        Ok(())
    }

    fn kind_mismatch(&self, expected: &'static str) -> StoreError {
        StoreError::TypeMismatch {
            name: String::from_utf8_lossy(self.name()).into_owned(),
            expected,
            found: self.kind().name(),
        }
    }
}
