//! The property store.

use std::collections::HashMap;
use std::str;

use spillover_buffers::Reader;
use spillover_json::JsonEncoder;
use spillover_pointer::PointerError;

use crate::error::StoreError;
use crate::kind::ValueKind;
use crate::record::PropertyRecord;

/// Above this many records, lookups go through a hashed name index;
/// below it, a linear scan wins since typical spillover counts are small.
const INDEX_THRESHOLD: usize = 8;

/// A value being stored, tagged with how to encode it.
///
/// The fixed kind set gives exhaustive handling at every call site instead
/// of runtime type tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    /// Pre-validated JSON sub-document, written verbatim on output.
    Json(&'a [u8]),
    Int32(i32),
    Str(&'a str),
    Bool(bool),
    /// Explicit JSON `null`, distinct from absence.
    Null,
    /// Tombstone.
    Removed,
}

/// An ordered, name-keyed, append-mostly collection of typed property
/// records.
///
/// Holds all properties not represented as native typed fields on the
/// owning model, or known fields whose incoming value failed to match the
/// declared type. Names are unique; setting an existing name overwrites in
/// place, preserving its original position, which determines JSON member
/// emission order. Removal is logical: a tombstone stays behind so a later
/// read correctly reports absence while serialization skips the entry.
///
/// The store exclusively owns its backing buffers; record bytes are copied
/// in on set, never aliased to caller-supplied buffers. The type is
/// deliberately not `Clone`: it is a mutable handle owned by one model
/// instance, and implicit duplication would invite stale-buffer aliasing.
/// Not thread-safe; single-owner, single-thread use is an external
/// invariant.
#[derive(Debug, Default)]
pub struct PropertyStore {
    records: Vec<PropertyRecord>,
    /// Name-to-position map, engaged once the store outgrows linear scans.
    index: Option<HashMap<Vec<u8>, usize>>,
}

impl PropertyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: None,
        }
    }

    /// Total record count, tombstones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of live (non-tombstoned) records.
    pub fn live_len(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.kind() != ValueKind::Removed)
            .count()
    }

    /// Iterates all records in store order, tombstones included.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }

    /// Sets `name` to `value`, overwriting in place if the name exists,
    /// appending otherwise.
    ///
    /// The record is fully built before the store is touched, so a failure
    /// never leaves partial state.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidArgument`] if `name` is empty or too long for
    /// the record layout's offset field.
    pub fn set(&mut self, name: &str, value: PropertyValue<'_>) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidArgument(
                "property name must not be empty".to_owned(),
            ));
        }
        if name.len() > (u16::MAX as usize) - 4 {
            return Err(StoreError::InvalidArgument(format!(
                "property name too long ({} bytes)",
                name.len()
            )));
        }
        let record = match value {
            PropertyValue::Json(bytes) => {
                PropertyRecord::build(name.as_bytes(), ValueKind::Json, bytes)
            }
            PropertyValue::Int32(val) => {
                PropertyRecord::build(name.as_bytes(), ValueKind::Int32, &val.to_le_bytes())
            }
            PropertyValue::Str(text) => {
                PropertyRecord::build(name.as_bytes(), ValueKind::Utf8String, text.as_bytes())
            }
            PropertyValue::Bool(true) => {
                PropertyRecord::build(name.as_bytes(), ValueKind::BooleanTrue, b"")
            }
            PropertyValue::Bool(false) => {
                PropertyRecord::build(name.as_bytes(), ValueKind::BooleanFalse, b"")
            }
            PropertyValue::Null => PropertyRecord::build(name.as_bytes(), ValueKind::Null, b""),
            PropertyValue::Removed => {
                PropertyRecord::build(name.as_bytes(), ValueKind::Removed, b"")
            }
        };
        match self.find_position(name.as_bytes()) {
            Some(i) => self.records[i] = record,
            None => {
                self.records.push(record);
                let position = self.records.len() - 1;
                if let Some(index) = &mut self.index {
                    index.insert(name.as_bytes().to_vec(), position);
                } else if self.records.len() > INDEX_THRESHOLD {
                    self.build_index();
                }
            }
        }
        Ok(())
    }

    /// Logical delete: the tombstone stays for occupancy bookkeeping.
    pub fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        self.set(name, PropertyValue::Removed)
    }

    /// Sets an explicit null, which serializes as `"name":null`.
    pub fn set_null(&mut self, name: &str) -> Result<(), StoreError> {
        self.set(name, PropertyValue::Null)
    }

    /// Looks up a record by exact name.
    ///
    /// Tombstones are reported here; value-returning accessors surface
    /// them as not present.
    pub fn try_get(&self, name: &str) -> Option<(ValueKind, &[u8])> {
        let i = self.find_position(name.as_bytes())?;
        let record = &self.records[i];
        Some((record.kind(), record.value()))
    }

    /// Whether a record with `name` exists, tombstoned or not.
    pub fn contains(&self, name: &str) -> bool {
        self.find_position(name.as_bytes()).is_some()
    }

    /// In-place update of an existing `Int32` record's payload.
    ///
    /// Returns `false` when the name is absent or the kind does not match;
    /// the caller falls back to [`set`](Self::set).
    pub fn set_i32_on_existing(&mut self, name: &str, val: i32) -> bool {
        match self.find_position(name.as_bytes()) {
            Some(i) if self.records[i].kind() == ValueKind::Int32 => {
                self.records[i].set_i32_value(val).is_ok()
            }
            _ => false,
        }
    }

    /// In-place update of an existing boolean record's kind tag.
    pub fn set_bool_on_existing(&mut self, name: &str, val: bool) -> bool {
        match self.find_position(name.as_bytes()) {
            Some(i) if self.records[i].kind().is_boolean() => {
                self.records[i].set_bool_kind(val).is_ok()
            }
            _ => false,
        }
    }

    /// Reads a string property, or a string inside a stored JSON blob when
    /// `name` is pointer-qualified (`"config/host"`).
    pub fn get_str(&self, name: &str) -> Result<std::borrow::Cow<'_, str>, StoreError> {
        match self.resolve(name)? {
            Resolved::Record(record) => match record.kind() {
                ValueKind::Utf8String => Ok(std::borrow::Cow::Borrowed(
                    str::from_utf8(record.value()).unwrap_or(""),
                )),
                _ => Err(type_mismatch(name, "string", record.kind())),
            },
            Resolved::Blob { json, pointer } => {
                Ok(spillover_pointer::as_str(json, &pointer)?)
            }
        }
    }

    /// Reads an `Int32` property, or an integral number inside a stored
    /// JSON blob for pointer-qualified names.
    pub fn get_i32(&self, name: &str) -> Result<i32, StoreError> {
        match self.resolve(name)? {
            Resolved::Record(record) => match record.kind() {
                ValueKind::Int32 => {
                    let mut reader = Reader::new(record.value());
                    Ok(reader.i32_le())
                }
                _ => Err(type_mismatch(name, "int32", record.kind())),
            },
            Resolved::Blob { json, pointer } => Ok(spillover_pointer::as_i32(json, &pointer)?),
        }
    }

    /// Reads a boolean property, or a boolean inside a stored JSON blob.
    pub fn get_bool(&self, name: &str) -> Result<bool, StoreError> {
        match self.resolve(name)? {
            Resolved::Record(record) => match record.kind() {
                ValueKind::BooleanTrue => Ok(true),
                ValueKind::BooleanFalse => Ok(false),
                _ => Err(type_mismatch(name, "boolean", record.kind())),
            },
            Resolved::Blob { json, pointer } => Ok(spillover_pointer::as_bool(json, &pointer)?),
        }
    }

    /// Reads a number as `f64`. `Int32` records widen losslessly; other
    /// scalar kinds are a mismatch.
    pub fn get_f64(&self, name: &str) -> Result<f64, StoreError> {
        match self.resolve(name)? {
            Resolved::Record(record) => match record.kind() {
                ValueKind::Int32 => {
                    let mut reader = Reader::new(record.value());
                    Ok(reader.i32_le() as f64)
                }
                _ => Err(type_mismatch(name, "number", record.kind())),
            },
            Resolved::Blob { json, pointer } => Ok(spillover_pointer::as_f64(json, &pointer)?),
        }
    }

    /// Reads the raw bytes of a `Json` property, or of a value inside one
    /// for pointer-qualified names.
    pub fn get_json(&self, name: &str) -> Result<&[u8], StoreError> {
        match self.resolve(name)? {
            Resolved::Record(record) => match record.kind() {
                ValueKind::Json => Ok(record.value()),
                _ => Err(type_mismatch(name, "json", record.kind())),
            },
            Resolved::Blob { json, pointer } => Ok(spillover_pointer::raw(json, &pointer)?),
        }
    }

    /// Replaces one element of a stored `Json` array in place.
    ///
    /// The array keeps its length: an out-of-range index fails with
    /// [`StoreError::IndexOutOfRange`] rather than extending the array.
    /// `raw_json` must be a pre-validated JSON value.
    pub fn set_array_element(
        &mut self,
        name: &str,
        index: usize,
        raw_json: &[u8],
    ) -> Result<(), StoreError> {
        let i = self
            .find_position(name.as_bytes())
            .ok_or_else(|| StoreError::PropertyNotFound(name.to_owned()))?;
        let record = &self.records[i];
        match record.kind() {
            ValueKind::Removed => return Err(StoreError::PropertyNotFound(name.to_owned())),
            ValueKind::Json => {}
            other => return Err(type_mismatch(name, "json array", other)),
        }
        let stored = record.value();
        let pointer = format!("/{index}");
        let handle = spillover_pointer::find(stored, &pointer).map_err(|err| match err {
            PointerError::IndexOutOfRange { index, len } => {
                StoreError::IndexOutOfRange { index, len }
            }
            other => StoreError::Pointer(other),
        })?;
        let old = handle.raw()?;
        let start = handle.start;
        let end = start + old.len();
        let mut spliced = Vec::with_capacity(stored.len() - old.len() + raw_json.len());
        spliced.extend_from_slice(&stored[..start]);
        spliced.extend_from_slice(raw_json);
        spliced.extend_from_slice(&stored[end..]);
        let replacement = PropertyRecord::build(name.as_bytes(), ValueKind::Json, &spliced);
        self.records[i] = replacement;
        Ok(())
    }

    /// Emits each live record as one JSON object member, in store order.
    ///
    /// `first` tells the store whether the enclosing object already has
    /// members (the model writes its known fields before the spillover);
    /// the updated flag is returned. Strings, ints and booleans go through
    /// the encoder's native primitives; `Json` records pass through
    /// verbatim; tombstones are omitted.
    pub fn write(&self, enc: &mut JsonEncoder, mut first: bool) -> bool {
        for record in &self.records {
            let kind = record.kind();
            if kind == ValueKind::Removed {
                continue;
            }
            if !first {
                enc.comma();
            }
            first = false;
            enc.key(str::from_utf8(record.name()).unwrap_or(""));
            match kind {
                ValueKind::Json => enc.write_raw(record.value()),
                ValueKind::Int32 => {
                    let mut reader = Reader::new(record.value());
                    enc.write_i32(reader.i32_le());
                }
                ValueKind::Utf8String => {
                    enc.write_str(str::from_utf8(record.value()).unwrap_or(""));
                }
                ValueKind::BooleanTrue => enc.write_bool(true),
                ValueKind::BooleanFalse => enc.write_bool(false),
                ValueKind::Null => enc.write_null(),
                ValueKind::Removed => unreachable!(),
            }
        }
        first
    }

    /// Convenience framing: the whole store as one JSON object.
    pub fn write_document(&self, enc: &mut JsonEncoder) {
        enc.begin_obj();
        self.write(enc, true);
        enc.end_obj();
    }

    /// Human-readable `"name = value"` dump of live records, one per
    /// line. Diagnostics only, not a wire format.
    pub fn to_debug_string(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let kind = record.kind();
            if kind == ValueKind::Removed {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(str::from_utf8(record.name()).unwrap_or(""));
            out.push_str(" = ");
            match kind {
                ValueKind::Json | ValueKind::Utf8String => {
                    out.push_str(&String::from_utf8_lossy(record.value()));
                }
                ValueKind::Int32 => {
                    let mut reader = Reader::new(record.value());
                    out.push_str(&reader.i32_le().to_string());
                }
                ValueKind::BooleanTrue => out.push_str("true"),
                ValueKind::BooleanFalse => out.push_str("false"),
                ValueKind::Null => out.push_str("null"),
                ValueKind::Removed => unreachable!(),
            }
        }
        out
    }

    fn find_position(&self, name: &[u8]) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(name).copied(),
            None => self.records.iter().position(|r| r.name() == name),
        }
    }

    fn build_index(&mut self) {
        let mut index = HashMap::with_capacity(self.records.len());
        for (i, record) in self.records.iter().enumerate() {
            index.insert(record.name().to_vec(), i);
        }
        self.index = Some(index);
    }

    /// Splits a possibly pointer-qualified name into its target.
    fn resolve<'s>(&'s self, name: &str) -> Result<Resolved<'s>, StoreError> {
        let (base, rest) = match name.split_once('/') {
            Some((base, rest)) => (base, Some(rest)),
            None => (name, None),
        };
        let i = self
            .find_position(base.as_bytes())
            .ok_or_else(|| StoreError::PropertyNotFound(name.to_owned()))?;
        let record = &self.records[i];
        if record.kind() == ValueKind::Removed {
            return Err(StoreError::PropertyNotFound(name.to_owned()));
        }
        match rest {
            None => Ok(Resolved::Record(record)),
            Some(rest) => {
                if record.kind() != ValueKind::Json {
                    return Err(type_mismatch(base, "json", record.kind()));
                }
                Ok(Resolved::Blob {
                    json: record.value(),
                    pointer: format!("/{rest}"),
                })
            }
        }
    }
}

enum Resolved<'a> {
    /// The name addressed a top-level record directly.
    Record(&'a PropertyRecord),
    /// The name was pointer-qualified; the remainder resolves inside the
    /// stored JSON bytes.
    Blob { json: &'a [u8], pointer: String },
}

fn type_mismatch(name: &str, expected: &'static str, found: ValueKind) -> StoreError {
    StoreError::TypeMismatch {
        name: name.to_owned(),
        expected,
        found: found.name(),
    }
}
