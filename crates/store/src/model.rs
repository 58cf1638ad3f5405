//! Model seam: known-field dispatch and spillover absorption.
//!
//! Generated models declare their known fields in a compile-time descriptor
//! table; everything else flows into the [`PropertyStore`]. This replaces
//! runtime reflection over the host model type with an explicit
//! name-to-accessor table.

use spillover_json::{
    find_ending_quote, parse_i32, skip_value, skip_whitespace, token_kind, unescape_string,
    JsonEncoder, JsonError, TokenKind,
};

use crate::error::StoreError;
use crate::store::{PropertyStore, PropertyValue};

/// One known field of a model: its wire name, a serializer for its current
/// value, and a setter that declines (returns `false`) when the incoming
/// value does not match the declared type.
pub struct FieldDescriptor<M> {
    pub name: &'static str,
    pub write: fn(&M, &mut JsonEncoder),
    pub set: fn(&mut M, PropertyValue<'_>) -> bool,
}

/// A model with typed known fields and a spillover store.
///
/// `try_set_property` dispatches known names through the descriptor table;
/// a declined set (type-mismatched known field) and every unknown name
/// land in the store, so the object still round-trips losslessly.
pub trait ExtensibleModel: Sized + 'static {
    fn fields() -> &'static [FieldDescriptor<Self>];
    fn store(&self) -> &PropertyStore;
    fn store_mut(&mut self) -> &mut PropertyStore;

    /// Routes one incoming property. Returns `true` when a known field
    /// accepted the value, `false` when it spilled over.
    fn try_set_property(
        &mut self,
        name: &str,
        value: PropertyValue<'_>,
    ) -> Result<bool, StoreError> {
        if let Some(descriptor) = Self::fields().iter().find(|fd| fd.name == name) {
            if (descriptor.set)(self, value) {
                return Ok(true);
            }
        }
        self.store_mut().set(name, value)?;
        Ok(false)
    }

    /// Reads a spillover property; known fields are accessed natively.
    fn try_get_property(&self, name: &str) -> Option<(crate::ValueKind, &[u8])> {
        self.store().try_get(name)
    }

    /// Serializes the model: known fields first, then every live spillover
    /// record, as one JSON object.
    fn write_json(&self, enc: &mut JsonEncoder) {
        enc.begin_obj();
        let mut first = true;
        for descriptor in Self::fields() {
            if !first {
                enc.comma();
            }
            enc.key(descriptor.name);
            (descriptor.write)(self, enc);
            first = false;
        }
        self.store().write(enc, first);
        enc.end_obj();
    }

    /// Deserializes a JSON object into the model, spilling unknown and
    /// type-mismatched members into the store.
    fn read_json(&mut self, json: &[u8]) -> Result<(), StoreError> {
        absorb_object(json, &mut |name, value| {
            self.try_set_property(name, value)?;
            Ok(())
        })
    }
}

/// Walks the members of a top-level JSON object, classifying each value
/// into a [`PropertyValue`] and handing it to `f`.
///
/// Scalar members become typed values; objects, arrays and non-integral
/// numbers stay raw JSON blobs so their original bytes survive
/// re-serialization.
pub fn absorb_object<F>(json: &[u8], f: &mut F) -> Result<(), StoreError>
where
    F: FnMut(&str, PropertyValue<'_>) -> Result<(), StoreError>,
{
    let mut x = skip_whitespace(json, 0);
    if json.get(x) != Some(&b'{') {
        return Err(JsonError::Invalid(x).into());
    }
    x = skip_whitespace(json, x + 1);
    if json.get(x) == Some(&b'}') {
        return Ok(());
    }
    loop {
        if json.get(x) != Some(&b'"') {
            return Err(JsonError::Invalid(x).into());
        }
        let key_start = x + 1;
        let key_end = find_ending_quote(json, key_start)?;
        let key = unescape_string(&json[key_start..key_end])?;
        x = skip_whitespace(json, key_end + 1);
        if json.get(x) != Some(&b':') {
            return Err(JsonError::Invalid(x).into());
        }
        x = skip_whitespace(json, x + 1);
        let kind = token_kind(json, x)?;
        let end = skip_value(json, x)?;
        let raw = &json[x..end];
        let text;
        let value = match kind {
            TokenKind::Object | TokenKind::Array => PropertyValue::Json(raw),
            TokenKind::String => {
                text = unescape_string(&raw[1..raw.len() - 1])?;
                PropertyValue::Str(&text)
            }
            // non-integral numbers stay raw so the original bytes survive
            TokenKind::Number => match parse_i32(raw) {
                Ok(val) => PropertyValue::Int32(val),
                Err(_) => PropertyValue::Json(raw),
            },
            TokenKind::True => PropertyValue::Bool(true),
            TokenKind::False => PropertyValue::Bool(false),
            TokenKind::Null => PropertyValue::Null,
        };
        f(&key, value)?;
        x = skip_whitespace(json, end);
        match json.get(x) {
            Some(b',') => x = skip_whitespace(json, x + 1),
            Some(b'}') => return Ok(()),
            None => return Err(JsonError::UnexpectedEof.into()),
            Some(_) => return Err(JsonError::Invalid(x).into()),
        }
    }
}
