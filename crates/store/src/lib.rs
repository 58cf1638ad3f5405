//! Extensible property store for schema-generated models.
//!
//! Data models generated from an API contract have a fixed set of known
//! fields, but wire payloads may carry extra fields unknown at compile time
//! or retype known ones. This crate holds that spillover: an ordered,
//! name-keyed, append-mostly collection of typed property records with
//! tombstone and null markers, a fixed binary layout per record, and JSON
//! emission that round-trips the original payload.
//!
//! Pointer-qualified names (`"config/retries"`) read through stored JSON
//! blobs via [`spillover_pointer`].
//!
//! # Example
//!
//! ```
//! use spillover_store::{PropertyStore, PropertyValue};
//!
//! let mut store = PropertyStore::new();
//! store.set("count", PropertyValue::Int32(3)).unwrap();
//! store.set("tags", PropertyValue::Json(br#"["a","b"]"#)).unwrap();
//!
//! assert_eq!(store.get_i32("count").unwrap(), 3);
//! assert_eq!(store.get_str("tags/1").unwrap(), "b");
//! ```

mod error;
mod kind;
mod model;
mod record;
mod store;

pub use error::StoreError;
pub use kind::ValueKind;
pub use model::{absorb_object, ExtensibleModel, FieldDescriptor};
pub use record::PropertyRecord;
pub use store::{PropertyStore, PropertyValue};
