//! Binary buffer utilities for spillover.
//!
//! This crate provides the cursor-based reader and auto-growing writer used
//! by the property record layout and the JSON emitter.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! All fixed-width accessors are little-endian, matching the property
//! record layout.
//!
//! # Example
//!
//! ```
//! use spillover_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u16_le(0x0203);
//! writer.u8(0x01);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u16_le(), 0x0203);
//! assert_eq!(reader.u8(), 0x01);
//! assert_eq!(reader.utf8(5), "hello");
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
