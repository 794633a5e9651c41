//! Text view helpers
//!
//! Conversions between the offsets editors report and the byte offsets
//! the matcher takes.

pub mod offset;

pub use offset::{from_byte_offset, to_byte_offset, OffsetEncoding};
