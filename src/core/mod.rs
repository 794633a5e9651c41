//! Core text scanning primitives
//!
//! - Scanner: SIMD-accelerated delimiter and substring search using memchr
//! - Occurrences: non-overlapping occurrence offsets and their ordinals
//! - Markup: region map of raw XML text for boundary-aligned occurrences

pub mod markup;
pub mod scanner;

pub use markup::{MarkupMap, Region, RegionKind};
pub use scanner::{occurrences, occurs_at, ordinal_of, Scanner};
