//! Context matching
//!
//! Attributes a textual occurrence of a node's serialization to the one
//! tree node that produced it:
//! - `context`: the single-shot check ([`is_matching_node_context`])
//! - `order`: document-order traversal grouping nodes by serialization
//! - `session`: cached queries against one snapshot ([`MatchSession`])
//! - `parallel`: batch locate and offset -> node lookup

pub mod context;
pub mod options;
pub mod order;
mod parallel;
pub mod session;

pub use context::{is_matching_node_context, is_matching_node_context_with};
pub use options::{MatchOptions, OccurrencePolicy};
pub use order::DocumentOrder;
pub use session::MatchSession;
