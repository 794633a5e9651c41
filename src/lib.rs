//! xmlsync - Keeps a raw XML text view and its tree view in sync
//!
//! Given the raw text, an offset in it, a node's serialization and the
//! node itself, decides whether that occurrence is the one the node
//! produced, and not a textually identical node elsewhere in the tree.
//!
//! Layers:
//! - core: memchr scanning, occurrence ordinals, markup region map
//! - dom: arena tree, builder, verbatim serialization, ancestor paths
//! - matcher: the context check, cached sessions, parallel batch locate
//! - text: caret offset conversions (UTF-16, chars) to byte offsets
//!
//! ```
//! use xmlsync::{is_matching_node_context, TreeBuilder};
//!
//! let mut b = TreeBuilder::new();
//! b.start_element("r")
//!     .start_element("v").text("1").end_element()
//!     .start_element("v").text("1").end_element()
//!     .end_element();
//! let tree = b.finish().unwrap();
//! let content = "<r><v>1</v><v>1</v></r>";
//!
//! let second = tree.children(tree.root_element_id().unwrap()).nth(1).unwrap();
//! let node = tree.node(second).unwrap();
//! assert!(!is_matching_node_context(content, 3, "<v>1</v>", node));
//! assert!(is_matching_node_context(content, 11, "<v>1</v>", node));
//! ```

pub mod core;
pub mod dom;
pub mod error;
pub mod matcher;
pub mod text;

pub use dom::{DocumentAccess, NodeHandle, NodeId, NodeKind, TreeBuilder, TreeEvent, XmlTree};
pub use error::TreeError;
pub use matcher::{
    is_matching_node_context, is_matching_node_context_with, DocumentOrder, MatchOptions,
    MatchSession, OccurrencePolicy,
};
pub use text::OffsetEncoding;
