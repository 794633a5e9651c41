//! DOM Module - Arena-based XML tree
//!
//! Implements the tree the matcher walks:
//! - Arena allocation for nodes (attributes are arena nodes too)
//! - NodeId (u32) indices for parent/child/sibling links
//! - String interning for names and values
//! - Verbatim node serialization and ancestor paths
//!
//! The matcher only depends on [`DocumentAccess`], so callers with their
//! own tree model can implement it instead of building an [`XmlTree`].

pub mod document;
pub mod events;
pub mod handle;
pub mod node;
pub mod path;
pub mod serialize;
pub mod strings;

pub use document::{TreeBuilder, XmlTree};
pub use events::{StartElement, TreeEvent};
pub use handle::NodeHandle;
pub use node::{NodeId, NodeKind, XmlNode};
pub use path::{AncestorPath, PathStep};
pub use strings::StringPool;

/// Trait for document access - the view of a parsed tree the matcher needs
pub trait DocumentAccess {
    /// Get the document (root) node ID
    fn document_node(&self) -> NodeId;

    /// Get the kind of a node, `None` if the id is not part of this document
    fn kind(&self, id: NodeId) -> Option<NodeKind>;

    /// Get the parent of a node (owner element for attributes)
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    /// Get node name (elements, attributes, PI targets)
    fn node_name(&self, id: NodeId) -> Option<&str>;

    /// Get node value (attributes, text, CDATA, comments, PI data)
    fn node_value(&self, id: NodeId) -> Option<&str>;

    /// Children in document order - returns collected Vec for trait object compatibility
    fn children_vec(&self, id: NodeId) -> Vec<NodeId>;

    /// Attribute nodes of an element in source order
    fn attributes_vec(&self, id: NodeId) -> Vec<NodeId>;

    /// Whether a childless element was written as `<name/>`
    fn is_self_closing(&self, _id: NodeId) -> bool {
        false
    }

    /// Whether the id refers to a node of this document
    fn contains(&self, id: NodeId) -> bool {
        self.kind(id).is_some()
    }
}
