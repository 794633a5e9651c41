//! Node handles
//!
//! A [`NodeHandle`] pairs a document with one node id. Two handles are
//! the same node only if they point into the same document with the same
//! id; textual equality of their serializations says nothing about identity.

use super::node::{NodeId, NodeKind};
use super::path::AncestorPath;
use super::serialize;
use super::DocumentAccess;

/// Reference to one specific node of a document
pub struct NodeHandle<'d, D: ?Sized> {
    doc: &'d D,
    id: NodeId,
}

impl<D: ?Sized> Clone for NodeHandle<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for NodeHandle<'_, D> {}

impl<D: ?Sized> std::fmt::Debug for NodeHandle<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeHandle").field("id", &self.id).finish()
    }
}

impl<D: ?Sized> PartialEq for NodeHandle<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.doc, other.doc) && self.id == other.id
    }
}

impl<D: ?Sized> Eq for NodeHandle<'_, D> {}

impl<'d, D: DocumentAccess + ?Sized> NodeHandle<'d, D> {
    /// Handle for `id`, or `None` if the document has no such node
    pub fn new(doc: &'d D, id: NodeId) -> Option<Self> {
        doc.contains(id).then_some(NodeHandle { doc, id })
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn document(&self) -> &'d D {
        self.doc
    }

    pub fn kind(&self) -> NodeKind {
        // Existence was checked on construction
        self.doc.kind(self.id).unwrap_or(NodeKind::Document)
    }

    pub fn name(&self) -> Option<&'d str> {
        self.doc.node_name(self.id)
    }

    pub fn value(&self) -> Option<&'d str> {
        self.doc.node_value(self.id)
    }

    pub fn parent(&self) -> Option<Self> {
        let parent = self.doc.parent_of(self.id)?;
        NodeHandle::new(self.doc, parent)
    }

    pub fn children(&self) -> Vec<Self> {
        self.doc
            .children_vec(self.id)
            .into_iter()
            .map(|id| NodeHandle { doc: self.doc, id })
            .collect()
    }

    pub fn attributes(&self) -> Vec<Self> {
        self.doc
            .attributes_vec(self.id)
            .into_iter()
            .map(|id| NodeHandle { doc: self.doc, id })
            .collect()
    }

    /// Verbatim serialization of this node
    pub fn outer_xml(&self) -> String {
        serialize::outer_xml(self.doc, self.id).unwrap_or_default()
    }

    /// Location of this node from the document root
    pub fn ancestor_path(&self) -> AncestorPath {
        AncestorPath::of(self.doc, self.id)
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{NodeKind, TreeBuilder};

    #[test]
    fn test_handle_navigation() {
        let mut b = TreeBuilder::new();
        b.start_element("book")
            .attribute("id", "7")
            .start_element("price")
            .text("29.99")
            .end_element()
            .end_element();
        let tree = b.finish().unwrap();

        let book = tree.node(tree.root_element_id().unwrap()).unwrap();
        assert_eq!(book.kind(), NodeKind::Element);
        assert_eq!(book.name(), Some("book"));
        assert_eq!(book.attributes().len(), 1);
        assert_eq!(book.attributes()[0].value(), Some("7"));

        let price = book.children()[0];
        assert_eq!(price.parent(), Some(book));
        assert_eq!(price.outer_xml(), "<price>29.99</price>");
        assert_eq!(price.children()[0].value(), Some("29.99"));
    }

    #[test]
    fn test_handle_missing_node() {
        let tree = TreeBuilder::new().finish().unwrap();
        assert!(tree.node(99).is_none());
        assert!(tree.node(0).unwrap().parent().is_none());
    }
}
