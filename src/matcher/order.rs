//! Document-order traversal
//!
//! One iterative pass serializes the whole document and records the byte
//! span every node's text occupies in it. Order is: element, its
//! attributes, its children. This is the order in which the nodes' text
//! appears in the serialized document, so the n-th node serialized as some
//! string is expected at that string's n-th occurrence.
//!
//! Only the document text is stored; a node's serialization is a slice of
//! it. Candidates for a needle are found through a by-length index: nodes
//! of equal length never nest, so their spans are disjoint and comparing
//! them all against the needle costs at most one pass over the text.
//!
//! The document node is kept out of the candidates: its serialization can
//! be identical to that of a lone root element, and it only ever stands for
//! the whole text.

use std::collections::HashMap;
use std::ops::Range;

use crate::dom::serialize::{write_node_with, WalkEvent};
use crate::dom::{DocumentAccess, NodeId, NodeKind};

#[derive(Debug, Clone, Copy)]
struct Placed {
    kind: NodeKind,
    start: usize,
    end: usize,
}

/// Cached pre-order traversal of one tree snapshot
#[derive(Debug, Default)]
pub struct DocumentOrder {
    document: NodeId,
    /// Serialization of the document node
    text: String,
    /// Every node except the document node, in document order
    sequence: Vec<NodeId>,
    placed: HashMap<NodeId, Placed>,
    /// Serialization length -> nodes of that length, in document order
    by_len: HashMap<usize, Vec<NodeId>>,
}

impl DocumentOrder {
    /// Walk the whole document once
    pub fn build<D: DocumentAccess + ?Sized>(doc: &D) -> Self {
        let document = doc.document_node();
        let mut text = String::new();
        let mut sequence = Vec::new();
        let mut placed: HashMap<NodeId, Placed> = HashMap::new();

        write_node_with(doc, document, &mut text, |event| match event {
            WalkEvent::Enter(id, start) => {
                if let Some(kind) = doc.kind(id) {
                    placed.insert(id, Placed { kind, start, end: start });
                    if id != document {
                        sequence.push(id);
                    }
                }
            }
            WalkEvent::Leave(id, end) => {
                if let Some(node) = placed.get_mut(&id) {
                    node.end = end;
                }
            }
        });

        let mut by_len: HashMap<usize, Vec<NodeId>> = HashMap::new();
        for &id in &sequence {
            if let Some(node) = placed.get(&id) {
                by_len.entry(node.end - node.start).or_default().push(id);
            }
        }

        DocumentOrder {
            document,
            text,
            sequence,
            placed,
            by_len,
        }
    }

    /// The document node this traversal started from
    pub fn document_node(&self) -> NodeId {
        self.document
    }

    /// Serialization of the whole document
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Nodes in document order (document node excluded)
    pub fn sequence(&self) -> &[NodeId] {
        &self.sequence
    }

    /// Byte span of a node's text within [`text`](Self::text)
    pub fn span(&self, id: NodeId) -> Option<Range<usize>> {
        self.placed.get(&id).map(|node| node.start..node.end)
    }

    /// Serialization of a node, `None` if the node was not reached
    pub fn serialization(&self, id: NodeId) -> Option<&str> {
        self.text.get(self.span(id)?)
    }

    /// Kind of a visited node
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.placed.get(&id).map(|node| node.kind)
    }

    /// Nodes serialized exactly as `xml`, in document order
    pub fn nodes_serialized_as<'s>(&'s self, xml: &'s str) -> impl Iterator<Item = NodeId> + 's {
        self.by_len
            .get(&xml.len())
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&id| self.serialization(id) == Some(xml))
    }

    /// Every distinct serialization with its nodes, in document order
    pub fn groups(&self) -> Vec<(&str, Vec<NodeId>)> {
        let mut groups = Vec::new();
        for nodes in self.by_len.values() {
            if let [id] = nodes.as_slice() {
                if let Some(xml) = self.serialization(*id) {
                    groups.push((xml, vec![*id]));
                }
                continue;
            }
            let mut same: HashMap<&str, Vec<NodeId>> = HashMap::new();
            for &id in nodes {
                if let Some(xml) = self.serialization(id) {
                    same.entry(xml).or_default().push(id);
                }
            }
            groups.extend(same);
        }
        groups
    }

    /// Number of nodes in document order
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
