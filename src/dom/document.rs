//! XML Tree - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes (attributes included)
//! - NodeId indices for traversal
//! - String interning for names and values
//!
//! The arena is filled in event order, so node ids increase in document
//! order: an element, then its attributes, then its children.

use super::events::TreeEvent;
use super::handle::NodeHandle;
use super::node::{NodeId, NodeKind, XmlNode};
use super::strings::StringPool;
use super::DocumentAccess;
use crate::error::TreeError;

/// An XML document stored in arena format
#[derive(Debug)]
pub struct XmlTree {
    /// Arena of nodes; index 0 is the document node
    nodes: Vec<XmlNode>,
    /// Interned strings
    strings: StringPool,
    /// First top-level element
    root_element: Option<NodeId>,
}

impl XmlTree {
    /// Build a tree from a stream of construction events
    pub fn from_events<'a, I>(events: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = TreeEvent<'a>>,
    {
        let mut builder = TreeBuilder::new();
        for event in events {
            builder.push_event(event);
        }
        builder.finish()
    }

    /// Get the document node ID (always 0)
    #[inline]
    pub fn document_id(&self) -> NodeId {
        0
    }

    /// Get root element ID (first top-level element)
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get a handle to a node, if it exists in this tree
    pub fn node(&self, id: NodeId) -> Option<NodeHandle<'_, Self>> {
        NodeHandle::new(self, id)
    }

    /// Get node name as string (elements, attributes, PI targets)
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Element | NodeKind::Attribute | NodeKind::ProcessingInstruction => {
                self.strings.get(node.name_id)
            }
            _ => None,
        }
    }

    /// Get node value (attributes, text, CDATA, comments, PI data)
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Document | NodeKind::Element => None,
            _ => self.strings.get(node.value_id),
        }
    }

    /// Iterate over the attribute node ids of an element
    pub fn attributes(&self, id: NodeId) -> std::ops::Range<NodeId> {
        match self.get_node(id) {
            Some(node) if node.is_element() => node.attribute_ids(),
            _ => 0..0,
        }
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.attributes(node_id)
            .find(|&attr| self.node_name(attr) == Some(name))
            .and_then(|attr| self.node_value(attr))
    }

    /// Get all attribute names and values for a node
    pub fn get_attribute_values(&self, node_id: NodeId) -> Vec<(&str, &str)> {
        self.attributes(node_id)
            .filter_map(|attr| Some((self.node_name(attr)?, self.node_value(attr)?)))
            .collect()
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { tree: self, next: first }
    }

    /// Iterate over all descendants of a node (depth-first, attributes excluded)
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { tree: self, stack }
    }

    /// All elements with the given name, in document order
    pub fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.descendants(0)
            .filter(|&id| {
                self.get_node(id).is_some_and(|n| n.is_element()) && self.node_name(id) == Some(name)
            })
            .collect()
    }

    /// First element named `name` carrying `attr="value"`
    pub fn find_element(&self, name: &str, attr: &str, value: &str) -> Option<NodeId> {
        self.elements_by_name(name)
            .into_iter()
            .find(|&id| self.get_attribute(id, attr) == Some(value))
    }

    /// First child element of `parent` named `name`
    pub fn child_element(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&id| {
            self.get_node(id).is_some_and(|n| n.is_element()) && self.node_name(id) == Some(name)
        })
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the string pool
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }
}

/// Iterator over child nodes
pub struct ChildIter<'t> {
    tree: &'t XmlTree,
    next: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'t> {
    tree: &'t XmlTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(node) = self.tree.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.tree.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}

impl DocumentAccess for XmlTree {
    fn document_node(&self) -> NodeId {
        0
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get_node(id).map(|n| n.kind)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.parent
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        XmlTree::node_name(self, id)
    }

    fn node_value(&self, id: NodeId) -> Option<&str> {
        XmlTree::node_value(self, id)
    }

    fn children_vec(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).collect()
    }

    fn attributes_vec(&self, id: NodeId) -> Vec<NodeId> {
        self.attributes(id).collect()
    }

    fn is_self_closing(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.self_closing)
    }
}

/// Incremental builder for [`XmlTree`]
///
/// Calls chain; the first structural error is kept and reported by
/// [`finish`](TreeBuilder::finish). Multiple top-level elements are accepted.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<XmlNode>,
    strings: StringPool,
    /// Open elements, starting with the document node
    stack: Vec<NodeId>,
    /// Element that may still receive attributes
    attr_target: Option<NodeId>,
    root_element: Option<NodeId>,
    error: Option<TreeError>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(XmlNode::document());
        TreeBuilder {
            nodes,
            strings: StringPool::new(),
            stack: vec![0],
            attr_target: None,
            root_element: None,
            error: None,
        }
    }

    /// Apply a construction event
    pub fn push_event(&mut self, event: TreeEvent<'_>) -> &mut Self {
        match event {
            TreeEvent::StartElement(elem) => {
                self.start_element(&elem.name);
                for (name, value) in &elem.attributes {
                    self.attribute(name, value);
                }
            }
            TreeEvent::EmptyElement(elem) => {
                self.empty_element(&elem.name);
                for (name, value) in &elem.attributes {
                    self.attribute(name, value);
                }
            }
            TreeEvent::EndElement { name } => {
                self.end_element_named(&name);
            }
            TreeEvent::Text(value) => {
                self.text(&value);
            }
            TreeEvent::CData(value) => {
                self.cdata(&value);
            }
            TreeEvent::Comment(value) => {
                self.comment(&value);
            }
            TreeEvent::ProcessingInstruction { target, data } => {
                self.processing_instruction(&target, &data);
            }
        }
        self
    }

    /// Open `<name>`; following `attribute` calls attach to it
    pub fn start_element(&mut self, name: &str) -> &mut Self {
        if let Some(id) = self.add_element(name, false) {
            self.stack.push(id);
        }
        self
    }

    /// Add `<name/>`; following `attribute` calls attach to it
    pub fn empty_element(&mut self, name: &str) -> &mut Self {
        self.add_element(name, true);
        self
    }

    /// Add an attribute to the element started just before
    pub fn attribute(&mut self, name: &str, value: &str) -> &mut Self {
        let Some(owner) = self.attr_target else {
            self.fail(TreeError::MisplacedAttribute {
                name: name.to_string(),
            });
            return self;
        };
        let (Some(name_id), Some(value_id)) = (self.intern(name), self.intern(value)) else {
            return self;
        };
        let count = self.nodes[owner as usize].attr_count;
        let Some(next_count) = count.checked_add(1) else {
            self.fail(TreeError::TooManyAttributes);
            return self;
        };
        let depth = self.nodes[owner as usize].depth.saturating_add(1);
        let Some(attr_id) = self.push_node(XmlNode::attribute(name_id, value_id, owner, depth))
        else {
            return self;
        };

        let owner_node = &mut self.nodes[owner as usize];
        if count == 0 {
            owner_node.attr_start = attr_id;
        }
        owner_node.attr_count = next_count;
        self
    }

    /// Close the innermost open element
    pub fn end_element(&mut self) -> &mut Self {
        self.attr_target = None;
        if self.stack.len() <= 1 {
            self.fail(TreeError::UnexpectedEnd);
        } else {
            self.stack.pop();
        }
        self
    }

    /// Close the innermost open element, checking its name
    pub fn end_element_named(&mut self, name: &str) -> &mut Self {
        if self.stack.len() > 1 {
            let open = *self.stack.last().unwrap_or(&0);
            let expected = self.strings.get(self.nodes[open as usize].name_id).unwrap_or("");
            if expected != name {
                let err = TreeError::MismatchedEnd {
                    expected: expected.to_string(),
                    found: name.to_string(),
                };
                self.fail(err);
            }
        }
        self.end_element()
    }

    /// Add a text node
    pub fn text(&mut self, value: &str) -> &mut Self {
        self.add_leaf(value, XmlNode::text)
    }

    /// Add a CDATA section
    pub fn cdata(&mut self, value: &str) -> &mut Self {
        self.add_leaf(value, XmlNode::cdata)
    }

    /// Add a comment
    pub fn comment(&mut self, value: &str) -> &mut Self {
        self.add_leaf(value, XmlNode::comment)
    }

    /// Add a processing instruction
    pub fn processing_instruction(&mut self, target: &str, data: &str) -> &mut Self {
        self.attr_target = None;
        let (Some(target_id), Some(data_id)) = (self.intern(target), self.intern(data)) else {
            return self;
        };
        let (parent_id, depth) = self.insertion_point();
        let node = XmlNode::processing_instruction(target_id, data_id, Some(parent_id), depth);
        if let Some(node_id) = self.push_node(node) {
            self.link_child(parent_id, node_id);
        }
        self
    }

    /// Finish building, reporting the first structural error
    pub fn finish(self) -> Result<XmlTree, TreeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some(&unclosed) = self.stack.get(1) {
            let name = self
                .strings
                .get(self.nodes[unclosed as usize].name_id)
                .unwrap_or("")
                .to_string();
            return Err(TreeError::Unclosed { name });
        }
        Ok(XmlTree {
            nodes: self.nodes,
            strings: self.strings,
            root_element: self.root_element,
        })
    }

    fn add_element(&mut self, name: &str, self_closing: bool) -> Option<NodeId> {
        self.attr_target = None;
        let name_id = self.intern(name)?;
        let (parent_id, depth) = self.insertion_point();

        let mut node = XmlNode::element(name_id, Some(parent_id), depth);
        node.self_closing = self_closing;
        let node_id = self.push_node(node)?;
        self.link_child(parent_id, node_id);

        // Track root element
        if self.root_element.is_none() && parent_id == 0 {
            self.root_element = Some(node_id);
        }
        self.attr_target = Some(node_id);
        Some(node_id)
    }

    fn add_leaf(
        &mut self,
        value: &str,
        make: fn(u32, Option<NodeId>, u16) -> XmlNode,
    ) -> &mut Self {
        self.attr_target = None;
        let Some(value_id) = self.intern(value) else {
            return self;
        };
        let (parent_id, depth) = self.insertion_point();
        if let Some(node_id) = self.push_node(make(value_id, Some(parent_id), depth)) {
            self.link_child(parent_id, node_id);
        }
        self
    }

    fn insertion_point(&self) -> (NodeId, u16) {
        let parent_id = *self.stack.last().unwrap_or(&0);
        let depth = u16::try_from(self.stack.len()).unwrap_or(u16::MAX);
        (parent_id, depth)
    }

    fn intern(&mut self, s: &str) -> Option<u32> {
        let id = self.strings.intern(s);
        if id.is_none() {
            self.fail(TreeError::TooManyNodes);
        }
        id
    }

    fn push_node(&mut self, node: XmlNode) -> Option<NodeId> {
        let Ok(id) = NodeId::try_from(self.nodes.len()) else {
            self.fail(TreeError::TooManyNodes);
            return None;
        };
        self.nodes.push(node);
        Some(id)
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    fn fail(&mut self, err: TreeError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
