//! XML Node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.
//! Attribute nodes share the arena with every other node kind so a
//! node handle can point at an attribute just like at an element.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Attribute of an element (parent is the owner element)
    Attribute,
    /// Text content
    Text,
    /// CDATA section
    CData,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
}

impl NodeKind {
    /// Step name used in ancestor paths for nodes without a name of their own
    pub fn path_name(self) -> &'static str {
        match self {
            NodeKind::Document => "",
            NodeKind::Element | NodeKind::Attribute => "*",
            NodeKind::Text => "text()",
            NodeKind::CData => "cdata()",
            NodeKind::Comment => "comment()",
            NodeKind::ProcessingInstruction => "processing-instruction()",
        }
    }
}

/// An XML node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Index into string pool for name (elements, attributes, PI targets)
    pub name_id: u32,
    /// Index into string pool for value (attributes, text, CDATA, comments, PI data)
    pub value_id: u32,
    /// First attribute node (elements only); attributes are contiguous in the arena
    pub attr_start: NodeId,
    /// Number of attributes
    pub attr_count: u16,
    /// Depth in document tree
    pub depth: u16,
    /// Element was written as `<name/>`
    pub self_closing: bool,
}

impl XmlNode {
    fn with_kind(kind: NodeKind, parent: Option<NodeId>, depth: u16) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id: 0,
            value_id: 0,
            attr_start: 0,
            attr_count: 0,
            depth,
            self_closing: false,
        }
    }

    /// Create a new document root node
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, None, 0)
    }

    /// Create a new element node
    pub fn element(name_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Element, parent, depth);
        node.name_id = name_id;
        node
    }

    /// Create a new attribute node owned by `owner`
    pub fn attribute(name_id: u32, value_id: u32, owner: NodeId, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Attribute, Some(owner), depth);
        node.name_id = name_id;
        node.value_id = value_id;
        node
    }

    /// Create a new text node
    pub fn text(value_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Text, parent, depth);
        node.value_id = value_id;
        node
    }

    /// Create a new CDATA node
    pub fn cdata(value_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::CData, parent, depth);
        node.value_id = value_id;
        node
    }

    /// Create a new comment node
    pub fn comment(value_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        let mut node = Self::with_kind(NodeKind::Comment, parent, depth);
        node.value_id = value_id;
        node
    }

    /// Create a processing instruction node
    pub fn processing_instruction(
        target_id: u32,
        data_id: u32,
        parent: Option<NodeId>,
        depth: u16,
    ) -> Self {
        let mut node = Self::with_kind(NodeKind::ProcessingInstruction, parent, depth);
        node.name_id = target_id;
        node.value_id = data_id;
        node
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is an attribute node
    #[inline]
    pub fn is_attribute(&self) -> bool {
        self.kind == NodeKind::Attribute
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.attr_count > 0
    }

    /// Arena ids of this element's attribute nodes
    #[inline]
    pub fn attribute_ids(&self) -> std::ops::Range<NodeId> {
        self.attr_start..self.attr_start + self.attr_count as NodeId
    }
}
