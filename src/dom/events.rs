//! Tree Construction Events
//!
//! Pull-parser style events a caller's XML reader emits to build an
//! [`XmlTree`](super::XmlTree). Values are already entity-decoded.

use std::borrow::Cow;

/// Tree construction event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent<'a> {
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// Empty element: <name attrs.../>
    EmptyElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement { name: Cow<'a, str> },
    /// Text content between tags
    Text(Cow<'a, str>),
    /// CDATA section content
    CData(Cow<'a, str>),
    /// Comment content
    Comment(Cow<'a, str>),
    /// Processing instruction: <?target data?>
    ProcessingInstruction {
        target: Cow<'a, str>,
        data: Cow<'a, str>,
    },
}

/// Start element event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement<'a> {
    /// Full element name (may include prefix)
    pub name: Cow<'a, str>,
    /// Attributes in source order
    pub attributes: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> StartElement<'a> {
    /// Create a start element without attributes
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        StartElement {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute
    pub fn with_attribute(
        mut self,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }
}

impl<'a> TreeEvent<'a> {
    /// `<name>` with no attributes
    pub fn start(name: impl Into<Cow<'a, str>>) -> Self {
        TreeEvent::StartElement(StartElement::new(name))
    }

    /// `</name>`
    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        TreeEvent::EndElement { name: name.into() }
    }

    /// Text node
    pub fn text(value: impl Into<Cow<'a, str>>) -> Self {
        TreeEvent::Text(value.into())
    }
}
