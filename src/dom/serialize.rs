//! Node-to-text serialization
//!
//! Produces the literal text a node occupies in the raw document view.
//! Comparisons against raw text are byte-exact, so the only normalization
//! performed is the minimal escaping below.

use std::borrow::Cow;

use super::node::{NodeId, NodeKind};
use super::DocumentAccess;

/// Encode text content (escapes `&`, `<`, `>`)
pub fn encode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if any escaping needed
    if !input.bytes().any(|b| matches!(b, b'<' | b'>' | b'&')) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Encode an attribute value for a double-quoted attribute (escapes `&`, `<`, `"`)
pub fn encode_attribute(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(|b| matches!(b, b'<' | b'&' | b'"')) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Serialize a node and its subtree
pub fn outer_xml<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId) -> Option<String> {
    doc.kind(id)?;
    let mut out = String::new();
    write_node(doc, id, &mut out);
    Some(out)
}

/// Append the serialization of `id` and its subtree to `out`
pub fn write_node<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId, out: &mut String) {
    write_node_with(doc, id, out, |_| {});
}

/// Where a node's text begins or ends in the output of [`write_node_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    /// Node text starts at this byte offset
    Enter(NodeId, usize),
    /// Node text ends at this byte offset (exclusive)
    Leave(NodeId, usize),
}

/// [`write_node`] reporting each node's byte span through `on_event`.
///
/// Nodes are entered in document order: element, its attributes, its
/// children. Iterative, so nesting depth is bounded by memory only.
pub fn write_node_with<D, F>(doc: &D, id: NodeId, out: &mut String, mut on_event: F)
where
    D: DocumentAccess + ?Sized,
    F: FnMut(WalkEvent),
{
    enum Step {
        Enter(NodeId),
        Close(NodeId, NodeKind),
    }

    let mut stack = vec![Step::Enter(id)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Close(current, kind) => {
                if kind == NodeKind::Element {
                    out.push_str("</");
                    out.push_str(doc.node_name(current).unwrap_or(""));
                    out.push('>');
                }
                on_event(WalkEvent::Leave(current, out.len()));
            }
            Step::Enter(current) => {
                let Some(kind) = doc.kind(current) else {
                    continue;
                };
                on_event(WalkEvent::Enter(current, out.len()));
                match kind {
                    NodeKind::Document => {
                        stack.push(Step::Close(current, kind));
                        let children = doc.children_vec(current);
                        stack.extend(children.into_iter().rev().map(Step::Enter));
                    }
                    NodeKind::Element => {
                        out.push('<');
                        out.push_str(doc.node_name(current).unwrap_or(""));
                        for attr in doc.attributes_vec(current) {
                            out.push(' ');
                            on_event(WalkEvent::Enter(attr, out.len()));
                            write_leaf(doc, attr, out);
                            on_event(WalkEvent::Leave(attr, out.len()));
                        }
                        let children = doc.children_vec(current);
                        if children.is_empty() && doc.is_self_closing(current) {
                            out.push_str("/>");
                            on_event(WalkEvent::Leave(current, out.len()));
                        } else {
                            out.push('>');
                            stack.push(Step::Close(current, kind));
                            // reversed so the first child is popped first
                            stack.extend(children.into_iter().rev().map(Step::Enter));
                        }
                    }
                    _ => {
                        write_leaf(doc, current, out);
                        on_event(WalkEvent::Leave(current, out.len()));
                    }
                }
            }
        }
    }
}

/// Serialize a node that cannot have children
pub fn write_leaf<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId, out: &mut String) {
    let value = doc.node_value(id).unwrap_or("");
    match doc.kind(id) {
        Some(NodeKind::Attribute) => {
            out.push_str(doc.node_name(id).unwrap_or(""));
            out.push_str("=\"");
            out.push_str(&encode_attribute(value));
            out.push('"');
        }
        Some(NodeKind::Text) => out.push_str(&encode_text(value)),
        Some(NodeKind::CData) => {
            out.push_str("<![CDATA[");
            out.push_str(value);
            out.push_str("]]>");
        }
        Some(NodeKind::Comment) => {
            out.push_str("<!--");
            out.push_str(value);
            out.push_str("-->");
        }
        Some(NodeKind::ProcessingInstruction) => {
            out.push_str("<?");
            out.push_str(doc.node_name(id).unwrap_or(""));
            if !value.is_empty() {
                out.push(' ');
                out.push_str(value);
            }
            out.push_str("?>");
        }
        Some(NodeKind::Document) | Some(NodeKind::Element) | None => {}
    }
}
