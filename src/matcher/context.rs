//! Context Matcher
//!
//! Decides whether the occurrence of a node's serialization at a given
//! offset of the raw text is the one produced by that exact node, and not
//! by a textually identical node elsewhere in the tree.
//!
//! The occurrence's ordinal among all (non-overlapping) occurrences of the
//! text must equal the node's ordinal among all nodes serialized as that
//! text, walked in document order. Every inconsistent input is simply "no
//! match"; the reason is only reported through `log` at debug level.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use super::options::{MatchOptions, OccurrencePolicy};
use super::order::DocumentOrder;
use crate::core::{occurrences, occurs_at, ordinal_of, MarkupMap};
use crate::dom::{AncestorPath, DocumentAccess, NodeHandle, NodeId, NodeKind};

/// Why an occurrence was not attributed to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    EmptyInput,
    TextMismatch,
    NodeNotInTree,
    NodeTextDiffers,
    DocumentNotWhole,
    NotAnOccurrence,
    OrdinalMismatch { occurrence: usize, node: Option<usize> },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyInput => f.write_str("empty content or node text"),
            Rejection::TextMismatch => f.write_str("node text does not occur at this offset"),
            Rejection::NodeNotInTree => f.write_str("node is not reachable from the document"),
            Rejection::NodeTextDiffers => f.write_str("node serializes to different text"),
            Rejection::DocumentNotWhole => {
                f.write_str("document node only matches the whole text at offset 0")
            }
            Rejection::NotAnOccurrence => {
                f.write_str("offset is not a counted occurrence of the node text")
            }
            Rejection::OrdinalMismatch {
                occurrence,
                node: Some(node),
            } => write!(
                f,
                "occurrence #{occurrence} belongs to another node, this node is #{node}"
            ),
            Rejection::OrdinalMismatch {
                occurrence,
                node: None,
            } => write!(f, "occurrence #{occurrence} has no counterpart for this node"),
        }
    }
}

/// Whether the occurrence of `node_xml` at byte offset `index` of `content`
/// is the text produced by `node`.
///
/// Total over its inputs: out-of-range or mid-character offsets, text that
/// is not at `index`, and nodes from another tree are all `false`.
pub fn is_matching_node_context<D: DocumentAccess + ?Sized>(
    content: &str,
    index: usize,
    node_xml: &str,
    node: NodeHandle<'_, D>,
) -> bool {
    is_matching_node_context_with(content, index, node_xml, node, &MatchOptions::default())
}

/// [`is_matching_node_context`] with explicit options
pub fn is_matching_node_context_with<D: DocumentAccess + ?Sized>(
    content: &str,
    index: usize,
    node_xml: &str,
    node: NodeHandle<'_, D>,
    options: &MatchOptions,
) -> bool {
    let doc = node.document();
    let verdict = precheck(content, index, node_xml).and_then(|()| {
        let order = DocumentOrder::build(doc);
        let offsets = counted_occurrences(
            content,
            node_xml,
            &order,
            options.policy,
            || Cow::Owned(MarkupMap::scan(content)),
        );
        check(&order, index, node_xml, node.id(), content.len(), &offsets)
    });
    report(doc, index, node.id(), verdict)
}

/// Checks that need neither the tree nor the occurrence list
pub(crate) fn precheck(content: &str, index: usize, node_xml: &str) -> Result<(), Rejection> {
    if content.is_empty() || node_xml.is_empty() {
        return Err(Rejection::EmptyInput);
    }
    if !occurs_at(content, index, node_xml) {
        return Err(Rejection::TextMismatch);
    }
    Ok(())
}

/// Ordinal alignment of `node` against the counted occurrence `offsets`
pub(crate) fn check(
    order: &DocumentOrder,
    index: usize,
    node_xml: &str,
    node: NodeId,
    content_len: usize,
    offsets: &[usize],
) -> Result<(), Rejection> {
    let serialized = order.serialization(node).ok_or(Rejection::NodeNotInTree)?;
    if serialized != node_xml {
        return Err(Rejection::NodeTextDiffers);
    }

    if node == order.document_node() {
        return if index == 0 && node_xml.len() == content_len {
            Ok(())
        } else {
            Err(Rejection::DocumentNotWhole)
        };
    }

    let occurrence = ordinal_of(offsets, index).ok_or(Rejection::NotAnOccurrence)?;
    // `node` itself serializes to `node_xml`, so it is always a candidate
    let candidates: Vec<NodeId> = order.nodes_serialized_as(node_xml).collect();
    if candidates.get(occurrence - 1) == Some(&node) {
        Ok(())
    } else {
        let position = candidates.iter().position(|&c| c == node).map(|p| p + 1);
        Err(Rejection::OrdinalMismatch {
            occurrence,
            node: position,
        })
    }
}

/// Occurrence offsets of `needle` that take part in ordinal counting.
/// `markup` is only called under [`OccurrencePolicy::MarkupAligned`].
pub(crate) fn counted_occurrences<'m>(
    content: &str,
    needle: &str,
    order: &DocumentOrder,
    policy: OccurrencePolicy,
    markup: impl FnOnce() -> Cow<'m, MarkupMap>,
) -> Vec<usize> {
    let offsets = occurrences(content, needle);
    match policy {
        OccurrencePolicy::Literal => offsets,
        OccurrencePolicy::MarkupAligned => {
            let map = markup();
            filter_aligned(content, needle, order, &map, offsets)
        }
    }
}

/// Keep the offsets where a node of any candidate kind could sit
pub(crate) fn filter_aligned(
    content: &str,
    needle: &str,
    order: &DocumentOrder,
    markup: &MarkupMap,
    offsets: Vec<usize>,
) -> Vec<usize> {
    let kinds: HashSet<NodeKind> = order
        .nodes_serialized_as(needle)
        .filter_map(|id| order.kind(id))
        .collect();
    if kinds.is_empty() {
        return offsets;
    }
    offsets
        .into_iter()
        .filter(|&start| {
            let end = start + needle.len();
            kinds
                .iter()
                .any(|&kind| markup.is_aligned(content, kind, start, end))
        })
        .collect()
}

/// Log the verdict and collapse it to the boolean contract
pub(crate) fn report<D: DocumentAccess + ?Sized>(
    doc: &D,
    index: usize,
    node: NodeId,
    verdict: Result<(), Rejection>,
) -> bool {
    match verdict {
        Ok(()) => {
            log::trace!("node {node} matches occurrence at offset {index}");
            true
        }
        Err(reason) => {
            if log::log_enabled!(log::Level::Debug) {
                log::debug!(
                    "node {} ({}) rejected at offset {index}: {reason}",
                    node,
                    AncestorPath::of(doc, node)
                );
            }
            false
        }
    }
}
