//! Batch queries against one snapshot
//!
//! A [`MatchSession`] borrows the raw text and the tree it was produced
//! from, and caches everything derived from them: the document-order
//! traversal, the markup map and the occurrence lists of recently asked
//! node texts. Editors ask many questions against the same snapshot (one
//! per candidate offset, one per selection change), so none of that work
//! is repeated.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use lru::LruCache;

use super::context::{check, counted_occurrences, precheck, report};
use super::options::MatchOptions;
use super::order::DocumentOrder;
use crate::core::{occurrences, MarkupMap};
use crate::dom::{DocumentAccess, NodeHandle, NodeId};

/// Matcher state for one `(content, tree)` snapshot
pub struct MatchSession<'a, D: ?Sized> {
    content: &'a str,
    doc: &'a D,
    options: MatchOptions,
    order: OnceLock<DocumentOrder>,
    markup: OnceLock<MarkupMap>,
    occurrences: Mutex<LruCache<String, Arc<Vec<usize>>>>,
    pub(super) spans: OnceLock<Vec<(NodeId, Range<usize>)>>,
}

impl<'a, D: DocumentAccess + ?Sized> MatchSession<'a, D> {
    pub fn new(content: &'a str, doc: &'a D) -> Self {
        Self::with_options(content, doc, MatchOptions::default())
    }

    pub fn with_options(content: &'a str, doc: &'a D, options: MatchOptions) -> Self {
        MatchSession {
            content,
            doc,
            options,
            order: OnceLock::new(),
            markup: OnceLock::new(),
            occurrences: Mutex::new(LruCache::new(options.cache_capacity)),
            spans: OnceLock::new(),
        }
    }

    pub fn content(&self) -> &'a str {
        self.content
    }

    pub fn document(&self) -> &'a D {
        self.doc
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Handle for a node of this session's tree
    pub fn node(&self, id: NodeId) -> Option<NodeHandle<'a, D>> {
        NodeHandle::new(self.doc, id)
    }

    /// The document-order traversal, built on first use
    pub fn document_order(&self) -> &DocumentOrder {
        self.order.get_or_init(|| {
            let order = DocumentOrder::build(self.doc);
            log::trace!("document order built: {} nodes", order.len());
            order
        })
    }

    fn markup(&self) -> &MarkupMap {
        self.markup.get_or_init(|| MarkupMap::scan(self.content))
    }

    /// Occurrence offsets of `needle` under the session's policy, uncached
    pub(super) fn counted(&self, needle: &str) -> Vec<usize> {
        counted_occurrences(
            self.content,
            needle,
            self.document_order(),
            self.options.policy,
            || Cow::Borrowed(self.markup()),
        )
    }

    /// Occurrence offsets of `needle` taking part in ordinal counting
    pub fn occurrences(&self, needle: &str) -> Arc<Vec<usize>> {
        if let Some(hit) = self.lock_cache().get(needle) {
            return Arc::clone(hit);
        }
        let offsets = Arc::new(self.counted(needle));
        self.lock_cache()
            .put(needle.to_string(), Arc::clone(&offsets));
        offsets
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<Vec<usize>>>> {
        // entries are inserted whole, a poisoned cache is still consistent
        self.occurrences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Same answer as [`is_matching_node_context_with`](super::is_matching_node_context_with)
    /// for this snapshot and options
    pub fn is_match(&self, index: usize, node_xml: &str, node: NodeId) -> bool {
        let verdict = precheck(self.content, index, node_xml).and_then(|()| {
            let offsets = self.occurrences(node_xml);
            check(
                self.document_order(),
                index,
                node_xml,
                node,
                self.content.len(),
                &offsets,
            )
        });
        report(self.doc, index, node, verdict)
    }

    /// First raw occurrence of `node_xml` confirmed for `node`
    pub fn first_match(&self, node_xml: &str, node: NodeId) -> Option<usize> {
        occurrences(self.content, node_xml)
            .into_iter()
            .find(|&index| self.is_match(index, node_xml, node))
    }

    /// Byte range of the text produced by `node`
    ///
    /// Under [`Literal`](super::OccurrencePolicy::Literal) the range is the
    /// raw occurrence with the node's ordinal, which may lie inside markup:
    /// text `1` in `<r id="1"><v>1</v></r>` is placed in the attribute value.
    /// [`MarkupAligned`](super::OccurrencePolicy::MarkupAligned) places it
    /// on the character data.
    pub fn locate(&self, node: NodeId) -> Option<Range<usize>> {
        let order = self.document_order();
        let xml = order.serialization(node)?;
        if xml.is_empty() {
            return None;
        }
        if node == order.document_node() {
            return (xml == self.content).then(|| 0..self.content.len());
        }

        let position = order
            .nodes_serialized_as(xml)
            .position(|c| c == node)?;
        let start = *self.occurrences(xml).get(position)?;
        Some(start..start + xml.len())
    }

    /// Cache capacity actually in use
    pub fn cache_capacity(&self) -> NonZeroUsize {
        self.lock_cache().cap()
    }
}

impl<D: ?Sized> std::fmt::Debug for MatchSession<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("content_len", &self.content.len())
            .field("options", &self.options)
            .field("order_built", &self.order.get().is_some())
            .finish()
    }
}
