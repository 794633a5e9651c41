//! Whole-tree queries
//!
//! Locating many nodes at once and the reverse lookup (offset -> node).
//! With the `parallel` feature the work is spread over Rayon's pool, one
//! task per node or per serialization group.

use std::cmp::Reverse;
use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::session::MatchSession;
use crate::dom::{DocumentAccess, NodeId};

impl<D: DocumentAccess + Sync + ?Sized> MatchSession<'_, D> {
    /// [`locate`](MatchSession::locate) for every node, results in input order
    pub fn locate_all(&self, nodes: &[NodeId]) -> Vec<Option<Range<usize>>> {
        // build shared state once before fanning out
        self.document_order();

        #[cfg(feature = "parallel")]
        let located = nodes.par_iter().map(|&node| self.locate(node)).collect();
        #[cfg(not(feature = "parallel"))]
        let located = nodes.iter().map(|&node| self.locate(node)).collect();

        located
    }

    /// Innermost located node whose text contains byte `offset`
    ///
    /// Spans come from [`locate`](MatchSession::locate), so under the
    /// default policy a text node can own a range inside a tag.
    pub fn node_at(&self, offset: usize) -> Option<NodeId> {
        let spans = self.spans.get_or_init(|| self.located_spans());
        spans
            .iter()
            .filter(|(_, range)| range.contains(&offset))
            .min_by_key(|(_, range)| (range.len(), Reverse(range.start)))
            .map(|&(id, _)| id)
    }

    /// Text range of every node the matcher can place, sorted by start
    pub fn located_spans(&self) -> Vec<(NodeId, Range<usize>)> {
        let order = self.document_order();
        let groups = order.groups();

        let place = |(xml, nodes): &(&str, Vec<NodeId>)| {
            let offsets = self.counted(xml);
            nodes
                .iter()
                .zip(offsets)
                .map(|(&id, start)| (id, start..start + xml.len()))
                .collect::<Vec<_>>()
        };

        #[cfg(feature = "parallel")]
        let mut spans: Vec<_> = groups.par_iter().flat_map_iter(place).collect();
        #[cfg(not(feature = "parallel"))]
        let mut spans: Vec<_> = groups.iter().flat_map(place).collect();

        if let Some(whole) = self.locate(order.document_node()) {
            spans.push((order.document_node(), whole));
        }
        spans.sort_by_key(|(id, range)| (range.start, Reverse(range.end), *id));
        spans
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{NodeKind, TreeBuilder, XmlTree};
    use crate::matcher::{MatchOptions, MatchSession, OccurrencePolicy};

    fn catalog() -> XmlTree {
        let mut b = TreeBuilder::new();
        b.start_element("catalog");
        for id in ["1", "2"] {
            b.start_element("book")
                .attribute("id", id)
                .start_element("price")
                .text("29.99")
                .end_element()
                .end_element();
        }
        b.end_element();
        b.finish().unwrap()
    }

    #[test]
    fn test_locate_all_matches_locate() {
        let tree = catalog();
        let content = tree.node(0).unwrap().outer_xml();
        let session = MatchSession::new(&content, &tree);
        let ids: Vec<_> = (0..tree.node_count() as u32).collect();

        let all = session.locate_all(&ids);
        assert_eq!(all.len(), ids.len());
        for (&id, range) in ids.iter().zip(&all) {
            assert_eq!(range, &session.locate(id));
            assert!(range.is_some());
        }
    }

    #[test]
    fn test_node_at_innermost() {
        let tree = catalog();
        let content = tree.node(0).unwrap().outer_xml();
        let session = MatchSession::new(&content, &tree);

        let second = tree.find_element("book", "id", "2").unwrap();
        let price = tree.child_element(second, "price").unwrap();
        let digits = content.rfind("29.99").unwrap();
        let text = session.node_at(digits).unwrap();
        assert_eq!(tree.get_node(text).unwrap().kind, NodeKind::Text);
        assert_eq!(tree.get_node(text).unwrap().parent, Some(price));

        // inside the start tag of the second price
        let tag = content.rfind("<price>").unwrap() + 1;
        assert_eq!(session.node_at(tag), Some(price));

        let attr = content.find("id=\"2\"").unwrap();
        let found = session.node_at(attr).unwrap();
        assert_eq!(tree.get_node(found).unwrap().kind, NodeKind::Attribute);
        assert_eq!(tree.get_node(found).unwrap().parent, Some(second));

        assert_eq!(session.node_at(content.len()), None);
    }

    #[test]
    fn test_spans_cover_every_node() {
        let tree = catalog();
        let content = tree.node(0).unwrap().outer_xml();
        let session = MatchSession::new(&content, &tree);
        let spans = session.located_spans();
        assert_eq!(spans.len(), tree.node_count());
        assert_eq!(spans[0], (0, 0..content.len()));
        for (id, range) in spans {
            assert_eq!(content[range], tree.node(id).unwrap().outer_xml());
        }
    }

    #[test]
    fn test_text_inside_attribute_value() {
        let mut b = TreeBuilder::new();
        b.start_element("r")
            .attribute("id", "1")
            .start_element("v")
            .text("1")
            .end_element()
            .end_element();
        let tree = b.finish().unwrap();
        let content = "<r id=\"1\"><v>1</v></r>";
        let v = tree.elements_by_name("v")[0];
        let text = tree.children(v).next().unwrap();

        // the first raw "1" is the attribute value
        let literal = MatchSession::new(content, &tree);
        assert_eq!(literal.locate(text), Some(7..8));
        assert_eq!(literal.node_at(13), Some(v));

        let options = MatchOptions::default().with_policy(OccurrencePolicy::MarkupAligned);
        let aligned = MatchSession::with_options(content, &tree, options);
        assert_eq!(aligned.locate(text), Some(13..14));
        assert_eq!(aligned.node_at(13), Some(text));
        assert_eq!(aligned.node_at(7), tree.attributes(tree.root_element_id().unwrap()).next());
    }
}
