//! Integration tests for the context matcher
//!
//! Trees are built with `TreeBuilder` and the raw text is their verbatim
//! serialization, as a text view shows it after loading.

use xmlsync::dom::StartElement;
use xmlsync::{
    is_matching_node_context, is_matching_node_context_with, MatchOptions, MatchSession, NodeId,
    OccurrencePolicy, TreeBuilder, TreeEvent, XmlTree,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `<book id="..."><{leaf}>{value}</{leaf}></book>` for each id, top level
fn books(ids: &[&str], leaf: &str, value: &str) -> XmlTree {
    let mut b = TreeBuilder::new();
    for id in ids {
        b.start_element("book")
            .attribute("id", id)
            .start_element(leaf)
            .text(value)
            .end_element()
            .end_element();
    }
    b.finish().unwrap()
}

fn content_of(tree: &XmlTree) -> String {
    tree.node(tree.document_id()).unwrap().outer_xml()
}

fn leaf_of(tree: &XmlTree, id: &str, leaf: &str) -> NodeId {
    let book = tree.find_element("book", "id", id).unwrap();
    tree.child_element(book, leaf).unwrap()
}

#[test]
fn exact_single_occurrence_matches() {
    init();
    let tree = books(&["1"], "title", "Introduction to XML");
    let content = content_of(&tree);
    assert_eq!(
        content,
        r#"<book id="1"><title>Introduction to XML</title></book>"#
    );

    let node_xml = "<title>Introduction to XML</title>";
    let index = content.find(node_xml).unwrap();
    let title = tree.node(leaf_of(&tree, "1", "title")).unwrap();
    assert!(is_matching_node_context(&content, index, node_xml, title));
}

#[test]
fn first_occurrence_rejected_for_other_parent() {
    init();
    let tree = books(&["1", "2"], "title", "Introduction to XML");
    let content = content_of(&tree);
    let node_xml = "<title>Introduction to XML</title>";
    let index = content.find(node_xml).unwrap();
    let title = tree.node(leaf_of(&tree, "2", "title")).unwrap();
    assert!(!is_matching_node_context(&content, index, node_xml, title));
}

#[test]
fn repeated_value_resolved_by_document_order() {
    init();
    let tree = books(&["1", "2"], "price", "29.99");
    let content = content_of(&tree);
    assert_eq!(
        content,
        r#"<book id="1"><price>29.99</price></book><book id="2"><price>29.99</price></book>"#
    );

    let node_xml = "<price>29.99</price>";
    let first = content.find(node_xml).unwrap();
    let second = content[first + 1..].find(node_xml).unwrap() + first + 1;

    let p1 = tree.node(leaf_of(&tree, "1", "price")).unwrap();
    let p2 = tree.node(leaf_of(&tree, "2", "price")).unwrap();
    assert!(is_matching_node_context(&content, second, node_xml, p2));
    assert!(!is_matching_node_context(&content, first, node_xml, p2));
    assert!(is_matching_node_context(&content, first, node_xml, p1));
    assert!(!is_matching_node_context(&content, second, node_xml, p1));
}

#[test]
fn repeated_value_under_common_ancestor() {
    let tree = XmlTree::from_events([
        TreeEvent::start("catalog"),
        TreeEvent::StartElement(StartElement::new("book").with_attribute("id", "1")),
        TreeEvent::start("price"),
        TreeEvent::text("29.99"),
        TreeEvent::end("price"),
        TreeEvent::end("book"),
        TreeEvent::StartElement(StartElement::new("book").with_attribute("id", "2")),
        TreeEvent::start("price"),
        TreeEvent::text("29.99"),
        TreeEvent::end("price"),
        TreeEvent::end("book"),
        TreeEvent::end("catalog"),
    ])
    .unwrap();
    let content = content_of(&tree);
    let node_xml = "<price>29.99</price>";
    let second = content.rfind(node_xml).unwrap();
    let p2 = tree.node(leaf_of(&tree, "2", "price")).unwrap();

    assert!(is_matching_node_context(&content, second, node_xml, p2));
    assert!(!is_matching_node_context(
        &content,
        content.find(node_xml).unwrap(),
        node_xml,
        p2
    ));
}

#[test]
fn leaf_under_distinct_parents() {
    let mut b = TreeBuilder::new();
    b.start_element("r")
        .start_element("author")
        .start_element("name")
        .text("Kim")
        .end_element()
        .end_element()
        .start_element("editor")
        .start_element("name")
        .text("Kim")
        .end_element()
        .end_element()
        .end_element();
    let tree = b.finish().unwrap();
    let content = content_of(&tree);

    let editor = tree.elements_by_name("editor")[0];
    let name = tree.node(tree.child_element(editor, "name").unwrap()).unwrap();
    let node_xml = "<name>Kim</name>";
    let under_author = content.find(node_xml).unwrap();
    let under_editor = content.rfind(node_xml).unwrap();

    assert!(!is_matching_node_context(&content, under_author, node_xml, name));
    assert!(is_matching_node_context(&content, under_editor, node_xml, name));

    // the text node follows its element
    let text = tree.node(tree.children(name.id()).next().unwrap()).unwrap();
    let kim = content.rfind("Kim").unwrap();
    assert!(is_matching_node_context(&content, kim, "Kim", text));
    assert!(!is_matching_node_context(&content, content.find("Kim").unwrap(), "Kim", text));
}

#[test]
fn repeated_calls_agree() {
    let tree = books(&["1", "2", "3"], "price", "1");
    let content = content_of(&tree);
    let node_xml = "<price>1</price>";
    let p3 = tree.node(leaf_of(&tree, "3", "price")).unwrap();
    for index in 0..content.len() {
        let once = is_matching_node_context(&content, index, node_xml, p3);
        let twice = is_matching_node_context(&content, index, node_xml, p3);
        assert_eq!(once, twice);
    }
}

#[test]
fn ordinals_track_document_order() {
    let forward = books(&["1", "2"], "price", "5");
    let reversed = books(&["2", "1"], "price", "5");
    let node_xml = "<price>5</price>";

    let content = content_of(&reversed);
    let first = content.find(node_xml).unwrap();
    let second = content.rfind(node_xml).unwrap();

    // book 2 now comes first
    let p2 = reversed.node(leaf_of(&reversed, "2", "price")).unwrap();
    assert!(is_matching_node_context(&content, first, node_xml, p2));
    assert!(!is_matching_node_context(&content, second, node_xml, p2));

    let content = content_of(&forward);
    let p2 = forward.node(leaf_of(&forward, "2", "price")).unwrap();
    assert!(is_matching_node_context(&content, second, node_xml, p2));
}

#[test]
fn bad_offsets_and_text_are_rejected() {
    init();
    let mut b = TreeBuilder::new();
    b.start_element("p").text("naïve café").end_element();
    let tree = b.finish().unwrap();
    let content = content_of(&tree);
    let root = tree.node(tree.root_element_id().unwrap()).unwrap();
    let text = tree.node(tree.children(root.id()).next().unwrap()).unwrap();

    assert!(is_matching_node_context(&content, 3, "naïve café", text));
    assert!(!is_matching_node_context(&content, content.len(), "naïve café", text));
    assert!(!is_matching_node_context(&content, content.len() + 10, "naïve café", text));
    assert!(!is_matching_node_context(&content, usize::MAX, "naïve café", text));
    // inside the two-byte 'ï'
    let mid = content.find('ï').unwrap() + 1;
    assert!(!is_matching_node_context(&content, mid, "ve café", text));
    assert!(!is_matching_node_context(&content, 4, "naïve café", text));
    assert!(!is_matching_node_context("", 0, "naïve café", text));
    assert!(!is_matching_node_context(&content, 3, "", text));
}

#[test]
fn node_serializing_differently_is_rejected() {
    let tree = books(&["1"], "price", "29.99");
    let content = content_of(&tree);
    let book = tree.node(tree.root_element_id().unwrap()).unwrap();
    // text is present at the offset but belongs to the child
    let node_xml = "<price>29.99</price>";
    let index = content.find(node_xml).unwrap();
    assert!(!is_matching_node_context(&content, index, node_xml, book));
}

#[test]
fn node_from_unrelated_tree() {
    let tree = books(&["1"], "price", "29.99");
    let content = content_of(&tree);
    let other = books(&["1"], "price", "30.00");
    let price = other.node(leaf_of(&other, "1", "price")).unwrap();
    let node_xml = "<price>29.99</price>";
    let index = content.find(node_xml).unwrap();
    assert!(!is_matching_node_context(&content, index, node_xml, price));
}

#[test]
fn escaped_values_match_their_serialization() {
    let mut b = TreeBuilder::new();
    b.start_element("q")
        .attribute("title", "a \"b\" & c")
        .text("1 < 2 & 3")
        .end_element();
    let tree = b.finish().unwrap();
    let content = content_of(&tree);
    assert_eq!(
        content,
        r#"<q title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3</q>"#
    );

    let q = tree.root_element_id().unwrap();
    let attr = tree.node(tree.attributes(q).start).unwrap();
    let attr_xml = attr.outer_xml();
    assert!(is_matching_node_context(&content, 3, &attr_xml, attr));

    let text = tree.node(tree.children(q).next().unwrap()).unwrap();
    let at = content.find("1 &lt;").unwrap();
    assert!(is_matching_node_context(&content, at, "1 &lt; 2 &amp; 3", text));
}

#[test]
fn markup_aligned_skips_tag_names() {
    let mut b = TreeBuilder::new();
    b.start_element("a").text("a").end_element();
    let tree = b.finish().unwrap();
    let content = content_of(&tree);
    assert_eq!(content, "<a>a</a>");
    let root = tree.root_element_id().unwrap();
    let text = tree.node(tree.children(root).next().unwrap()).unwrap();

    // every raw "a" counts, so the first one (the tag name) is attributed
    assert!(is_matching_node_context(&content, 1, "a", text));
    assert!(!is_matching_node_context(&content, 3, "a", text));

    let aligned = MatchOptions::default().with_policy(OccurrencePolicy::MarkupAligned);
    assert!(!is_matching_node_context_with(&content, 1, "a", text, &aligned));
    assert!(is_matching_node_context_with(&content, 3, "a", text, &aligned));
    assert!(!is_matching_node_context_with(&content, 6, "a", text, &aligned));
}

#[test]
fn session_maps_between_views() {
    init();
    let mut b = TreeBuilder::new();
    b.start_element("catalog");
    for (id, price) in [("1", "9"), ("2", "9"), ("3", "12")] {
        b.start_element("book")
            .attribute("id", id)
            .start_element("price")
            .text(price)
            .end_element()
            .end_element();
    }
    b.comment(" end ").end_element();
    let tree = b.finish().unwrap();
    let content = content_of(&tree);
    let session = MatchSession::new(&content, &tree);

    // tree -> text
    let p2 = leaf_of(&tree, "2", "price");
    let range = session.locate(p2).unwrap();
    assert_eq!(&content[range.clone()], "<price>9</price>");
    assert_eq!(Some(range.start), session.first_match("<price>9</price>", p2));

    // text -> tree
    assert_eq!(session.node_at(range.start + 2), Some(p2));
    let comment = content.find("<!--").unwrap();
    let found = session.node_at(comment).unwrap();
    assert_eq!(tree.node(found).unwrap().outer_xml(), "<!-- end -->");

    let ids: Vec<_> = tree.elements_by_name("price");
    let located = session.locate_all(&ids);
    let texts: Vec<_> = located
        .into_iter()
        .map(|r| &content[r.unwrap()])
        .collect();
    assert_eq!(texts, ["<price>9</price>", "<price>9</price>", "<price>12</price>"]);
}

#[test]
fn caret_offsets_from_text_views() {
    use xmlsync::text::{from_byte_offset, to_byte_offset};
    use xmlsync::OffsetEncoding;

    let mut b = TreeBuilder::new();
    b.start_element("r")
        .start_element("s")
        .text("𝄞")
        .end_element()
        .start_element("s")
        .text("𝄞")
        .end_element()
        .end_element();
    let tree = b.finish().unwrap();
    let content = content_of(&tree);
    let second = tree.elements_by_name("s")[1];
    let node = tree.node(second).unwrap();

    // a UTF-16 view reports the second <s> at unit 12, it starts at byte 14
    let byte = to_byte_offset(&content, 12, OffsetEncoding::Utf16).unwrap();
    assert_eq!(byte, 14);
    assert!(is_matching_node_context(&content, byte, "<s>𝄞</s>", node));
    assert_eq!(from_byte_offset(&content, byte, OffsetEncoding::Char), Some(11));
}

#[test]
fn deeply_nested_document() {
    init();
    let depth = 20_000;
    let mut b = TreeBuilder::new();
    for _ in 0..depth {
        b.start_element("a");
    }
    b.text("x");
    for _ in 0..depth {
        b.end_element();
    }
    let tree = b.finish().unwrap();
    let content = content_of(&tree);
    assert_eq!(content.len(), depth * 7 + 1);

    let text = (tree.node_count() - 1) as NodeId;
    let node = tree.node(text).unwrap();
    assert_eq!(node.outer_xml(), "x");
    assert!(is_matching_node_context(&content, depth * 3, "x", node));

    let root = tree.node(tree.root_element_id().unwrap()).unwrap();
    assert!(is_matching_node_context(&content, 0, &content, root));

    let session = MatchSession::new(&content, &tree);
    assert_eq!(session.locate(text), Some(depth * 3..depth * 3 + 1));

    // one shared buffer, not a copy per nesting level
    let order = xmlsync::DocumentOrder::build(&tree);
    assert_eq!(order.text().len(), content.len());
    assert_eq!(order.len(), depth + 1);
}
