/// Tests for tree building and first mount
use crate::attributes::Attributes;
use crate::builder::{create_element, Descriptor};
use crate::children;
use crate::component::{Component, ComponentHandle, Phase};
use crate::error::RenderResult;
use crate::node::{flatten_children, Child, Node};
use crate::render::render;
use twig_host::{HostTree, MemoryDocument, NodeSnapshot};

fn el(doc: &MemoryDocument, tag: &str, children: Vec<Child<MemoryDocument>>) -> Node<MemoryDocument> {
    create_element(doc, tag, Attributes::new(), children).unwrap()
}

#[derive(Default)]
struct Frame;

impl<H: HostTree> Component<H> for Frame {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        create_element(
            component.host(),
            "div",
            Attributes::new().with("class", "frame"),
            children![component.children()],
        )
    }
}

#[test]
fn test_flatten_nested_lists_and_nulls() {
    let doc = MemoryDocument::new();
    let a = el(&doc, "a", children![]);
    let b = el(&doc, "b", children![]);

    let flat = flatten_children(
        &doc,
        children![
            vec![a.clone()],
            None::<Node<MemoryDocument>>,
            Child::list([Child::list([b.clone()])])
        ],
    );

    assert_eq!(flat.len(), 2);
    assert!(flat[0].ptr_eq(&a));
    assert!(flat[1].ptr_eq(&b));
}

#[test]
fn test_flatten_strings_become_text() {
    let doc = MemoryDocument::new();
    let flat = flatten_children(&doc, children!["one", vec!["two", "three"]]);

    let texts: Vec<&str> = flat
        .iter()
        .filter_map(|node| node.as_text().map(|text| text.content()))
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn test_round_trip_mount_ignores_nesting() {
    let nested = MemoryDocument::new();
    let tree = el(
        &nested,
        "ul",
        children![vec![
            Child::from(el(&nested, "li", children!["1"])),
            Child::list([el(&nested, "li", children!["2"]), el(&nested, "li", children!["3"])]),
        ]],
    );
    render(&tree, &nested.body()).unwrap();

    let flat = MemoryDocument::new();
    let tree = el(
        &flat,
        "ul",
        children![
            el(&flat, "li", children!["1"]),
            el(&flat, "li", children!["2"]),
            el(&flat, "li", children!["3"])
        ],
    );
    render(&tree, &flat.body()).unwrap();

    assert_eq!(
        NodeSnapshot::capture(&nested.body()),
        NodeSnapshot::capture(&flat.body())
    );
    assert_eq!(
        NodeSnapshot::capture(&flat.body()).outline(),
        r#"body(ul(li("1"),li("2"),li("3")))"#
    );
}

#[test]
fn test_render_clears_existing_content() {
    let doc = MemoryDocument::new();
    let body = doc.body();
    for tag in ["old", "stale"] {
        let mut end = doc.range(&body, body.children().len(), body.children().len()).unwrap();
        doc.insert_node(&mut end, &doc.create_element(tag)).unwrap();
    }

    let range = render(&el(&doc, "main", children![]), &body).unwrap();

    assert_eq!((range.start(), range.end()), (0, 1));
    let tags: Vec<_> = body.children().iter().filter_map(|c| c.tag()).collect();
    assert_eq!(tags, vec!["main"]);
}

#[test]
fn test_component_mounts_inside_element() {
    let doc = MemoryDocument::new();
    let frame = create_element(
        &doc,
        Descriptor::component::<Frame>(),
        Attributes::new(),
        children![el(&doc, "span", children!["inner"])],
    )
    .unwrap();
    let page = el(&doc, "main", children!["before", frame.clone(), "after"]);

    // Children of an element mount while the tree is built.
    let component = frame.as_component().unwrap();
    assert_eq!(component.phase(), Phase::Mounted);
    let range = component.range().unwrap();
    assert_eq!((range.start(), range.end()), (1, 2));

    render(&page, &doc.body()).unwrap();
    assert_eq!(
        NodeSnapshot::capture(&doc.body()).outline(),
        r#"body(main("before",div(span("inner")),"after"))"#
    );
}

#[test]
fn test_component_root_mount() {
    let doc = MemoryDocument::new();
    let frame = create_element(&doc, Descriptor::component::<Frame>(), Attributes::new(), children!["x"])
        .unwrap();

    let range = render(&frame, &doc.body()).unwrap();

    assert_eq!((range.start(), range.end()), (0, 1));
    assert_eq!(frame.as_component().unwrap().range(), Some(range));
    assert!(doc.body().children()[0].has_class("frame"));
}

#[test]
fn test_nested_components() {
    let doc = MemoryDocument::new();
    let inner = create_element(&doc, Descriptor::component::<Frame>(), Attributes::new(), children!["deep"])
        .unwrap();
    let outer = create_element(&doc, Descriptor::component::<Frame>(), Attributes::new(), children![inner])
        .unwrap();

    render(&outer, &doc.body()).unwrap();

    assert_eq!(
        NodeSnapshot::capture(&doc.body()).outline(),
        r#"body(div(div("deep")))"#
    );
}
