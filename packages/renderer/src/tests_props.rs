/// Tests for component props and their forwarding onto rendered output
use crate::attributes::Attributes;
use crate::builder::{create_element, Descriptor};
use crate::children;
use crate::component::{Component, ComponentHandle};
use crate::error::{ComponentStateError, RenderError, RenderResult};
use crate::node::Node;
use crate::render::render;
use crate::value::Value;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use twig_host::{Event, HostTree, MemoryDocument};

/// Renders a styled card around its children.
#[derive(Default)]
struct Card;

impl<H: HostTree> Component<H> for Card {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        create_element(
            component.host(),
            "div",
            Attributes::new()
                .with("id", "k")
                .with("class", json!(["h h1", "j"]))
                .with("style", json!({ "fontSize": "16px", "color": "black" })),
            children![component.children()],
        )
    }
}

/// Uses its `label` prop as data only.
#[derive(Default)]
struct Label;

impl<H: HostTree> Component<H> for Label {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        let label = component
            .prop_value("label")
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        create_element(component.host(), "span", Attributes::new(), children![label])
    }

    fn forward_props(&self) -> bool {
        false
    }
}

#[test]
fn test_props_forward_onto_root_element() {
    let doc = MemoryDocument::new();
    let card = create_element(
        &doc,
        Descriptor::component::<Card>(),
        Attributes::new()
            .with("id", "a")
            .with("class", json!(["b", ["c", { "c3": true, "off": false }]]))
            .with("style", json!(["border: 1px solid #fff", { "color": "red" }])),
        children!["body"],
    )
    .unwrap();

    render(&card, &doc.body()).unwrap();

    let root = &doc.body().children()[0];
    assert_eq!(root.attribute("id").as_deref(), Some("a"));
    assert_eq!(root.classes(), vec!["h", "h1", "j", "b", "c", "c3"]);
    assert_eq!(root.style("fontSize").as_deref(), Some("16px"));
    assert_eq!(root.style("border").as_deref(), Some("1px solid #fff"));
    assert_eq!(root.style("color").as_deref(), Some("red"));
}

#[test]
fn test_outer_component_props_win() {
    let doc = MemoryDocument::new();
    let inner = create_element(
        &doc,
        Descriptor::component::<Card>(),
        Attributes::new().with("id", "inner"),
        children![],
    )
    .unwrap();
    let outer = ComponentHandle::new(&doc, Wrap { inner });
    outer.set_prop("id", "outer").unwrap();

    render(&Node::from(outer), &doc.body()).unwrap();

    assert_eq!(doc.body().children()[0].attribute("id").as_deref(), Some("outer"));
}

/// Renders another component as its whole output.
struct Wrap {
    inner: Node<MemoryDocument>,
}

impl Component<MemoryDocument> for Wrap {
    fn render(&self, _: &ComponentHandle<MemoryDocument>) -> RenderResult<Node<MemoryDocument>> {
        Ok(self.inner.clone())
    }
}

#[test]
fn test_forwarding_can_be_disabled() {
    let doc = MemoryDocument::new();
    let label = create_element(
        &doc,
        Descriptor::component::<Label>(),
        Attributes::new().with("label", "hello").with("title", "t"),
        children![],
    )
    .unwrap();

    render(&label, &doc.body()).unwrap();

    let span = &doc.body().children()[0];
    assert_eq!(span.text_content(), "hello");
    assert!(span.attributes().is_empty());
}

#[test]
fn test_handler_prop_binds_on_root_element() {
    let doc = MemoryDocument::new();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let card = create_element(
        &doc,
        Descriptor::component::<Card>(),
        Attributes::new().on("onClick", move |_| counter.set(counter.get() + 1)),
        children![],
    )
    .unwrap();
    render(&card, &doc.body()).unwrap();

    let root = doc.body().children()[0].clone();
    doc.dispatch_event(&root, &Event::new("click"));

    assert_eq!(hits.get(), 1);
}

#[test]
fn test_props_are_frozen_after_mount() {
    let doc = MemoryDocument::new();
    let card = ComponentHandle::new(&doc, Card);
    card.set_prop("id", "a").unwrap();
    render(&Node::from(card.clone()), &doc.body()).unwrap();

    let err = card.set_prop("title", "late").unwrap_err();

    assert_eq!(
        err,
        RenderError::ComponentState(ComponentStateError::PropsFrozen {
            name: "title".to_string()
        })
    );
    assert!(card.prop("title").is_none());
}

#[test]
fn test_props_survive_rerender() {
    let doc = MemoryDocument::new();
    let card = ComponentHandle::new(&doc, Card);
    card.set_prop("id", "kept").unwrap();
    render(&Node::from(card.clone()), &doc.body()).unwrap();

    card.set_state(Value::map([("any", 1)])).unwrap();

    let root = &doc.body().children()[0];
    assert_eq!(root.attribute("id").as_deref(), Some("kept"));
    assert_eq!(doc.body().children().len(), 1);
}

#[test]
fn test_forwarded_props_survive_inner_rerender() {
    let doc = MemoryDocument::new();
    let inner = ComponentHandle::new(&doc, Card);
    inner.set_prop("id", "inner").unwrap();
    let outer = ComponentHandle::new(&doc, Wrap { inner: Node::from(inner.clone()) });
    outer.set_prop("id", "outer").unwrap();
    outer.set_prop("class", "from-outer").unwrap();
    render(&Node::from(outer.clone()), &doc.body()).unwrap();

    inner.set_state(Value::map([("tick", 1)])).unwrap();

    let root = doc.body().children()[0].clone();
    assert_eq!(doc.body().children().len(), 1);
    assert_eq!(root.attribute("id").as_deref(), Some("outer"));
    assert_eq!(root.classes(), vec!["h", "h1", "j", "from-outer"]);

    outer.set_state(Value::map([("tick", 2)])).unwrap();
    inner.set_state(Value::map([("tick", 3)])).unwrap();

    let root = doc.body().children()[0].clone();
    assert_eq!(doc.body().children().len(), 1);
    assert_eq!(root.attribute("id").as_deref(), Some("outer"));
    assert_eq!(root.classes(), vec!["h", "h1", "j", "from-outer"]);
}
