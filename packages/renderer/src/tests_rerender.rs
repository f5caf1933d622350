/// Tests for state updates and in-place rerendering
use crate::attributes::Attributes;
use crate::builder::create_element;
use crate::children;
use crate::component::{Component, ComponentHandle, Phase};
use crate::error::{ComponentStateError, RenderError, RenderResult};
use crate::node::Node;
use crate::render::render;
use crate::value::Value;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use twig_host::{Event, HostTree, MemoryDocument, MemoryNode, NodeSnapshot};

fn count_of<H: HostTree>(component: &ComponentHandle<H>) -> f64 {
    component
        .state()
        .and_then(|state| state.get("count").and_then(Value::as_f64))
        .unwrap_or(0.0)
}

/// A button showing a click count.
#[derive(Default)]
struct Counter;

impl<H: HostTree> Component<H> for Counter {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        let count = count_of(component);
        let on_click = component.handler(|component, _| {
            let next = count_of(component) + 1.0;
            component.set_state(Value::map([("count", next)]))
        });
        create_element(
            component.host(),
            "button",
            Attributes::new().with("id", "inc").with("onClick", on_click),
            children![format!("count {}", count)],
        )
    }
}

fn mount_between_siblings(doc: &MemoryDocument) -> (ComponentHandle<MemoryDocument>, MemoryNode) {
    let counter = ComponentHandle::new(doc, Counter);
    let page = create_element(
        doc,
        "main",
        Attributes::new(),
        children![
            create_element(doc, "header", Attributes::new(), children!["top"]).unwrap(),
            Node::from(counter.clone()),
            create_element(doc, "footer", Attributes::new(), children!["bottom"]).unwrap()
        ],
    )
    .unwrap();
    render(&page, &doc.body()).unwrap();
    let main = doc.body().children()[0].clone();
    (counter, main)
}

fn click(doc: &MemoryDocument, id: &str) -> usize {
    let target = doc.body().find_by_id(id).unwrap();
    doc.dispatch_event(&target, &Event::new("click"))
}

#[test]
fn test_rerender_isolation() {
    let doc = MemoryDocument::new();
    let (counter, main) = mount_between_siblings(&doc);
    let header = main.children()[0].clone();
    let footer = main.children()[2].clone();

    counter.set_state(Value::map([("count", 5)])).unwrap();

    let children = main.children();
    assert_eq!(children.len(), 3);
    assert!(children[0].ptr_eq(&header));
    assert!(children[2].ptr_eq(&footer));
    assert_eq!(children[1].text_content(), "count 5");
    let range = counter.range().unwrap();
    assert_eq!((range.start(), range.end()), (1, 2));
}

#[test]
fn test_click_rerenders_through_handler() {
    let doc = MemoryDocument::new();
    let (counter, main) = mount_between_siblings(&doc);

    for _ in 0..3 {
        assert_eq!(click(&doc, "inc"), 1);
    }

    assert_eq!(count_of(&counter), 3.0);
    assert_eq!(
        NodeSnapshot::capture(&main).outline(),
        r#"main(header("top"),button("count 3"),footer("bottom"))"#
    );
}

#[test]
fn test_state_merge_is_recursive() {
    let doc = MemoryDocument::new();
    let (counter, _) = mount_between_siblings(&doc);

    counter.set_state(json!({ "a": { "b": 1, "c": 2 } })).unwrap();
    counter.set_state(json!({ "a": { "b": 9 } })).unwrap();

    assert_eq!(counter.state(), Some(Value::from(json!({ "a": { "b": 9, "c": 2 } }))));
}

#[test]
fn test_set_state_before_mount() {
    let doc = MemoryDocument::new();
    let counter = ComponentHandle::new(&doc, Counter);

    let err = counter.set_state(Value::map([("count", 1)])).unwrap_err();

    assert!(matches!(
        err,
        RenderError::ComponentState(ComponentStateError::NotMounted { .. })
    ));
    assert_eq!(counter.state(), None);
    assert_eq!(counter.phase(), Phase::Unmounted);
}

/// Tries to update its own state from inside `render`.
struct SelfUpdating {
    errors: Rc<RefCell<Vec<RenderError>>>,
}

impl<H: HostTree> Component<H> for SelfUpdating {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        if let Err(err) = component.set_state(Value::map([("loop", true)])) {
            self.errors.borrow_mut().push(err);
        }
        Ok(Node::text(component.host(), "stable"))
    }
}

#[test]
fn test_self_update_during_render_is_rejected() {
    let doc = MemoryDocument::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let component = ComponentHandle::new(&doc, SelfUpdating { errors: errors.clone() });

    render(&Node::from(component.clone()), &doc.body()).unwrap();
    component.set_state(Value::map([("outer", 1)])).unwrap();

    let errors = errors.borrow();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|err| matches!(
        err,
        RenderError::ComponentState(ComponentStateError::Reentrant { .. })
    )));
    assert_eq!(component.phase(), Phase::Mounted);
    assert_eq!(doc.body().text_content(), "stable");
}

/// Pushes its own render count into a sibling counter while rendering.
struct Announcer {
    target: ComponentHandle<MemoryDocument>,
}

impl Component<MemoryDocument> for Announcer {
    fn render(&self, component: &ComponentHandle<MemoryDocument>) -> RenderResult<Node<MemoryDocument>> {
        if self.target.phase() == Phase::Mounted {
            let renders = component.state().and_then(|s| s.get("renders").and_then(Value::as_f64));
            self.target
                .set_state(Value::map([("count", renders.unwrap_or(0.0))]))?;
        }
        Ok(Node::text(component.host(), "announcer"))
    }
}

#[test]
fn test_update_of_other_component_during_render_runs_immediately() {
    let doc = MemoryDocument::new();
    let counter = ComponentHandle::new(&doc, Counter);
    let announcer = ComponentHandle::new(&doc, Announcer { target: counter.clone() });
    let page = create_element(
        &doc,
        "div",
        Attributes::new(),
        children![Node::from(counter.clone()), Node::from(announcer.clone())],
    )
    .unwrap();
    render(&page, &doc.body()).unwrap();

    announcer.set_state(Value::map([("renders", 7)])).unwrap();

    assert_eq!(
        NodeSnapshot::capture(&doc.body()).outline(),
        r#"body(div(button("count 7"),"announcer"))"#
    );
}

/// Renders its first child as-is, so every rerender reuses the same host node.
struct Reuse;

impl<H: HostTree> Component<H> for Reuse {
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>> {
        match component.children().into_iter().next() {
            Some(child) => Ok(child),
            None => Ok(Node::text(component.host(), "")),
        }
    }

    fn forward_props(&self) -> bool {
        false
    }
}

#[test]
fn test_rerender_with_reused_node_keeps_siblings() {
    let doc = MemoryDocument::new();
    let reuse = ComponentHandle::new(&doc, Reuse);
    let kept = create_element(&doc, "em", Attributes::new(), children!["kept"]).unwrap();
    reuse.append_child(kept);
    let page = create_element(
        &doc,
        "p",
        Attributes::new(),
        children!["a", Node::from(reuse.clone()), "b"],
    )
    .unwrap();
    render(&page, &doc.body()).unwrap();

    reuse.set_state(Value::map([("tick", 1)])).unwrap();
    reuse.set_state(Value::map([("tick", 2)])).unwrap();

    assert_eq!(
        NodeSnapshot::capture(&doc.body()).outline(),
        r#"body(p("a",em("kept"),"b"))"#
    );
    let range = reuse.range().unwrap();
    assert_eq!((range.start(), range.end()), (1, 2));
}

/// Counts how many of its click handlers are still alive.
struct Tracked {
    token: Rc<()>,
}

impl Component<MemoryDocument> for Tracked {
    fn render(&self, component: &ComponentHandle<MemoryDocument>) -> RenderResult<Node<MemoryDocument>> {
        let token = self.token.clone();
        let on_click = component.handler(move |component, _| {
            let _alive = &token;
            component.set_state(Value::map([("clicked", true)]))
        });
        create_element(
            component.host(),
            "button",
            Attributes::new().with("id", "tracked").with("onClick", on_click),
            children![],
        )
    }
}

#[test]
fn test_replaced_listeners_are_released() {
    let doc = MemoryDocument::new();
    let token = Rc::new(());
    let tracked = ComponentHandle::new(&doc, Tracked { token: token.clone() });
    render(&Node::from(tracked.clone()), &doc.body()).unwrap();
    assert_eq!(Rc::strong_count(&token), 3);

    let old = doc.body().find_by_id("tracked").unwrap();
    assert_eq!(doc.dispatch_event(&old, &Event::new("click")), 1);
    assert!(old.parent().is_none());
    drop(old);

    // Only the new button's handler is left.
    assert_eq!(Rc::strong_count(&token), 3);
    let new = doc.body().find_by_id("tracked").unwrap();
    assert_eq!(new.listener_count("click"), 1);
    assert_eq!(doc.dispatch_event(&new, &Event::new("click")), 1);
}

#[test]
fn test_handler_keeps_dropped_root_alive() {
    let doc = MemoryDocument::new();
    render(&Node::from(ComponentHandle::new(&doc, Counter)), &doc.body()).unwrap();

    assert_eq!(click(&doc, "inc"), 1);
    assert_eq!(click(&doc, "inc"), 1);

    assert_eq!(
        NodeSnapshot::capture(&doc.body()).outline(),
        r#"body(button("count 2"))"#
    );
}

#[test]
fn test_deleting_region_frees_component() {
    let doc = MemoryDocument::new();
    let counter = ComponentHandle::new(&doc, Counter);
    render(&Node::from(counter.clone()), &doc.body()).unwrap();
    let weak = counter.downgrade();
    drop(counter);
    assert!(weak.upgrade().is_some());

    let mut all = doc.range(&doc.body(), 0, 1).unwrap();
    doc.delete_contents(&mut all).unwrap();

    assert!(weak.upgrade().is_none());
}

/// Creates its counter inside `render` and keeps no handle to it.
struct Panel;

impl Component<MemoryDocument> for Panel {
    fn render(&self, component: &ComponentHandle<MemoryDocument>) -> RenderResult<Node<MemoryDocument>> {
        let host = component.host();
        create_element(
            host,
            "section",
            Attributes::new(),
            children!["panel", Node::from(ComponentHandle::new(host, Counter))],
        )
    }
}

#[test]
fn test_component_created_during_render_handles_clicks() {
    let doc = MemoryDocument::new();
    let panel = ComponentHandle::new(&doc, Panel);
    render(&Node::from(panel.clone()), &doc.body()).unwrap();

    for _ in 0..3 {
        assert_eq!(click(&doc, "inc"), 1);
    }

    assert_eq!(
        NodeSnapshot::capture(&doc.body()).outline(),
        r#"body(section("panel",button("count 3")))"#
    );

    // A parent rerender replaces the child with a fresh one.
    panel.set_state(Value::map([("tick", 1)])).unwrap();
    assert_eq!(doc.body().text_content(), "panelcount 0");
    assert_eq!(click(&doc, "inc"), 1);
    assert_eq!(doc.body().text_content(), "panelcount 1");
}

/// Renders an invalid tag while `fail` is set.
struct Fragile;

impl Component<MemoryDocument> for Fragile {
    fn render(&self, component: &ComponentHandle<MemoryDocument>) -> RenderResult<Node<MemoryDocument>> {
        let fail = component
            .state()
            .and_then(|state| state.get("fail").map(Value::is_truthy))
            .unwrap_or(false);
        let label = component
            .state()
            .and_then(|state| state.get("label").and_then(|l| l.as_str().map(str::to_string)))
            .unwrap_or_default();
        let tag = if fail { "not valid" } else { "p" };
        create_element(component.host(), tag, Attributes::new(), children![label])
    }
}

#[test]
fn test_failed_rerender_restores_state() {
    let doc = MemoryDocument::new();
    let fragile = ComponentHandle::new(&doc, Fragile);
    render(&Node::from(fragile.clone()), &doc.body()).unwrap();
    fragile.set_state(Value::map([("label", "one")])).unwrap();

    let err = fragile
        .set_state(Value::map([("fail", Value::from(true)), ("label", Value::from("two"))]))
        .unwrap_err();

    assert!(matches!(err, RenderError::InvalidDescriptor { .. }));
    assert_eq!(fragile.state(), Some(Value::from(json!({ "label": "one" }))));
    assert_eq!(fragile.phase(), Phase::Mounted);
    assert_eq!(NodeSnapshot::capture(&doc.body()).outline(), r#"body(p("one"))"#);

    fragile.set_state(Value::map([("label", "three")])).unwrap();
    assert_eq!(NodeSnapshot::capture(&doc.body()).outline(), r#"body(p("three"))"#);
}
