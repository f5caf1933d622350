use crate::component::ComponentHandle;
use crate::element::{ElementWrapper, TextWrapper};
use crate::error::RenderResult;
use std::fmt;
use std::rc::Rc;
use twig_host::{HostRange, HostTree};

/// Anything that can materialize itself into a host range.
pub trait Renderable<H: HostTree> {
    /// Make this node occupy exactly `range`, deleting whatever the range
    /// delimited before. On return `range` delimits the inserted content.
    fn render_to_host(&self, range: &mut HostRange<H::Node>) -> RenderResult<()>;
}

/// A renderable node: one of the two host leaf wrappers or a component.
pub enum Node<H: HostTree> {
    Element(Rc<ElementWrapper<H>>),
    Text(Rc<TextWrapper<H>>),
    Component(ComponentHandle<H>),
}

impl<H: HostTree> Node<H> {
    /// A text leaf backed by a fresh host text node.
    pub fn text(host: &H, content: &str) -> Self {
        Node::Text(Rc::new(TextWrapper::new(host, content)))
    }

    pub fn host(&self) -> &H {
        match self {
            Node::Element(element) => element.host(),
            Node::Text(text) => text.host(),
            Node::Component(component) => component.host(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
            Node::Component(_) => "component",
        }
    }

    pub fn as_element(&self) -> Option<&ElementWrapper<H>> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextWrapper<H>> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentHandle<H>> {
        match self {
            Node::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Node<H>) -> bool {
        match (self, other) {
            (Node::Element(a), Node::Element(b)) => Rc::ptr_eq(a, b),
            (Node::Text(a), Node::Text(b)) => Rc::ptr_eq(a, b),
            (Node::Component(a), Node::Component(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl<H: HostTree> Renderable<H> for Node<H> {
    fn render_to_host(&self, range: &mut HostRange<H::Node>) -> RenderResult<()> {
        match self {
            Node::Element(element) => element.render_to_host(range),
            Node::Text(text) => text.render_to_host(range),
            Node::Component(component) => component.render_to_host(range),
        }
    }
}

impl<H: HostTree> Clone for Node<H> {
    fn clone(&self) -> Self {
        match self {
            Node::Element(element) => Node::Element(element.clone()),
            Node::Text(text) => Node::Text(text.clone()),
            Node::Component(component) => Node::Component(component.clone()),
        }
    }
}

impl<H: HostTree> fmt::Debug for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => fmt::Debug::fmt(element, f),
            Node::Text(text) => fmt::Debug::fmt(text, f),
            Node::Component(component) => fmt::Debug::fmt(component, f),
        }
    }
}

impl<H: HostTree> From<ElementWrapper<H>> for Node<H> {
    fn from(element: ElementWrapper<H>) -> Self {
        Node::Element(Rc::new(element))
    }
}

impl<H: HostTree> From<ComponentHandle<H>> for Node<H> {
    fn from(component: ComponentHandle<H>) -> Self {
        Node::Component(component)
    }
}

/// One entry of a children argument before flattening.
pub enum Child<H: HostTree> {
    Node(Node<H>),
    Text(String),
    List(Vec<Child<H>>),
    Null,
}

impl<H: HostTree> Child<H> {
    pub fn list<T: Into<Child<H>>>(items: impl IntoIterator<Item = T>) -> Self {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

impl<H: HostTree> From<Node<H>> for Child<H> {
    fn from(node: Node<H>) -> Self {
        Child::Node(node)
    }
}

impl<H: HostTree> From<&str> for Child<H> {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl<H: HostTree> From<String> for Child<H> {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl<H: HostTree, T: Into<Child<H>>> From<Vec<T>> for Child<H> {
    fn from(items: Vec<T>) -> Self {
        Child::list(items)
    }
}

impl<H: HostTree, T: Into<Child<H>>> From<Option<T>> for Child<H> {
    fn from(item: Option<T>) -> Self {
        item.map(Into::into).unwrap_or(Child::Null)
    }
}

/// Build a `Vec<Child<_>>` from heterogeneous entries.
///
/// ```rust,ignore
/// children!["Title", node, vec![a, b], None::<Node<_>>]
/// ```
#[macro_export]
macro_rules! children {
    ($($child:expr),* $(,)?) => {
        vec![$($crate::Child::from($child)),*]
    };
}

/// Remove nesting and nulls, turning bare strings into text leaves.
///
/// Order is preserved: `[[a], null, [[b]]]` flattens to `[a, b]`.
pub fn flatten_children<H: HostTree>(
    host: &H,
    children: impl IntoIterator<Item = Child<H>>,
) -> Vec<Node<H>> {
    let mut flat = Vec::new();
    push_children(host, children, &mut flat);
    flat
}

fn push_children<H: HostTree>(
    host: &H,
    children: impl IntoIterator<Item = Child<H>>,
    out: &mut Vec<Node<H>>,
) {
    for child in children {
        match child {
            Child::Node(node) => out.push(node),
            Child::Text(content) => out.push(Node::text(host, &content)),
            Child::List(items) => push_children(host, items, out),
            Child::Null => {}
        }
    }
}
