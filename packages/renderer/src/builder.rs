use crate::attributes::Attributes;
use crate::component::{Component, ComponentHandle};
use crate::element::ElementWrapper;
use crate::error::RenderResult;
use crate::node::{flatten_children, Child, Node};
use std::fmt;
use std::rc::Rc;
use tracing::trace;
use twig_host::HostTree;

/// Builds a fresh component instance with no constructor arguments.
pub type ComponentFactory<H> = Rc<dyn Fn() -> Box<dyn Component<H>>>;

/// What [`create_element`] should build.
pub enum Descriptor<H: HostTree> {
    /// A host element with this tag name.
    Tag(String),
    Component(ComponentFactory<H>),
}

impl<H: HostTree> Descriptor<H> {
    pub fn tag(name: impl Into<String>) -> Self {
        Descriptor::Tag(name.into())
    }

    /// Descriptor for a component type built through `Default`.
    pub fn component<C: Component<H> + Default>() -> Self {
        Descriptor::Component(Rc::new(|| Box::new(C::default())))
    }

    pub fn factory(factory: impl Fn() -> Box<dyn Component<H>> + 'static) -> Self {
        Descriptor::Component(Rc::new(factory))
    }
}

impl<H: HostTree> From<&str> for Descriptor<H> {
    fn from(name: &str) -> Self {
        Descriptor::tag(name)
    }
}

impl<H: HostTree> From<String> for Descriptor<H> {
    fn from(name: String) -> Self {
        Descriptor::Tag(name)
    }
}

impl<H: HostTree> Clone for Descriptor<H> {
    fn clone(&self) -> Self {
        match self {
            Descriptor::Tag(name) => Descriptor::Tag(name.clone()),
            Descriptor::Component(factory) => Descriptor::Component(factory.clone()),
        }
    }
}

impl<H: HostTree> fmt::Debug for Descriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Tag(name) => f.debug_tuple("Tag").field(name).finish(),
            Descriptor::Component(_) => f.write_str("Component(..)"),
        }
    }
}

/// Build one node of the tree.
///
/// Elements reconcile their attributes immediately and insert each flattened
/// child into their host node in order. Components store attributes as props
/// and keep their children for their own `render`.
pub fn create_element<H: HostTree>(
    host: &H,
    descriptor: impl Into<Descriptor<H>>,
    attributes: Attributes,
    children: impl IntoIterator<Item = Child<H>>,
) -> RenderResult<Node<H>> {
    match descriptor.into() {
        Descriptor::Tag(tag) => {
            let element = ElementWrapper::new(host, &tag)?;
            for (name, value) in attributes {
                element.set_attribute(&name, &value)?;
            }
            let children = flatten_children(host, children);
            trace!(tag = %tag, children = children.len(), "Built element");
            for child in &children {
                element.append_child(child)?;
            }
            Ok(Node::from(element))
        }
        Descriptor::Component(factory) => {
            let component = ComponentHandle::from_boxed(host, factory());
            for (name, value) in attributes {
                component.set_prop(name, value)?;
            }
            let children = flatten_children(host, children);
            trace!(component = component.name(), children = children.len(), "Built component");
            for child in children {
                component.append_child(child);
            }
            Ok(Node::from(component))
        }
    }
}
