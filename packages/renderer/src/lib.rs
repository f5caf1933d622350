//! # Twig renderer
//!
//! A small component-tree renderer over any [`twig_host::HostTree`].
//!
//! - [`create_element`] builds a node graph bottom-up. Elements reconcile
//!   attributes and insert their children into the host immediately.
//! - [`render`] mounts a root node into a container.
//! - [`Component`] implementations produce output from props, children and
//!   state; [`ComponentHandle::set_state`] replaces only the component's own
//!   host range.

pub mod attributes;
pub mod builder;
pub mod component;
pub mod element;
pub mod error;
pub mod node;
pub mod reconcile;
pub mod render;
pub mod value;

#[cfg(test)]
mod tests_mount;

#[cfg(test)]
mod tests_rerender;

#[cfg(test)]
mod tests_props;

pub use attributes::{AttrValue, Attributes};
pub use builder::{create_element, ComponentFactory, Descriptor};
pub use component::{Component, ComponentHandle, Phase, WeakComponentHandle};
pub use element::{ElementWrapper, TextWrapper};
pub use error::{ComponentStateError, RenderError, RenderResult};
pub use node::{flatten_children, Child, Node, Renderable};
pub use reconcile::{apply_attribute, AttributeKind};
pub use render::render;
pub use value::Value;
