use crate::error::{HostError, HostResult};
use crate::event::{EventHandler, ListenerId};
use crate::range::HostRange;
use std::fmt;

/// The visual tree a renderer materializes into.
///
/// Handles are cheap to clone and every operation takes `&self`: hosts use
/// interior mutability, so an event handler running inside a dispatch can
/// still mutate the tree.
pub trait HostTree: Clone + 'static {
    type Node: Clone + fmt::Debug + 'static;

    /// A handle that does not keep its node alive.
    type WeakNode: Clone + fmt::Debug + 'static;

    fn downgrade_node(&self, node: &Self::Node) -> Self::WeakNode;

    fn upgrade_node(&self, node: &Self::WeakNode) -> Option<Self::Node>;

    fn create_element(&self, tag: &str) -> Self::Node;

    fn create_text(&self, content: &str) -> Self::Node;

    fn is_element(&self, node: &Self::Node) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str) -> HostResult<()>;

    fn remove_class(&self, node: &Self::Node, class: &str) -> HostResult<()>;

    fn set_style(&self, node: &Self::Node, key: &str, value: &str) -> HostResult<()>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> HostResult<()>;

    fn add_event_listener(
        &self,
        node: &Self::Node,
        event: &str,
        handler: EventHandler,
    ) -> HostResult<ListenerId>;

    /// Returns `false` if no listener with this id was registered on the node.
    fn remove_event_listener(&self, node: &Self::Node, id: ListenerId) -> HostResult<bool>;

    fn child_count(&self, container: &Self::Node) -> HostResult<usize>;

    fn child_at(&self, container: &Self::Node, index: usize) -> HostResult<Option<Self::Node>>;

    /// Remove the delimited children. The range collapses to its start.
    fn delete_contents(&self, range: &mut HostRange<Self::Node>) -> HostResult<()>;

    /// Insert `node` at the range start. The range end grows by one.
    fn insert_node(&self, range: &mut HostRange<Self::Node>, node: &Self::Node) -> HostResult<()>;

    /// A range over `container`'s children `start..end`, checked against its child count.
    fn range(
        &self,
        container: &Self::Node,
        start: usize,
        end: usize,
    ) -> HostResult<HostRange<Self::Node>> {
        let len = self.child_count(container)?;
        if end > len {
            return Err(HostError::out_of_bounds(end, len));
        }
        HostRange::new(container.clone(), start, end)
    }
}
