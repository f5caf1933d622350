//! # In-memory host tree
//!
//! `MemoryDocument` is a small document model that implements [`HostTree`]
//! without a browser. Nodes are reference counted with weak parent links, so a
//! subtree removed by a range deletion is freed (listeners included) as soon
//! as the last handle to it is dropped.

use crate::error::{HostError, HostResult};
use crate::event::{Event, EventHandler, ListenerId};
use crate::range::HostRange;
use crate::tree::HostTree;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Handle to a node of a [`MemoryDocument`]. Equality is identity.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

struct NodeData {
    kind: NodeKind,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<MemoryNode>,
}

enum NodeKind {
    Element(ElementData),
    Text(String),
}

struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    listeners: Vec<Listener>,
}

struct Listener {
    id: ListenerId,
    event: String,
    handler: EventHandler,
}

impl MemoryNode {
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    fn element(tag: &str) -> Self {
        Self::new(NodeKind::Element(ElementData {
            tag: tag.to_string(),
            attributes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            listeners: Vec::new(),
        }))
    }

    fn text(content: &str) -> Self {
        Self::new(NodeKind::Text(content.to_string()))
    }

    pub fn downgrade(&self) -> WeakMemoryNode {
        WeakMemoryNode(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &MemoryNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Element(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self.0.borrow().kind {
            NodeKind::Element(_) => "element",
            NodeKind::Text(_) => "text",
        }
    }

    /// Tag name, `None` for text nodes.
    pub fn tag(&self) -> Option<String> {
        self.read_element(|el| el.tag.clone())
    }

    /// Content of a text node, `None` for elements.
    pub fn text_value(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Text(content) => Some(content.clone()),
            NodeKind::Element(_) => None,
        }
    }

    /// Concatenated text of this node and all its descendants, in tree order.
    pub fn text_content(&self) -> String {
        if let Some(content) = self.text_value() {
            return content;
        }
        self.children().iter().map(MemoryNode::text_content).collect()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.read_element(|el| {
            el.attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
        .flatten()
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        self.read_element(|el| el.attributes.clone())
            .unwrap_or_default()
    }

    pub fn classes(&self) -> Vec<String> {
        self.read_element(|el| el.classes.clone()).unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.read_element(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn style(&self, key: &str) -> Option<String> {
        self.read_element(|el| {
            el.styles
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.clone())
        })
        .flatten()
    }

    pub fn styles(&self) -> Vec<(String, String)> {
        self.read_element(|el| el.styles.clone()).unwrap_or_default()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.read_element(|el| el.listeners.iter().filter(|l| l.event == event).count())
            .unwrap_or(0)
    }

    pub fn children(&self) -> Vec<MemoryNode> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<MemoryNode> {
        self.0.borrow().parent.upgrade().map(MemoryNode)
    }

    /// True if `other` is this node or one of its descendants.
    pub fn contains(&self, other: &MemoryNode) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Depth-first search (self included) for the element whose `id` attribute matches.
    pub fn find_by_id(&self, id: &str) -> Option<MemoryNode> {
        if self.attribute("id").as_deref() == Some(id) {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_id(id))
    }

    fn read_element<R>(&self, f: impl FnOnce(&ElementData) -> R) -> Option<R> {
        match &self.0.borrow().kind {
            NodeKind::Element(el) => Some(f(el)),
            NodeKind::Text(_) => None,
        }
    }

    fn write_element<R>(&self, f: impl FnOnce(&mut ElementData) -> R) -> HostResult<R> {
        match &mut self.0.borrow_mut().kind {
            NodeKind::Element(el) => Ok(f(el)),
            NodeKind::Text(_) => Err(HostError::not_an_element("text")),
        }
    }

    fn children_len(&self) -> HostResult<usize> {
        let data = self.0.borrow();
        match data.kind {
            NodeKind::Element(_) => Ok(data.children.len()),
            NodeKind::Text(_) => Err(HostError::not_a_container("text")),
        }
    }

    /// Unlink from the current parent, returning it and the former index.
    fn detach(&self) -> Option<(MemoryNode, usize)> {
        let parent = self.parent()?;
        let index = parent
            .0
            .borrow()
            .children
            .iter()
            .position(|child| child.ptr_eq(self))?;
        parent.0.borrow_mut().children.remove(index);
        self.0.borrow_mut().parent = Weak::new();
        Some((parent, index))
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MemoryNode {}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Element(el) => write!(f, "<{}> ({} children)", el.tag, data.children.len()),
            NodeKind::Text(content) => write!(f, "#text {:?}", content),
        }
    }
}

/// Non-owning [`MemoryNode`] handle.
#[derive(Clone)]
pub struct WeakMemoryNode(Weak<RefCell<NodeData>>);

impl WeakMemoryNode {
    pub fn upgrade(&self) -> Option<MemoryNode> {
        self.0.upgrade().map(MemoryNode)
    }
}

impl fmt::Debug for WeakMemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(node) => f.debug_tuple("WeakMemoryNode").field(&node).finish(),
            None => f.write_str("WeakMemoryNode(<dropped>)"),
        }
    }
}

/// A document with a `<body>` container, implementing [`HostTree`].
#[derive(Clone)]
pub struct MemoryDocument {
    body: MemoryNode,
    next_listener_id: Rc<Cell<u64>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            body: MemoryNode::element("body"),
            next_listener_id: Rc::new(Cell::new(1)),
        }
    }

    pub fn body(&self) -> MemoryNode {
        self.body.clone()
    }

    /// Invoke `target`'s listeners for `event.name` in registration order.
    ///
    /// The listener list is copied before the first call, so handlers are free
    /// to mutate the document, including replacing `target` itself. Events do
    /// not bubble. Returns the number of listeners invoked.
    pub fn dispatch_event(&self, target: &MemoryNode, event: &Event) -> usize {
        let handlers: Vec<EventHandler> = target
            .read_element(|el| {
                el.listeners
                    .iter()
                    .filter(|listener| listener.event == event.name)
                    .map(|listener| listener.handler.clone())
                    .collect()
            })
            .unwrap_or_default();

        debug!(event = %event.name, listeners = handlers.len(), "Dispatching event");
        for handler in &handlers {
            handler.call(event);
        }
        handlers.len()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("body", &self.body)
            .finish()
    }
}

impl HostTree for MemoryDocument {
    type Node = MemoryNode;
    type WeakNode = WeakMemoryNode;

    fn downgrade_node(&self, node: &MemoryNode) -> WeakMemoryNode {
        node.downgrade()
    }

    fn upgrade_node(&self, node: &WeakMemoryNode) -> Option<MemoryNode> {
        node.upgrade()
    }

    fn create_element(&self, tag: &str) -> MemoryNode {
        MemoryNode::element(tag)
    }

    fn create_text(&self, content: &str) -> MemoryNode {
        MemoryNode::text(content)
    }

    fn is_element(&self, node: &MemoryNode) -> bool {
        node.is_element()
    }

    fn add_class(&self, node: &MemoryNode, class: &str) -> HostResult<()> {
        node.write_element(|el| {
            if !class.is_empty() && !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        })
    }

    fn remove_class(&self, node: &MemoryNode, class: &str) -> HostResult<()> {
        node.write_element(|el| el.classes.retain(|c| c != class))
    }

    fn set_style(&self, node: &MemoryNode, key: &str, value: &str) -> HostResult<()> {
        node.write_element(|el| {
            match el.styles.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => el.styles.push((key.to_string(), value.to_string())),
            }
        })
    }

    fn set_attribute(&self, node: &MemoryNode, name: &str, value: &str) -> HostResult<()> {
        node.write_element(|el| {
            // `class` is reflected by the class list, as in a browser.
            if name == "class" {
                el.classes = value.split_whitespace().map(str::to_string).collect();
                return;
            }
            match el.attributes.iter_mut().find(|(key, _)| key == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => el.attributes.push((name.to_string(), value.to_string())),
            }
        })
    }

    fn add_event_listener(
        &self,
        node: &MemoryNode,
        event: &str,
        handler: EventHandler,
    ) -> HostResult<ListenerId> {
        let id = ListenerId(self.next_listener_id.get());
        node.write_element(|el| {
            el.listeners.push(Listener {
                id,
                event: event.to_string(),
                handler,
            })
        })?;
        self.next_listener_id.set(id.0 + 1);
        trace!(event, id = id.0, "Registered listener");
        Ok(id)
    }

    fn remove_event_listener(&self, node: &MemoryNode, id: ListenerId) -> HostResult<bool> {
        node.write_element(|el| {
            let before = el.listeners.len();
            el.listeners.retain(|listener| listener.id != id);
            el.listeners.len() != before
        })
    }

    fn child_count(&self, container: &MemoryNode) -> HostResult<usize> {
        container.children_len()
    }

    fn child_at(&self, container: &MemoryNode, index: usize) -> HostResult<Option<MemoryNode>> {
        container.children_len()?;
        Ok(container.0.borrow().children.get(index).cloned())
    }

    fn delete_contents(&self, range: &mut HostRange<MemoryNode>) -> HostResult<()> {
        let container = range.container().clone();
        let len = container.children_len()?;
        if range.end() > len {
            return Err(HostError::out_of_bounds(range.end(), len));
        }

        let removed: Vec<MemoryNode> = container
            .0
            .borrow_mut()
            .children
            .drain(range.start()..range.end())
            .collect();
        for node in &removed {
            node.0.borrow_mut().parent = Weak::new();
        }

        trace!(
            start = range.start(),
            removed = removed.len(),
            "Deleted range contents"
        );
        range.collapse_to_start();
        Ok(())
    }

    fn insert_node(&self, range: &mut HostRange<MemoryNode>, node: &MemoryNode) -> HostResult<()> {
        let container = range.container().clone();
        let len = container.children_len()?;
        if range.end() > len {
            return Err(HostError::out_of_bounds(range.end(), len));
        }
        if node.contains(&container) {
            return Err(HostError::HierarchyRequest);
        }

        // Moving a node out of this container shifts the offsets after it.
        if let Some((parent, index)) = node.detach() {
            if parent.ptr_eq(&container) {
                if index < range.start() {
                    range.set_start(range.start() - 1);
                    range.set_end(range.end() - 1);
                } else if index < range.end() {
                    range.set_end(range.end() - 1);
                }
            }
        }

        container
            .0
            .borrow_mut()
            .children
            .insert(range.start(), node.clone());
        node.0.borrow_mut().parent = Rc::downgrade(&container.0);
        range.set_end(range.end() + 1);

        trace!(start = range.start(), end = range.end(), "Inserted node");
        Ok(())
    }
}
