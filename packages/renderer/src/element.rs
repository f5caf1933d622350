use crate::attributes::AttrValue;
use crate::error::{RenderError, RenderResult};
use crate::node::{Node, Renderable};
use crate::reconcile;
use std::cell::RefCell;
use std::fmt;
use tracing::trace;
use twig_host::{HostRange, HostTree, ListenerId};

/// True for names a host element can be created with.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '='))
}

/// Owns one host element. Children go straight into the host element.
pub struct ElementWrapper<H: HostTree> {
    host: H,
    tag: String,
    node: H::Node,
    listeners: RefCell<Vec<ListenerId>>,
}

impl<H: HostTree> ElementWrapper<H> {
    pub fn new(host: &H, tag: &str) -> RenderResult<Self> {
        if !is_valid_tag(tag) {
            return Err(RenderError::invalid_descriptor(tag));
        }
        Ok(Self {
            host: host.clone(),
            tag: tag.to_string(),
            node: host.create_element(tag),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn host_node(&self) -> &H::Node {
        &self.node
    }

    /// Reconcile one attribute onto the host element right away.
    pub fn set_attribute(&self, name: &str, value: &AttrValue) -> RenderResult<()> {
        if let Some(id) = reconcile::apply_attribute(&self.host, &self.node, name, value)? {
            self.listeners.borrow_mut().push(id);
        }
        Ok(())
    }

    /// Materialize `child` after the element's current last child.
    pub fn append_child(&self, child: &Node<H>) -> RenderResult<()> {
        let end = self.host.child_count(&self.node)?;
        let mut range = self.host.range(&self.node, end, end)?;
        child.render_to_host(&mut range)
    }

    /// Unregister every listener this wrapper bound. Returns how many were removed.
    pub fn remove_listeners(&self) -> RenderResult<usize> {
        let ids: Vec<ListenerId> = self.listeners.borrow_mut().drain(..).collect();
        let mut removed = 0;
        for id in ids {
            if self.host.remove_event_listener(&self.node, id)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl<H: HostTree> Renderable<H> for ElementWrapper<H> {
    fn render_to_host(&self, range: &mut HostRange<H::Node>) -> RenderResult<()> {
        self.host.delete_contents(range)?;
        self.host.insert_node(range, &self.node)?;
        trace!(tag = %self.tag, start = range.start(), "Mounted element");
        Ok(())
    }
}

impl<H: HostTree> fmt::Debug for ElementWrapper<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementWrapper")
            .field("tag", &self.tag)
            .field("node", &self.node)
            .finish()
    }
}

/// Owns one host text node.
pub struct TextWrapper<H: HostTree> {
    host: H,
    content: String,
    node: H::Node,
}

impl<H: HostTree> TextWrapper<H> {
    pub fn new(host: &H, content: &str) -> Self {
        Self {
            host: host.clone(),
            content: content.to_string(),
            node: host.create_text(content),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn host_node(&self) -> &H::Node {
        &self.node
    }
}

impl<H: HostTree> Renderable<H> for TextWrapper<H> {
    fn render_to_host(&self, range: &mut HostRange<H::Node>) -> RenderResult<()> {
        self.host.delete_contents(range)?;
        self.host.insert_node(range, &self.node)?;
        Ok(())
    }
}

impl<H: HostTree> fmt::Debug for TextWrapper<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextWrapper").field(&self.content).finish()
    }
}
