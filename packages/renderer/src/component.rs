//! # Components
//!
//! A component is user behavior (the [`Component`] trait) wrapped in a shared
//! [`ComponentHandle`] that owns props, children, state and the host range the
//! component currently occupies.
//!
//! Lifecycle:
//!
//! ```text
//! Unmounted --render_to_host--> Mounted --set_state--> Rerendering --> Mounted
//! ```
//!
//! Event handlers built with [`ComponentHandle::handler`] own their component,
//! so a mounted component lives as long as a listener bound to it is attached
//! to a live host node. The component only refers to its container weakly.
//!
//! A rerender inserts the new output in front of the old one and only then
//! deletes the old content, so siblings outside the range never move
//! relative to each other.

use crate::attributes::{AttrValue, Attributes};
use crate::error::{ComponentStateError, RenderError, RenderResult};
use crate::node::{Node, Renderable};
use crate::reconcile;
use crate::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, error, instrument};
use twig_host::{Event, EventHandler, HostRange, HostTree};

/// User-defined component behavior.
pub trait Component<H: HostTree>: 'static {
    /// Produce this component's output. Called once per mount and once per
    /// state update; the returned node is materialized and then dropped.
    fn render(&self, component: &ComponentHandle<H>) -> RenderResult<Node<H>>;

    /// Whether props are reconciled onto the root element of the output.
    fn forward_props(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Mounted,
    Rerendering,
}

struct Instance<H: HostTree> {
    host: H,
    behavior: Box<dyn Component<H>>,
    inner: RefCell<Inner<H>>,
}

struct Inner<H: HostTree> {
    props: Attributes,
    children: Vec<Node<H>>,
    state: Option<Value>,
    placement: Option<Placement<H>>,
    /// Props forwarded by enclosing components, nearest first.
    inherited: Vec<Attributes>,
    phase: Phase,
    rendering: bool,
}

/// Where a mounted component sits, without owning its container.
struct Placement<H: HostTree> {
    container: H::WeakNode,
    start: usize,
    end: usize,
}

/// Shared handle to one component instance.
///
/// Cloning the handle does not clone the component. Borrows of the inner
/// state are never held while user code runs.
pub struct ComponentHandle<H: HostTree>(Rc<Instance<H>>);

impl<H: HostTree> ComponentHandle<H> {
    pub fn new(host: &H, component: impl Component<H>) -> Self {
        Self::from_boxed(host, Box::new(component))
    }

    pub fn from_boxed(host: &H, behavior: Box<dyn Component<H>>) -> Self {
        Self(Rc::new(Instance {
            host: host.clone(),
            behavior,
            inner: RefCell::new(Inner {
                props: Attributes::new(),
                children: Vec::new(),
                state: None,
                placement: None,
                inherited: Vec::new(),
                phase: Phase::Unmounted,
                rendering: false,
            }),
        }))
    }

    pub fn host(&self) -> &H {
        &self.0.host
    }

    pub fn name(&self) -> &'static str {
        self.0.behavior.name()
    }

    pub fn phase(&self) -> Phase {
        self.0.inner.borrow().phase
    }

    pub fn props(&self) -> Attributes {
        self.0.inner.borrow().props.clone()
    }

    pub fn prop(&self, name: &str) -> Option<AttrValue> {
        self.0.inner.borrow().props.get(name).cloned()
    }

    /// Data value of a prop, if it is set and not a handler.
    pub fn prop_value(&self, name: &str) -> Option<Value> {
        self.prop(name).and_then(|value| value.as_data().cloned())
    }

    pub fn children(&self) -> Vec<Node<H>> {
        self.0.inner.borrow().children.clone()
    }

    pub fn state(&self) -> Option<Value> {
        self.0.inner.borrow().state.clone()
    }

    /// The host range the component occupies, once mounted and while its
    /// container is alive.
    pub fn range(&self) -> Option<HostRange<H::Node>> {
        let inner = self.0.inner.borrow();
        let placement = inner.placement.as_ref()?;
        let container = self.0.host.upgrade_node(&placement.container)?;
        HostRange::new(container, placement.start, placement.end).ok()
    }

    fn place(&self, range: &HostRange<H::Node>) {
        self.0.inner.borrow_mut().placement = Some(Placement {
            container: self.0.host.downgrade_node(range.container()),
            start: range.start(),
            end: range.end(),
        });
    }

    pub fn downgrade(&self) -> WeakComponentHandle<H> {
        WeakComponentHandle(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &ComponentHandle<H>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Set a prop. Props are write-once and frozen at mount.
    pub fn set_prop(&self, name: impl Into<String>, value: impl Into<AttrValue>) -> RenderResult<()> {
        let name = name.into();
        let mut inner = self.0.inner.borrow_mut();
        if inner.phase != Phase::Unmounted {
            return Err(ComponentStateError::PropsFrozen { name }.into());
        }
        if inner.props.contains(&name) {
            return Err(ComponentStateError::DuplicateProp { name }.into());
        }
        inner.props.insert(name, value);
        Ok(())
    }

    pub fn append_child(&self, child: Node<H>) {
        self.0.inner.borrow_mut().children.push(child);
    }

    /// Merge `patch` into the state and rerender in place.
    ///
    /// The first call adopts `patch` as the state. Every call rerenders, even
    /// when the merge changed nothing. If the rerender fails the previous
    /// state is restored.
    #[instrument(skip_all, fields(component = self.name()))]
    pub fn set_state(&self, patch: impl Into<Value>) -> RenderResult<()> {
        let patch = patch.into();
        let previous = {
            let mut inner = self.0.inner.borrow_mut();
            if inner.rendering || inner.phase == Phase::Rerendering {
                return Err(self.state_error(ComponentStateError::Reentrant {
                    component: self.name().to_string(),
                }));
            }
            if inner.phase == Phase::Unmounted || inner.placement.is_none() {
                return Err(self.state_error(ComponentStateError::NotMounted {
                    component: self.name().to_string(),
                }));
            }
            let previous = inner.state.clone();
            match inner.state.as_mut() {
                Some(state) => state.merge(patch),
                None => inner.state = Some(patch),
            }
            inner.phase = Phase::Rerendering;
            previous
        };

        let result = self.rerender();
        let mut inner = self.0.inner.borrow_mut();
        inner.phase = Phase::Mounted;
        if result.is_err() {
            inner.state = previous;
        }
        result
    }

    /// Wrap `f` as an event handler bound to this component.
    ///
    /// The handler owns the component: attaching it to a host node keeps the
    /// component alive until that node is dropped. Errors are logged.
    pub fn handler<F>(&self, f: F) -> EventHandler
    where
        F: Fn(&ComponentHandle<H>, &Event) -> RenderResult<()> + 'static,
    {
        let component = self.clone();
        EventHandler::new(move |event| {
            if let Err(err) = f(&component, event) {
                error!(component = component.name(), event = %event.name, error = %err, "Event handler failed");
            }
        })
    }

    /// Props this component pushes onto its root element, lowest priority
    /// first.
    fn forwarded(&self) -> Vec<Attributes> {
        let inner = self.0.inner.borrow();
        let own = self.0.behavior.forward_props().then(|| inner.props.clone());
        own.into_iter().chain(inner.inherited.iter().cloned()).collect()
    }

    fn inherit(&self, forwarded: Vec<Attributes>) {
        self.0.inner.borrow_mut().inherited = forwarded;
    }

    fn state_error(&self, err: ComponentStateError) -> RenderError {
        debug!(component = self.name(), error = %err, "Rejected state update");
        err.into()
    }

    fn rerender(&self) -> RenderResult<()> {
        let mut old = self.range().ok_or_else(|| ComponentStateError::NotMounted {
            component: self.name().to_string(),
        })?;
        let host = &self.0.host;
        let mut fresh = old.collapsed_at_start();

        let before = host.child_count(old.container())?;
        self.materialize(&mut fresh)?;
        let after = host.child_count(old.container())?;

        // Reused nodes may have moved out of the old range, so grow it by the
        // container's net growth rather than by the fresh range's length.
        let grown = after.saturating_sub(before);
        old.set_end(old.end() + grown);
        old.set_start(fresh.end());
        let replaced = old.len();
        host.delete_contents(&mut old)?;

        debug!(
            component = self.name(),
            start = fresh.start(),
            end = fresh.end(),
            replaced,
            "Rerendered component"
        );
        self.place(&fresh);
        Ok(())
    }

    fn materialize(&self, range: &mut HostRange<H::Node>) -> RenderResult<()> {
        let output = self.render_output()?;
        let forwarded = self.forwarded();
        // A component output shares our root element; it applies our props
        // after its own, on every render of its own.
        if let Node::Component(child) = &output {
            child.inherit(forwarded);
            return output.render_to_host(range);
        }
        output.render_to_host(range)?;
        drop(output);
        self.forward_props(range, &forwarded)
    }

    fn render_output(&self) -> RenderResult<Node<H>> {
        self.0.inner.borrow_mut().rendering = true;
        let output = self.0.behavior.render(self);
        self.0.inner.borrow_mut().rendering = false;
        output
    }

    fn forward_props(&self, range: &HostRange<H::Node>, forwarded: &[Attributes]) -> RenderResult<()> {
        if forwarded.is_empty() || range.is_collapsed() {
            return Ok(());
        }
        let host = &self.0.host;
        let root = match host.child_at(range.container(), range.start())? {
            Some(node) if host.is_element(&node) => node,
            _ => return Ok(()),
        };
        let mut count = 0;
        for props in forwarded {
            for (name, value) in props.iter() {
                reconcile::apply_attribute(host, &root, name, value)?;
                count += 1;
            }
        }
        if count > 0 {
            debug!(component = self.name(), count, "Forwarded props");
        }
        Ok(())
    }
}

impl<H: HostTree> Renderable<H> for ComponentHandle<H> {
    fn render_to_host(&self, range: &mut HostRange<H::Node>) -> RenderResult<()> {
        let previous = {
            let mut inner = self.0.inner.borrow_mut();
            if inner.rendering || inner.phase == Phase::Rerendering {
                return Err(ComponentStateError::Reentrant {
                    component: self.name().to_string(),
                }
                .into());
            }
            let previous = inner.phase;
            if previous == Phase::Mounted {
                inner.phase = Phase::Rerendering;
            }
            previous
        };

        let result = self.materialize(range);

        let mut inner = self.0.inner.borrow_mut();
        match result {
            Ok(()) => {
                debug!(
                    component = self.name(),
                    start = range.start(),
                    end = range.end(),
                    "Mounted component"
                );
                inner.phase = Phase::Mounted;
                drop(inner);
                self.place(range);
                Ok(())
            }
            Err(err) => {
                inner.phase = previous;
                Err(err)
            }
        }
    }
}

impl<H: HostTree> Clone for ComponentHandle<H> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<H: HostTree> fmt::Debug for ComponentHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.inner.try_borrow();
        let mut debug = f.debug_struct("ComponentHandle");
        debug.field("name", &self.name());
        if let Ok(inner) = inner {
            debug
                .field("phase", &inner.phase)
                .field("props", &inner.props.len())
                .field("children", &inner.children.len())
                .field("state", &inner.state);
        }
        debug.finish()
    }
}

/// Non-owning component handle.
pub struct WeakComponentHandle<H: HostTree>(Weak<Instance<H>>);

impl<H: HostTree> WeakComponentHandle<H> {
    pub fn upgrade(&self) -> Option<ComponentHandle<H>> {
        self.0.upgrade().map(ComponentHandle)
    }
}

impl<H: HostTree> Clone for WeakComponentHandle<H> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<H: HostTree> fmt::Debug for WeakComponentHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakComponentHandle")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}
