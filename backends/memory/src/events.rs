use core::fmt;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use sprout_core::{AttrValue, BindError, Event, EventBinder, Handler};

use crate::node::{MemoryNode, NodeData};

struct Listener {
    node: Weak<RefCell<NodeData>>,
    event: String,
    handler: Handler,
}

impl Listener {
    fn targets(&self, node: &MemoryNode, event: &str) -> bool {
        self.event == event && core::ptr::eq(self.node.as_ptr(), Rc::as_ptr(&node.0))
    }
}

/// Event-binding collaborator for the in-memory backend.
///
/// Every [`bind`](EventBinder::bind) adds a listener; earlier listeners for the same node and
/// event stay registered. [`dispatch`](Self::dispatch) invokes them in registration order.
/// Listeners only hold their node weakly.
#[derive(Default)]
pub struct EventRegistry {
    listeners: Vec<Listener>,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Simulates `event` on `node`. The event carries the node's `value` property when it
    /// is a string. Returns how many handlers ran.
    pub fn dispatch(&self, node: &MemoryNode, event: &str) -> usize {
        let mut payload = Event::new(event);
        if let Some(AttrValue::Str(value)) = node.property("value") {
            payload = payload.with_value(value);
        }
        self.dispatch_event(node, &payload)
    }

    /// Invokes every handler bound to `node` for `event.name()`, in registration order.
    pub fn dispatch_event(&self, node: &MemoryNode, event: &Event) -> usize {
        let handlers: Vec<Handler> = self
            .listeners
            .iter()
            .filter(|listener| listener.targets(node, event.name()))
            .map(|listener| listener.handler.clone())
            .collect();
        tracing::trace!(event = event.name(), handlers = handlers.len(), "dispatching");
        for handler in &handlers {
            handler.call(event);
        }
        handlers.len()
    }

    /// Number of handlers bound to `node` for `event`.
    #[must_use]
    pub fn listener_count(&self, node: &MemoryNode, event: &str) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.targets(node, event))
            .count()
    }

    /// Drops listeners whose node is gone. Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.listeners.len();
        self.listeners
            .retain(|listener| listener.node.strong_count() > 0);
        before - self.listeners.len()
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl EventBinder<MemoryNode> for EventRegistry {
    fn bind(&mut self, node: &MemoryNode, event: &str, handler: Handler) -> Result<(), BindError> {
        if node.is_text() {
            return Err(BindError::new(format!(
                "cannot listen for `{event}` on a text node"
            )));
        }
        tracing::trace!(event, "binding listener");
        self.listeners.push(Listener {
            node: node.downgrade().0,
            event: event.to_owned(),
            handler,
        });
        Ok(())
    }
}
