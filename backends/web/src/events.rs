use core::fmt;

use sprout_core::{BindError, Event, EventBinder, Handler};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{EventTarget, Node};

struct DomListener {
    target: Node,
    event: String,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl DomListener {
    fn detach(self) {
        let target: &EventTarget = self.target.as_ref();
        if let Err(error) = target.remove_event_listener_with_callback(
            &self.event,
            self.closure.as_ref().unchecked_ref(),
        ) {
            tracing::warn!(event = self.event.as_str(), ?error, "failed to detach listener");
        }
    }
}

/// Attaches handlers as native DOM listeners.
///
/// Each bind adds a listener; earlier ones for the same node and event stay attached. The
/// binder owns the JavaScript closures and the targets they listen on. [`prune`](Self::prune)
/// releases listeners of nodes that left the document, and dropping the binder detaches the
/// rest.
#[derive(Default)]
pub struct DomEventBinder {
    listeners: Vec<DomListener>,
}

impl fmt::Debug for DomEventBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomEventBinder")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DomEventBinder {
    /// Creates a binder with no listeners.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Detaches and drops the listeners whose node is no longer connected to a document.
    /// Returns how many were dropped.
    ///
    /// Nodes being built for a container that is not attached yet count as disconnected, so
    /// call this only after rendering into attached containers.
    pub fn prune(&mut self) -> usize {
        let (live, dead): (Vec<_>, Vec<_>) = self
            .listeners
            .drain(..)
            .partition(|listener| listener.target.is_connected());
        self.listeners = live;
        let dropped = dead.len();
        for listener in dead {
            listener.detach();
        }
        if dropped > 0 {
            tracing::trace!(dropped, "pruned listeners of detached nodes");
        }
        dropped
    }

    /// Detaches every listener.
    pub fn detach_all(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }
}

impl Drop for DomEventBinder {
    fn drop(&mut self) {
        self.detach_all();
    }
}

fn translate(name: &str, native: &web_sys::Event) -> Event {
    let value = native
        .target()
        .and_then(|target| js_sys::Reflect::get(&target, &JsValue::from_str("value")).ok())
        .and_then(|value| value.as_string());
    match value {
        Some(value) => Event::new(name).with_value(value),
        None => Event::new(name),
    }
}

impl EventBinder<Node> for DomEventBinder {
    fn bind(&mut self, node: &Node, event: &str, handler: Handler) -> Result<(), BindError> {
        let name = event.to_owned();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |native: web_sys::Event| {
            handler.call(&translate(&name, &native));
        });
        let target: &EventTarget = node.as_ref();
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|error| BindError::new(format!("addEventListener(`{event}`) failed: {error:?}")))?;
        tracing::trace!(event, "attached DOM listener");
        self.listeners.push(DomListener {
            target: node.clone(),
            event: event.to_owned(),
            closure,
        });
        Ok(())
    }
}
