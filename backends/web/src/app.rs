use sprout_core::{BindingConfig, Component, RenderError, RenderOutcome, Renderer, Target};
use web_sys::{Element, Node};

use crate::{
    WebRenderer, dom::WebDocument, error::WebError, events::DomEventBinder,
    lookup::ElementIdLookup,
};

const DEFAULT_ROOT_ID: &str = "sprout-root";

/// Builder for [`WebMount`].
#[derive(Debug, Clone)]
pub struct WebMountBuilder {
    root_id: Option<String>,
    config: BindingConfig,
    panic_hook: bool,
}

impl Default for WebMountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebMountBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root_id: None,
            config: BindingConfig::default(),
            panic_hook: true,
        }
    }

    /// Sets the DOM element identifier that should host the application. Without one, a
    /// `<div id="sprout-root">` is appended to the body.
    #[must_use]
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = Some(id.into());
        self
    }

    /// Replaces the attribute-binding conventions.
    #[must_use]
    pub fn with_config(mut self, config: BindingConfig) -> Self {
        self.config = config;
        self
    }

    /// Controls whether panics are forwarded to the browser console.
    #[must_use]
    pub const fn panic_hook(mut self, install: bool) -> Self {
        self.panic_hook = install;
        self
    }

    /// Finalises the builder and creates a [`WebMount`].
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM is unavailable or the root element cannot be found.
    pub fn build(self) -> Result<WebMount, WebError> {
        if self.panic_hook {
            console_error_panic_hook::set_once();
        }

        let tree = WebDocument::from_window()?;
        let document = tree.document().clone();
        let root = if let Some(id) = self.root_id.as_deref() {
            document
                .get_element_by_id(id)
                .ok_or_else(|| WebError::RootNotFound(id.to_owned()))?
        } else {
            let body = document.body().ok_or(WebError::DomUnavailable)?;
            let host = document.create_element("div")?;
            host.set_id(DEFAULT_ROOT_ID);
            body.append_child(&host)?;
            host
        };

        let renderer = Renderer::builder(tree, DomEventBinder::new())
            .with_config(self.config)
            .with_lookup(ElementIdLookup::new(document))
            .build();
        tracing::debug!(root = %root.id(), "web mount ready");
        Ok(WebMount { root, renderer })
    }
}

/// A renderer bound to one root element in the page.
#[derive(Debug)]
pub struct WebMount {
    root: Element,
    renderer: WebRenderer,
}

impl WebMount {
    /// Mounts onto the element with id `root_id` using the default configuration.
    ///
    /// # Errors
    ///
    /// See [`WebMountBuilder::build`].
    pub fn new(root_id: &str) -> Result<Self, WebError> {
        WebMountBuilder::new().with_root_id(root_id).build()
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Provides access to the renderer.
    #[must_use]
    pub const fn renderer(&self) -> &WebRenderer {
        &self.renderer
    }

    /// Provides mutable access to the renderer, e.g. to render into other containers.
    #[must_use]
    pub const fn renderer_mut(&mut self) -> &mut WebRenderer {
        &mut self.renderer
    }

    /// Renders `component` into the root element, then releases listeners of nodes the render
    /// detached.
    ///
    /// # Errors
    ///
    /// See [`Renderer::mount`].
    pub fn render(&mut self, component: impl Component) -> Result<RenderOutcome, RenderError> {
        let root: Node = self.root.clone().into();
        let outcome = self.renderer.render(component, Target::node(root));
        self.renderer.binder_mut().prune();
        outcome
    }
}
