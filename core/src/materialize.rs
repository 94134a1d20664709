//! Display adapter: turns tree descriptions into new display nodes.

use core::fmt;

use crate::binding::{BindingPolicy, EventBinder};
use crate::display::DisplayTree;
use crate::error::RenderError;
use crate::node::{AttrValue, Node};

/// The collaborators needed to touch a display tree during one render.
pub struct RenderCtx<'a, D: DisplayTree> {
    tree: &'a D,
    binder: &'a mut dyn EventBinder<D::Node>,
    policy: &'a BindingPolicy<D>,
}

impl<D: DisplayTree> fmt::Debug for RenderCtx<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCtx")
            .field("policy", self.policy)
            .finish_non_exhaustive()
    }
}

impl<'a, D: DisplayTree> RenderCtx<'a, D> {
    /// Creates a new [`RenderCtx`].
    pub fn new(
        tree: &'a D,
        binder: &'a mut dyn EventBinder<D::Node>,
        policy: &'a BindingPolicy<D>,
    ) -> Self {
        Self {
            tree,
            binder,
            policy,
        }
    }

    /// Returns the display tree.
    #[must_use]
    pub const fn tree(&self) -> &'a D {
        self.tree
    }

    /// Binds one attribute onto `node` through the policy.
    ///
    /// # Errors
    ///
    /// Propagates display-tree and binder failures.
    pub fn bind_attribute(
        &mut self,
        node: &D::Node,
        key: &str,
        value: Option<&AttrValue>,
    ) -> Result<(), RenderError> {
        self.policy
            .bind(self.tree, &mut *self.binder, node, key, value)
    }

    /// Creates a fresh display subtree for `node`.
    ///
    /// Returns `Ok(None)` for [`Node::Absent`]; the caller must not attach anything then.
    /// Every call builds an independent subtree.
    ///
    /// # Errors
    ///
    /// Propagates display-tree and binder failures.
    pub fn materialize(&mut self, node: &Node) -> Result<Option<D::Node>, RenderError> {
        match node {
            Node::Absent => Ok(None),
            Node::Text(scalar) => self.tree.create_text(&scalar.to_string()).map(Some),
            Node::Element(element) => {
                let display = self.tree.create_element(element.tag())?;
                for (key, value) in element.attrs().iter() {
                    self.bind_attribute(&display, key, Some(value))?;
                }
                for child in element.children() {
                    if let Some(child) = self.materialize(child)? {
                        self.tree.append_child(&display, &child)?;
                    }
                }
                Ok(Some(display))
            }
        }
    }
}
