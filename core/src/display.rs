//! The display-tree surface the engine renders into.
//!
//! The engine needs only these primitives. Backends own the actual nodes: `sprout-memory`
//! keeps them in reference-counted cells, `sprout-web` forwards to the browser DOM.

use core::fmt::Debug;

use crate::error::RenderError;
use crate::node::AttrValue;

/// A mutable display tree that descriptions are rendered into.
///
/// Node handles are cheap to clone and refer to the same underlying node.
pub trait DisplayTree: 'static {
    /// A handle to a display node.
    type Node: Clone + Debug;
    /// A non-owning handle used by the mount cache. Must not keep the node alive.
    type Weak: Debug;

    /// Creates a detached element node.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the tag.
    fn create_element(&self, tag: &str) -> Result<Self::Node, RenderError>;

    /// Creates a detached character-data node.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot create text nodes.
    fn create_text(&self, text: &str) -> Result<Self::Node, RenderError>;

    /// Sets a string attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not an element or the name is invalid.
    fn set_attribute(&self, node: &Self::Node, key: &str, value: &str) -> Result<(), RenderError>;

    /// Removes an attribute. Removing a missing attribute is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not an element.
    fn remove_attribute(&self, node: &Self::Node, key: &str) -> Result<(), RenderError>;

    /// Assigns a live property that affects interactive state immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the assignment.
    fn set_property(
        &self,
        node: &Self::Node,
        key: &str,
        value: &AttrValue,
    ) -> Result<(), RenderError>;

    /// Resets a live property.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the assignment.
    fn remove_property(&self, node: &Self::Node, key: &str) -> Result<(), RenderError>;

    /// Sets one inline style property.
    ///
    /// # Errors
    ///
    /// Returns an error if the node has no style surface.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str)
    -> Result<(), RenderError>;

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the insertion.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), RenderError>;

    /// Inserts `child` before the child currently at `index`, or appends when `index` is
    /// past the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the insertion.
    fn insert_child(
        &self,
        parent: &Self::Node,
        child: &Self::Node,
        index: usize,
    ) -> Result<(), RenderError>;

    /// Puts `new` where `old` currently is.
    ///
    /// # Errors
    ///
    /// Returns an error if `old` is not a child of `parent`.
    fn replace_child(
        &self,
        parent: &Self::Node,
        new: &Self::Node,
        old: &Self::Node,
    ) -> Result<(), RenderError>;

    /// Detaches `child` from `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `child` is not a child of `parent`.
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), RenderError>;

    /// Returns the child at `index`, if any.
    fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;

    /// Returns the number of children.
    fn child_count(&self, parent: &Self::Node) -> usize;

    /// Detaches every child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if a child cannot be removed.
    fn clear(&self, parent: &Self::Node) -> Result<(), RenderError> {
        while let Some(child) = self.child_at(parent, 0) {
            self.remove_child(parent, &child)?;
        }
        Ok(())
    }

    /// Creates a non-owning handle to `node`.
    fn downgrade(&self, node: &Self::Node) -> Self::Weak;

    /// Recovers the node behind a weak handle if it is still alive.
    fn upgrade(&self, weak: &Self::Weak) -> Option<Self::Node>;

    /// Returns `true` if both handles refer to the same node.
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool;
}
