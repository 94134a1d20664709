use core::fmt;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use sprout_core::AttrValue;

#[derive(Debug)]
pub(crate) enum NodeKind {
    Element(String),
    Text(String),
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) properties: IndexMap<String, AttrValue>,
    pub(crate) style: IndexMap<String, String>,
    pub(crate) children: Vec<MemoryNode>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: IndexMap::new(),
            properties: IndexMap::new(),
            style: IndexMap::new(),
            children: Vec::new(),
        }
    }
}

/// A handle to an in-memory display node. Clones share the same node.
#[derive(Clone)]
pub struct MemoryNode(pub(crate) Rc<RefCell<NodeData>>);

/// A non-owning handle to a [`MemoryNode`].
#[derive(Debug, Clone)]
pub struct WeakMemoryNode(pub(crate) Weak<RefCell<NodeData>>);

impl WeakMemoryNode {
    /// Recovers the node if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<MemoryNode> {
        self.0.upgrade().map(MemoryNode)
    }
}

impl MemoryNode {
    /// Creates a detached element.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(NodeData::new(NodeKind::Element(
            tag.into(),
        )))))
    }

    /// Creates a detached text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(NodeData::new(NodeKind::Text(
            text.into(),
        )))))
    }

    /// Returns the tag, or `None` for text nodes.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element(tag) => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns `true` for text nodes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Text(_))
    }

    /// Concatenated character data of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(_) => data.children.iter().map(Self::text_content).collect(),
        }
    }

    /// Reads a string attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.0.borrow().attributes.get(key).cloned()
    }

    /// Attribute names in the order they were first set.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<String> {
        self.0.borrow().attributes.keys().cloned().collect()
    }

    /// Reads a live property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// Reads one inline style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    /// Snapshot of the children.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<Self> {
        self.0.borrow().children.get(index).cloned()
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Returns `true` if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Creates a non-owning handle.
    #[must_use]
    pub fn downgrade(&self) -> WeakMemoryNode {
        WeakMemoryNode(Rc::downgrade(&self.0))
    }

    /// Finds the first element in this subtree (including itself) whose `id` attribute
    /// equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<Self> {
        if self.attribute("id").as_deref() == Some(id) {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_id(id))
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Element(tag) => write!(
                f,
                "MemoryNode(<{tag}> with {} children @{:p})",
                data.children.len(),
                Rc::as_ptr(&self.0)
            ),
            NodeKind::Text(text) => write!(f, "MemoryNode({text:?} @{:p})", Rc::as_ptr(&self.0)),
        }
    }
}
