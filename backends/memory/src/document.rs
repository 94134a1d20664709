use sprout_core::{AttrValue, ContainerLookup, DisplayTree, RenderError};

use crate::node::{MemoryNode, NodeKind, WeakMemoryNode};

/// The in-memory display tree.
///
/// Nodes live in their own reference-counted cells, so the document itself carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryDocument;

impl MemoryDocument {
    /// Creates a new document.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn require_element(node: &MemoryNode, operation: &str) -> Result<(), RenderError> {
    if node.is_text() {
        return Err(RenderError::Display(format!(
            "cannot {operation} on a text node"
        )));
    }
    Ok(())
}

fn position_of(parent: &MemoryNode, child: &MemoryNode) -> Result<usize, RenderError> {
    parent
        .0
        .borrow()
        .children
        .iter()
        .position(|candidate| candidate.ptr_eq(child))
        .ok_or_else(|| RenderError::Display(format!("{child:?} is not a child of {parent:?}")))
}

fn require_distinct(parent: &MemoryNode, child: &MemoryNode) -> Result<(), RenderError> {
    if parent.ptr_eq(child) {
        return Err(RenderError::Display(
            "a node cannot be its own child".to_owned(),
        ));
    }
    Ok(())
}

impl DisplayTree for MemoryDocument {
    type Node = MemoryNode;
    type Weak = WeakMemoryNode;

    fn create_element(&self, tag: &str) -> Result<MemoryNode, RenderError> {
        if tag.is_empty() {
            return Err(RenderError::Display("element tag is empty".to_owned()));
        }
        Ok(MemoryNode::element(tag))
    }

    fn create_text(&self, text: &str) -> Result<MemoryNode, RenderError> {
        Ok(MemoryNode::text(text))
    }

    fn set_attribute(&self, node: &MemoryNode, key: &str, value: &str) -> Result<(), RenderError> {
        require_element(node, "set an attribute")?;
        node.0
            .borrow_mut()
            .attributes
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_attribute(&self, node: &MemoryNode, key: &str) -> Result<(), RenderError> {
        require_element(node, "remove an attribute")?;
        let mut data = node.0.borrow_mut();
        data.attributes.shift_remove(key);
        // Dropping the attribute drops every inline declaration, as in the DOM.
        if key == "style" {
            data.style.clear();
        }
        Ok(())
    }

    fn set_property(
        &self,
        node: &MemoryNode,
        key: &str,
        value: &AttrValue,
    ) -> Result<(), RenderError> {
        require_element(node, "set a property")?;
        node.0
            .borrow_mut()
            .properties
            .insert(key.to_owned(), value.clone());
        Ok(())
    }

    fn remove_property(&self, node: &MemoryNode, key: &str) -> Result<(), RenderError> {
        require_element(node, "remove a property")?;
        node.0.borrow_mut().properties.shift_remove(key);
        Ok(())
    }

    fn set_style(&self, node: &MemoryNode, property: &str, value: &str) -> Result<(), RenderError> {
        require_element(node, "set a style")?;
        node.0
            .borrow_mut()
            .style
            .insert(property.to_owned(), value.to_owned());
        Ok(())
    }

    fn append_child(&self, parent: &MemoryNode, child: &MemoryNode) -> Result<(), RenderError> {
        require_element(parent, "append a child")?;
        require_distinct(parent, child)?;
        parent.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    fn insert_child(
        &self,
        parent: &MemoryNode,
        child: &MemoryNode,
        index: usize,
    ) -> Result<(), RenderError> {
        require_element(parent, "insert a child")?;
        require_distinct(parent, child)?;
        let mut data = parent.0.borrow_mut();
        let index = index.min(data.children.len());
        data.children.insert(index, child.clone());
        Ok(())
    }

    fn replace_child(
        &self,
        parent: &MemoryNode,
        new: &MemoryNode,
        old: &MemoryNode,
    ) -> Result<(), RenderError> {
        require_distinct(parent, new)?;
        let index = position_of(parent, old)?;
        parent.0.borrow_mut().children[index] = new.clone();
        Ok(())
    }

    fn remove_child(&self, parent: &MemoryNode, child: &MemoryNode) -> Result<(), RenderError> {
        let index = position_of(parent, child)?;
        parent.0.borrow_mut().children.remove(index);
        Ok(())
    }

    fn child_at(&self, parent: &MemoryNode, index: usize) -> Option<MemoryNode> {
        parent.child(index)
    }

    fn child_count(&self, parent: &MemoryNode) -> usize {
        parent.child_count()
    }

    fn clear(&self, parent: &MemoryNode) -> Result<(), RenderError> {
        let mut data = parent.0.borrow_mut();
        if let NodeKind::Element(_) = data.kind {
            data.children.clear();
        }
        Ok(())
    }

    fn downgrade(&self, node: &MemoryNode) -> WeakMemoryNode {
        node.downgrade()
    }

    fn upgrade(&self, weak: &WeakMemoryNode) -> Option<MemoryNode> {
        weak.upgrade()
    }

    fn same_node(&self, a: &MemoryNode, b: &MemoryNode) -> bool {
        a.ptr_eq(b)
    }
}

/// Resolves lookup keys to the element with a matching `id` under a root node.
///
/// A leading `#` is ignored, so `"app"` and `"#app"` find the same container. The root is
/// held weakly.
#[derive(Debug, Clone)]
pub struct IdLookup {
    root: WeakMemoryNode,
}

impl IdLookup {
    /// Searches the subtree under `root`.
    #[must_use]
    pub fn new(root: &MemoryNode) -> Self {
        Self {
            root: root.downgrade(),
        }
    }
}

impl ContainerLookup<MemoryNode> for IdLookup {
    fn find(&self, key: &str) -> Option<MemoryNode> {
        let id = key.strip_prefix('#').unwrap_or(key);
        self.root.upgrade()?.find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_past_the_end_appends() {
        let document = MemoryDocument::new();
        let parent = MemoryNode::element("ul");
        let first = MemoryNode::text("a");
        let second = MemoryNode::text("b");
        document.append_child(&parent, &first).expect("append");
        document.insert_child(&parent, &second, 10).expect("insert");
        assert!(parent.child(1).is_some_and(|child| child.ptr_eq(&second)));

        let zeroth = MemoryNode::text("z");
        document.insert_child(&parent, &zeroth, 0).expect("insert");
        assert_eq!(parent.text_content(), "zab");
    }

    #[test]
    fn text_nodes_reject_attributes_and_children() {
        let document = MemoryDocument::new();
        let text = MemoryNode::text("a");
        assert!(document.set_attribute(&text, "id", "x").is_err());
        assert!(
            document
                .append_child(&text, &MemoryNode::text("b"))
                .is_err()
        );
    }

    #[test]
    fn removing_the_style_attribute_clears_inline_styles() {
        let document = MemoryDocument::new();
        let node = MemoryNode::element("p");
        document.set_style(&node, "color", "red").expect("style");
        document.remove_attribute(&node, "style").expect("remove");
        assert_eq!(node.style("color"), None);
        assert_eq!(node.to_markup(), "<p></p>");
    }

    #[test]
    fn removing_a_stranger_fails() {
        let document = MemoryDocument::new();
        let parent = MemoryNode::element("div");
        assert!(
            document
                .remove_child(&parent, &MemoryNode::element("span"))
                .is_err()
        );
    }

    #[test]
    fn weak_handles_do_not_keep_nodes_alive() {
        let document = MemoryDocument::new();
        let node = MemoryNode::element("div");
        let weak = document.downgrade(&node);
        assert!(document.upgrade(&weak).is_some());
        drop(node);
        assert!(document.upgrade(&weak).is_none());
    }

    #[test]
    fn id_lookup_accepts_hash_prefix() {
        let root = MemoryNode::element("body");
        let app = MemoryNode::element("div");
        let document = MemoryDocument::new();
        document.set_attribute(&app, "id", "app").expect("attr");
        document.append_child(&root, &app).expect("append");

        let lookup = IdLookup::new(&root);
        assert!(lookup.find("#app").is_some_and(|found| found.ptr_eq(&app)));
        assert!(lookup.find("app").is_some());
        assert!(lookup.find("missing").is_none());
    }
}
