use sprout_core::{AttrValue, DisplayTree, RenderError};
use wasm_bindgen::{JsCast, JsValue, prelude::wasm_bindgen};
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::error::WebError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = WeakRef)]
    #[derive(Debug, Clone)]
    type JsWeakRef;

    #[wasm_bindgen(constructor, js_class = "WeakRef")]
    fn new(target: &JsValue) -> JsWeakRef;

    #[wasm_bindgen(method, js_class = "WeakRef")]
    fn deref(this: &JsWeakRef) -> JsValue;
}

/// A `WeakRef` to a DOM node.
#[derive(Debug, Clone)]
pub struct WeakNode(JsWeakRef);

/// The browser DOM as a display tree.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    /// Wraps the document of the current window.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::DomUnavailable`] outside a browser.
    pub fn from_window() -> Result<Self, WebError> {
        let window: Window = web_sys::window().ok_or(WebError::DomUnavailable)?;
        let document = window.document().ok_or(WebError::DomUnavailable)?;
        Ok(Self::new(document))
    }

    /// Wraps `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// Returns the wrapped document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }
}

fn as_element<'a>(node: &'a Node, operation: &'static str) -> Result<&'a Element, WebError> {
    node.dyn_ref::<Element>()
        .ok_or_else(|| WebError::WrongNodeKind(node.node_name(), operation))
}

fn to_js(value: &AttrValue) -> JsValue {
    match value {
        AttrValue::Str(value) => JsValue::from_str(value),
        AttrValue::Number(value) => JsValue::from_f64(*value),
        AttrValue::Bool(value) => JsValue::from_bool(*value),
        AttrValue::Style(_) => JsValue::from_str(&value.to_attribute_string()),
        AttrValue::Handler(_) => JsValue::UNDEFINED,
    }
}

impl DisplayTree for WebDocument {
    type Node = Node;
    type Weak = WeakNode;

    fn create_element(&self, tag: &str) -> Result<Node, RenderError> {
        let element = self.document.create_element(tag).map_err(WebError::from)?;
        Ok(element.into())
    }

    fn create_text(&self, text: &str) -> Result<Node, RenderError> {
        Ok(self.document.create_text_node(text).into())
    }

    fn set_attribute(&self, node: &Node, key: &str, value: &str) -> Result<(), RenderError> {
        as_element(node, "hold attributes")?
            .set_attribute(key, value)
            .map_err(WebError::from)?;
        Ok(())
    }

    fn remove_attribute(&self, node: &Node, key: &str) -> Result<(), RenderError> {
        as_element(node, "hold attributes")?
            .remove_attribute(key)
            .map_err(WebError::from)?;
        Ok(())
    }

    fn set_property(&self, node: &Node, key: &str, value: &AttrValue) -> Result<(), RenderError> {
        js_sys::Reflect::set(node, &JsValue::from_str(key), &to_js(value))
            .map_err(WebError::from)?;
        Ok(())
    }

    fn remove_property(&self, node: &Node, key: &str) -> Result<(), RenderError> {
        let reset = if key == "value" {
            JsValue::from_str("")
        } else {
            JsValue::FALSE
        };
        js_sys::Reflect::set(node, &JsValue::from_str(key), &reset).map_err(WebError::from)?;
        Ok(())
    }

    fn set_style(&self, node: &Node, property: &str, value: &str) -> Result<(), RenderError> {
        let element = node
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| WebError::WrongNodeKind(node.node_name(), "hold inline styles"))?;
        element
            .style()
            .set_property(property, value)
            .map_err(WebError::from)?;
        Ok(())
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<(), RenderError> {
        parent.append_child(child).map_err(WebError::from)?;
        Ok(())
    }

    fn insert_child(&self, parent: &Node, child: &Node, index: usize) -> Result<(), RenderError> {
        let reference = self.child_at(parent, index);
        parent
            .insert_before(child, reference.as_ref())
            .map_err(WebError::from)?;
        Ok(())
    }

    fn replace_child(&self, parent: &Node, new: &Node, old: &Node) -> Result<(), RenderError> {
        parent.replace_child(new, old).map_err(WebError::from)?;
        Ok(())
    }

    fn remove_child(&self, parent: &Node, child: &Node) -> Result<(), RenderError> {
        parent.remove_child(child).map_err(WebError::from)?;
        Ok(())
    }

    fn child_at(&self, parent: &Node, index: usize) -> Option<Node> {
        let index = u32::try_from(index).ok()?;
        parent.child_nodes().item(index)
    }

    fn child_count(&self, parent: &Node) -> usize {
        parent.child_nodes().length() as usize
    }

    fn clear(&self, parent: &Node) -> Result<(), RenderError> {
        while let Some(child) = parent.first_child() {
            parent.remove_child(&child).map_err(WebError::from)?;
        }
        Ok(())
    }

    fn downgrade(&self, node: &Node) -> WeakNode {
        WeakNode(JsWeakRef::new(node.as_ref()))
    }

    fn upgrade(&self, weak: &WeakNode) -> Option<Node> {
        weak.0.deref().dyn_into::<Node>().ok()
    }

    fn same_node(&self, a: &Node, b: &Node) -> bool {
        a.is_same_node(Some(b))
    }
}
