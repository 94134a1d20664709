//! Immutable tree descriptions.
//!
//! A [`Node`] describes one desired UI node. Elements are reference counted, so a description
//! can be shared between the differ, the patcher and the mount cache without copying.

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Inline style properties, in insertion order.
pub type StyleMap = IndexMap<String, String>;

/// A scalar rendered as character data.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A string scalar.
    Str(String),
    /// A numeric scalar.
    Number(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Number(value) => write_number(f, *value),
        }
    }
}

// Matches how browsers stringify numbers for the common cases.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{value}")
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

macro_rules! scalar_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

scalar_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

/// The payload handed to event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    value: Option<String>,
}

impl Event {
    /// Creates an event with the given name and no target value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Attaches the current value of the event target (for inputs).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Returns the event name, e.g. `click`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the target value, if the backend captured one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A shared event handler.
///
/// Handlers compare by identity: two separately created handlers are never equal, even when
/// they wrap identical code.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
    /// Wraps a closure into a handler.
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    /// Invokes the handler.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// A value stored in an element's attribute map.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A string value.
    Str(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// An event handler.
    Handler(Handler),
    /// An inline style mapping.
    Style(StyleMap),
}

impl AttrValue {
    /// Returns the handler if this value is one.
    #[must_use]
    pub const fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// Returns the style mapping if this value is one.
    #[must_use]
    pub const fn as_style(&self) -> Option<&StyleMap> {
        match self {
            Self::Style(style) => Some(style),
            _ => None,
        }
    }

    /// Returns the boolean if this value is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Renders the value the way it appears as a string attribute.
    ///
    /// Style mappings become `prop: value` declarations; handlers have no textual form and
    /// render as an empty string.
    #[must_use]
    pub fn to_attribute_string(&self) -> String {
        match self {
            Self::Str(value) => value.clone(),
            Self::Number(value) => Scalar::Number(*value).to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Handler(_) => String::new(),
            Self::Style(style) => style
                .iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Handler> for AttrValue {
    fn from(value: Handler) -> Self {
        Self::Handler(value)
    }
}

impl From<StyleMap> for AttrValue {
    fn from(value: StyleMap) -> Self {
        Self::Style(value)
    }
}

macro_rules! attr_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

attr_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

/// An element's attribute map. Keys are unique and keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(IndexMap<String, AttrValue>);

impl Attrs {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute and returns the map, for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an attribute, replacing any previous value for the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<()> for Attrs {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attrs {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> From<Vec<(K, V)>> for Attrs {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// An element description: tag, attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Attrs,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element from already flattened parts.
    #[must_use]
    pub fn new(tag: impl Into<String>, attrs: Attrs, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the attribute map.
    #[must_use]
    pub const fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Returns the children, including absent slots.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// One node of a tree description.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    /// An element with tag, attributes and children.
    Element(Rc<Element>),
    /// Character data.
    Text(Scalar),
    /// Renders nothing. Keeps conditional child slots stable.
    #[default]
    Absent,
}

impl Node {
    /// The absent node.
    #[must_use]
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// Returns `true` for [`Node::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the scalar if this node is text.
    #[must_use]
    pub const fn as_text(&self) -> Option<&Scalar> {
        match self {
            Self::Text(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(Rc::new(element))
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Self::Text(scalar)
    }
}

impl<T: Into<Self>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_stringify_like_the_browser() {
        assert_eq!(Scalar::from(1).to_string(), "1");
        assert_eq!(Scalar::from(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Number(-0.0).to_string(), "0");
        assert_eq!(Scalar::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Scalar::Number(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn string_and_number_scalars_differ() {
        assert_ne!(Scalar::from("1"), Scalar::from(1));
    }

    #[test]
    fn handlers_compare_by_identity() {
        let first = Handler::new(|_| {});
        let second = Handler::new(|_| {});
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn attrs_keep_insertion_order_and_unique_keys() {
        let attrs = Attrs::new().with("b", 1).with("a", "x").with("b", 2);
        let keys: Vec<_> = attrs.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(attrs.get("b"), Some(&AttrValue::Number(2.0)));
    }

    #[test]
    fn style_renders_as_declarations() {
        let mut style = StyleMap::new();
        style.insert("color".into(), "red".into());
        style.insert("margin".into(), "0".into());
        assert_eq!(
            AttrValue::Style(style).to_attribute_string(),
            "color: red; margin: 0;"
        );
    }

    #[test]
    fn optional_nodes_become_absent() {
        assert!(Node::from(None::<Element>).is_absent());
    }
}
