//! Tree builder: constructs element descriptions from a tag, attributes and children.
//!
//! Children can be passed as arbitrarily nested groups (tuples, vectors, arrays, options);
//! [`IntoChildren`] flattens them into one ordered sequence before the element is stored.
//!
//! ```
//! use sprout_core::{h, Attrs, Node};
//!
//! let show_footer = false;
//! let list = h(
//!     "ul",
//!     [("class", "todo")],
//!     (
//!         h("li", (), "first"),
//!         vec![h("li", (), "second"), h("li", (), "third")],
//!         show_footer.then(|| h("li", (), "footer")),
//!     ),
//! );
//! assert_eq!(list.as_element().map(|el| el.children().len()), Some(4));
//! ```

use std::rc::Rc;

use crate::node::{Attrs, Element, Node, Scalar};

/// Values that can be appended to an element's child list.
pub trait IntoChildren {
    /// Pushes the flattened children onto `children`.
    fn push_into(self, children: &mut Vec<Node>);

    /// Collects the flattened children into a new vector.
    fn into_children(self) -> Vec<Node>
    where
        Self: Sized,
    {
        let mut children = Vec::new();
        self.push_into(&mut children);
        children
    }
}

impl IntoChildren for Node {
    fn push_into(self, children: &mut Vec<Node>) {
        children.push(self);
    }
}

impl IntoChildren for &Node {
    fn push_into(self, children: &mut Vec<Node>) {
        children.push(self.clone());
    }
}

impl IntoChildren for Element {
    fn push_into(self, children: &mut Vec<Node>) {
        children.push(Node::Element(Rc::new(self)));
    }
}

impl IntoChildren for Scalar {
    fn push_into(self, children: &mut Vec<Node>) {
        children.push(Node::Text(self));
    }
}

macro_rules! text_children {
    ($($ty:ty),*) => {
        $(
            impl IntoChildren for $ty {
                fn push_into(self, children: &mut Vec<Node>) {
                    children.push(Node::Text(Scalar::from(self)));
                }
            }
        )*
    };
}

text_children!(&str, String, f64, f32, i32, u32, i16, u16, i8, u8);

/// `None` keeps an absent slot so the positions of later siblings stay stable.
impl<T: IntoChildren> IntoChildren for Option<T> {
    fn push_into(self, children: &mut Vec<Node>) {
        match self {
            Some(value) => value.push_into(children),
            None => children.push(Node::Absent),
        }
    }
}

impl<T: IntoChildren> IntoChildren for Vec<T> {
    fn push_into(self, children: &mut Vec<Node>) {
        for child in self {
            child.push_into(children);
        }
    }
}

impl<T: IntoChildren, const N: usize> IntoChildren for [T; N] {
    fn push_into(self, children: &mut Vec<Node>) {
        for child in self {
            child.push_into(children);
        }
    }
}

impl<T: IntoChildren + Clone> IntoChildren for &[T] {
    fn push_into(self, children: &mut Vec<Node>) {
        for child in self {
            child.clone().push_into(children);
        }
    }
}

macro_rules! impl_into_children {
    ($($ty:ident),*) => {
        #[allow(non_snake_case)]
        #[allow(unused_variables)]
        impl<$($ty: IntoChildren,)*> IntoChildren for ($($ty,)*) {
            fn push_into(self, children: &mut Vec<Node>) {
                let ($($ty,)*) = self;
                $($ty.push_into(children);)*
            }
        }
    };
}

tuples!(impl_into_children);

/// Builds an element description.
///
/// `attrs` is taken by value, so later changes to the caller's map cannot leak into the
/// stored element. `children` is flattened in order.
pub fn build(tag: impl Into<String>, attrs: impl Into<Attrs>, children: impl IntoChildren) -> Node {
    let tag = tag.into();
    debug_assert!(!tag.is_empty(), "element tag must not be empty");
    Node::Element(Rc::new(Element::new(
        tag,
        attrs.into(),
        children.into_children(),
    )))
}

/// Short alias for [`build`].
pub fn h(tag: impl Into<String>, attrs: impl Into<Attrs>, children: impl IntoChildren) -> Node {
    build(tag, attrs, children)
}

/// Builds a text node.
pub fn text(value: impl Into<Scalar>) -> Node {
    Node::Text(value.into())
}
