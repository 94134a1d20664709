//! Structural comparison of two tree descriptions.
//!
//! Children are compared by position only. A child inserted in the middle of a list is diffed
//! against whatever previously occupied that index, which can cascade into replacements
//! instead of one insert.

use crate::node::{Attrs, Element, Node};
use crate::patch::{AttrChange, ElementUpdate, Patch};

/// Computes the patch that turns `old` into `new`.
///
/// Returns `None` when nothing needs to change at this position. Rules, in order:
///
/// 1. `old` absent: [`Patch::Create`] (even if `new` is absent too).
/// 2. `new` absent: [`Patch::Remove`].
/// 3. Text on one side, element on the other: [`Patch::Replace`].
/// 4. Two texts: `None` if equal, [`Patch::Replace`] otherwise.
/// 5. Two elements with different tags: [`Patch::Replace`].
/// 6. Two elements with the same tag: [`Patch::Update`], possibly empty.
#[must_use]
pub fn diff(old: &Node, new: &Node) -> Option<Patch> {
    match (old, new) {
        (Node::Absent, _) => Some(Patch::Create(new.clone())),
        (_, Node::Absent) => Some(Patch::Remove),
        (Node::Text(before), Node::Text(after)) => {
            (before != after).then(|| Patch::Replace(new.clone()))
        }
        (Node::Element(before), Node::Element(after)) => {
            if before.tag() == after.tag() {
                Some(Patch::Update(diff_element(before, after)))
            } else {
                Some(Patch::Replace(new.clone()))
            }
        }
        (Node::Text(_), Node::Element(_)) | (Node::Element(_), Node::Text(_)) => {
            Some(Patch::Replace(new.clone()))
        }
    }
}

fn diff_element(old: &Element, new: &Element) -> ElementUpdate {
    ElementUpdate {
        attrs: diff_attrs(old.attrs(), new.attrs()),
        children: diff_children(old.children(), new.children()),
    }
}

/// Changed or added keys in `new` order, then removed keys in `old` order.
#[must_use]
pub fn diff_attrs(old: &Attrs, new: &Attrs) -> Vec<AttrChange> {
    let changed = new
        .iter()
        .filter(|(key, value)| old.get(key) != Some(*value))
        .map(|(key, value)| AttrChange::set(key, value.clone()));
    let removed = old
        .iter()
        .filter(|(key, _)| !new.contains_key(key))
        .map(|(key, _)| AttrChange::remove(key));
    changed.chain(removed).collect()
}

/// Index-aligned child patches; out-of-range positions count as absent.
#[must_use]
pub fn diff_children(old: &[Node], new: &[Node]) -> Vec<Option<Patch>> {
    let absent = Node::Absent;
    (0..old.len().max(new.len()))
        .map(|index| {
            diff(
                old.get(index).unwrap_or(&absent),
                new.get(index).unwrap_or(&absent),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{h, text};
    use crate::node::{AttrValue, Handler, StyleMap};

    fn update(patch: Option<Patch>) -> ElementUpdate {
        match patch {
            Some(Patch::Update(update)) => update,
            other => panic!("expected an update, got {other:?}"),
        }
    }

    #[test]
    fn absent_old_creates() {
        assert_eq!(diff(&Node::Absent, &text("a")), Some(Patch::Create(text("a"))));
        assert_eq!(
            diff(&Node::Absent, &Node::Absent),
            Some(Patch::Create(Node::Absent))
        );
    }

    #[test]
    fn absent_new_removes() {
        assert_eq!(diff(&h("div", (), ()), &Node::Absent), Some(Patch::Remove));
        assert_eq!(diff(&text("a"), &Node::Absent), Some(Patch::Remove));
    }

    #[test]
    fn kind_change_replaces() {
        let element = h("div", (), ());
        assert_eq!(
            diff(&text("a"), &element),
            Some(Patch::Replace(element.clone()))
        );
        assert_eq!(diff(&element, &text("a")), Some(Patch::Replace(text("a"))));
    }

    #[test]
    fn text_compares_by_value() {
        assert_eq!(diff(&text("a"), &text("a")), None);
        assert_eq!(diff(&text(1), &text(1)), None);
        assert_eq!(diff(&text("a"), &text("b")), Some(Patch::Replace(text("b"))));
        assert_eq!(diff(&text("1"), &text(1)), Some(Patch::Replace(text(1))));
    }

    #[test]
    fn tag_change_replaces() {
        let span = h("span", (), ());
        assert_eq!(
            diff(&h("div", (), ()), &span),
            Some(Patch::Replace(span.clone()))
        );
    }

    #[test]
    fn identical_description_yields_empty_update() {
        let node = h(
            "ul",
            [("class", "list")],
            (h("li", (), "a"), None::<Node>, h("li", [("id", "b")], "b")),
        );
        let update = update(diff(&node, &node));
        assert!(update.attrs.is_empty());
        assert_eq!(update.children.len(), 3);
        assert!(update.children[0].as_ref().is_some_and(Patch::is_noop));
        assert_eq!(update.children[1], Some(Patch::Create(Node::Absent)));
        assert!(update.children[2].as_ref().is_some_and(Patch::is_noop));
    }

    #[test]
    fn attribute_removal_is_a_single_change() {
        let update = update(diff(
            &h("div", [("id", "x"), ("class", "a")], ()),
            &h("div", [("class", "a")], ()),
        ));
        assert_eq!(update.attrs, vec![AttrChange::remove("id")]);
    }

    #[test]
    fn changed_keys_precede_removed_keys() {
        let update = update(diff(
            &h("a", [("href", "/"), ("title", "t"), ("rel", "x")], ()),
            &h("a", [("target", "_blank"), ("href", "/home"), ("rel", "x")], ()),
        ));
        assert_eq!(
            update.attrs,
            vec![
                AttrChange::set("target", "_blank".into()),
                AttrChange::set("href", "/home".into()),
                AttrChange::remove("title"),
            ]
        );
    }

    #[test]
    fn attribute_values_compare_strictly() {
        let update = update(diff(
            &h("input", [("value", AttrValue::from("1"))], ()),
            &h("input", [("value", AttrValue::from(1))], ()),
        ));
        assert_eq!(update.attrs, vec![AttrChange::set("value", AttrValue::Number(1.0))]);
    }

    #[test]
    fn handlers_are_rebound_only_when_identity_changes() {
        let handler = Handler::new(|_| {});
        let old = h("button", [("onClick", handler.clone())], ());
        let same = h("button", [("onClick", handler)], ());
        assert!(update(diff(&old, &same)).attrs.is_empty());

        let fresh = h("button", [("onClick", Handler::new(|_| {}))], ());
        assert_eq!(update(diff(&old, &fresh)).attrs.len(), 1);
    }

    #[test]
    fn equal_styles_produce_no_change() {
        let style = || {
            let mut style = StyleMap::new();
            style.insert("color".into(), "red".into());
            style
        };
        let update = update(diff(
            &h("p", [("style", style())], ()),
            &h("p", [("style", style())], ()),
        ));
        assert!(update.attrs.is_empty());
    }

    #[test]
    fn child_growth_creates_at_the_end() {
        let update = update(diff(
            &h("ul", (), text("a")),
            &h("ul", (), (text("a"), text("b"))),
        ));
        assert_eq!(update.children, vec![None, Some(Patch::Create(text("b")))]);
    }

    #[test]
    fn child_shrink_removes_at_the_end() {
        let update = update(diff(
            &h("ul", (), (text("a"), text("b"))),
            &h("ul", (), text("a")),
        ));
        assert_eq!(update.children, vec![None, Some(Patch::Remove)]);
    }

    #[test]
    fn middle_insertion_cascades_positionally() {
        let update = update(diff(
            &h("ul", (), (text("a"), text("c"))),
            &h("ul", (), (text("a"), text("b"), text("c"))),
        ));
        assert_eq!(
            update.children,
            vec![
                None,
                Some(Patch::Replace(text("b"))),
                Some(Patch::Create(text("c"))),
            ]
        );
    }
}
