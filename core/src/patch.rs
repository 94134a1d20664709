//! Patch values produced by the differ and consumed by the patcher.

use core::fmt;

use crate::node::{AttrValue, Node};

/// A change to one position of the display tree.
///
/// "Nothing to do" is not a variant: it is the `None` of an `Option<Patch>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// No node existed at this position; materialize the carried description.
    Create(Node),
    /// The position no longer holds a node.
    Remove,
    /// Swap the existing node for a freshly materialized one.
    Replace(Node),
    /// Same element tag on both sides; patch it in place.
    Update(ElementUpdate),
}

impl Patch {
    /// Short name of the variant, used in log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Remove => "remove",
            Self::Replace(_) => "replace",
            Self::Update(_) => "update",
        }
    }

    /// Returns `true` if applying the patch would not touch the display tree.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Update(update) => update.is_noop(),
            Self::Create(node) => node.is_absent(),
            Self::Remove | Self::Replace(_) => false,
        }
    }
}

/// The in-place changes for an element whose tag did not change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    /// Attribute changes: changed or new keys first, then removed keys.
    pub attrs: Vec<AttrChange>,
    /// One entry per child position, index-aligned with the longer child list.
    pub children: Vec<Option<Patch>>,
}

impl ElementUpdate {
    /// Returns `true` if neither the attributes nor any child change.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.attrs.is_empty()
            && self
                .children
                .iter()
                .all(|child| child.as_ref().is_none_or(Patch::is_noop))
    }
}

/// A single attribute change. `value == None` removes the attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrChange {
    /// The attribute key.
    pub key: String,
    /// The new value, or `None` to remove the attribute.
    pub value: Option<AttrValue>,
}

impl AttrChange {
    /// A change that sets `key` to `value`.
    #[must_use]
    pub fn set(key: impl Into<String>, value: AttrValue) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
        }
    }

    /// A change that removes `key`.
    #[must_use]
    pub fn remove(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Returns `true` if this change removes the attribute.
    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.value.is_none()
    }
}

/// Operation counts over a patch tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Number of CREATE patches that materialize a node.
    pub creates: usize,
    /// Number of REMOVE patches.
    pub removes: usize,
    /// Number of REPLACE patches.
    pub replaces: usize,
    /// Number of UPDATE patches.
    pub updates: usize,
    /// Number of attribute changes across all updates.
    pub attr_changes: usize,
}

impl PatchStats {
    /// Counts the operations in `patch` and all nested child patches.
    #[must_use]
    pub fn of(patch: Option<&Patch>) -> Self {
        let mut stats = Self::default();
        stats.visit(patch);
        stats
    }

    fn visit(&mut self, patch: Option<&Patch>) {
        match patch {
            None => {}
            Some(Patch::Create(node)) => {
                if !node.is_absent() {
                    self.creates += 1;
                }
            }
            Some(Patch::Remove) => self.removes += 1,
            Some(Patch::Replace(_)) => self.replaces += 1,
            Some(Patch::Update(update)) => {
                self.updates += 1;
                self.attr_changes += update.attrs.len();
                for child in &update.children {
                    self.visit(child.as_ref());
                }
            }
        }
    }

    /// Returns `true` if no structural or attribute change was counted.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.creates == 0 && self.removes == 0 && self.replaces == 0 && self.attr_changes == 0
    }
}

impl fmt::Display for PatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} removed, {} replaced, {} updated, {} attribute changes",
            self.creates, self.removes, self.replaces, self.updates, self.attr_changes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::text;

    #[test]
    fn stats_walk_nested_updates() {
        let patch = Patch::Update(ElementUpdate {
            attrs: vec![AttrChange::remove("id")],
            children: vec![
                None,
                Some(Patch::Update(ElementUpdate {
                    attrs: vec![AttrChange::set("class", "a".into())],
                    children: vec![Some(Patch::Remove)],
                })),
                Some(Patch::Create(text("x"))),
                Some(Patch::Create(Node::Absent)),
            ],
        });
        let stats = PatchStats::of(Some(&patch));
        assert_eq!(
            stats,
            PatchStats {
                creates: 1,
                removes: 1,
                replaces: 0,
                updates: 2,
                attr_changes: 2,
            }
        );
        assert!(!stats.is_clean());
    }

    #[test]
    fn empty_update_is_noop() {
        let patch = Patch::Update(ElementUpdate {
            attrs: Vec::new(),
            children: vec![None, Some(Patch::Update(ElementUpdate::default()))],
        });
        assert!(patch.is_noop());
        assert!(!Patch::Remove.is_noop());
    }
}
