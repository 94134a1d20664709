//! Applies patches to a live display tree.
//!
//! Child patches of an update are walked once, left to right, with a cursor into the display
//! children. A CREATE always addresses a slot that rendered nothing before (its old child was
//! absent or out of range), so it inserts at the cursor. A REMOVE detaches the node at the
//! cursor without moving it. REPLACE, UPDATE and "no change" each consume one display node.
//! This keeps positions right when removals and insertions interleave, and when absent
//! description slots occupy no display position.

use crate::display::DisplayTree;
use crate::error::RenderError;
use crate::materialize::RenderCtx;
use crate::patch::{ElementUpdate, Patch};

impl<D: DisplayTree> RenderCtx<'_, D> {
    /// Applies `patch` to the display child of `parent` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::StructuralMismatch`] if an update finds no display node at
    /// `index`, and propagates display-tree and binder failures.
    pub fn apply(
        &mut self,
        parent: &D::Node,
        patch: Option<&Patch>,
        index: usize,
    ) -> Result<(), RenderError> {
        let Some(patch) = patch else {
            return Ok(());
        };
        let tree = self.tree();
        let existing = tree.child_at(parent, index);
        tracing::trace!(index, op = patch.kind(), "applying patch");

        match patch {
            Patch::Create(node) => {
                if let Some(created) = self.materialize(node)? {
                    tree.insert_child(parent, &created, index)?;
                }
            }
            Patch::Remove => {
                if let Some(child) = existing {
                    tree.remove_child(parent, &child)?;
                }
            }
            Patch::Replace(node) => match (existing, self.materialize(node)?) {
                (Some(old), Some(new)) => tree.replace_child(parent, &new, &old)?,
                (None, Some(new)) => tree.append_child(parent, &new)?,
                (Some(old), None) => tree.remove_child(parent, &old)?,
                (None, None) => {}
            },
            Patch::Update(update) => {
                let child = existing.ok_or(RenderError::StructuralMismatch { index })?;
                self.apply_update(&child, update)?;
            }
        }
        Ok(())
    }

    fn apply_update(&mut self, node: &D::Node, update: &ElementUpdate) -> Result<(), RenderError> {
        for change in &update.attrs {
            self.bind_attribute(node, &change.key, change.value.as_ref())?;
        }
        self.apply_children(node, &update.children)
    }

    /// Siblings are patched independently: a failing child is logged and skipped, and the
    /// first such error is returned after the walk. Binder errors abort immediately.
    fn apply_children(
        &mut self,
        node: &D::Node,
        children: &[Option<Patch>],
    ) -> Result<(), RenderError> {
        let mut cursor = 0;
        let mut first_error = None;

        for (slot, patch) in children.iter().enumerate() {
            let consumed = match patch {
                None | Some(Patch::Update(_)) => 1,
                Some(Patch::Create(description) | Patch::Replace(description)) => {
                    usize::from(!description.is_absent())
                }
                Some(Patch::Remove) => 0,
            };

            match self.apply(node, patch.as_ref(), cursor) {
                Ok(()) => cursor += consumed,
                Err(error) if error.is_binding() => return Err(error),
                Err(error) => {
                    tracing::error!(slot, cursor, %error, "child patch failed; continuing with siblings");
                    // A failed CREATE inserted nothing, so it occupies no display position.
                    if !matches!(patch, Some(Patch::Create(_))) {
                        cursor += consumed;
                    }
                    first_error.get_or_insert(error);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
