//! Error types for rendering.

use thiserror::Error;

/// Failure reported by an [`EventBinder`](crate::EventBinder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BindError(String);

impl BindError {
    /// Creates a new bind error with a human readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors produced while materializing or patching a display tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An update addressed a position that holds no display node.
    ///
    /// The mount cache no longer matches the live display tree.
    #[error("no display node at child index {index} to update; the mount cache is out of sync")]
    StructuralMismatch {
        /// The child index that was addressed.
        index: usize,
    },
    /// The display tree backend rejected an operation.
    #[error("display tree operation failed: {0}")]
    Display(String),
    /// The event binder failed to attach a handler.
    #[error("failed to bind `{key}`")]
    Binding {
        /// The attribute key that carried the handler.
        key: String,
        /// The binder's error.
        #[source]
        source: BindError,
    },
}

impl RenderError {
    /// Creates a [`RenderError::Display`] from any displayable backend error.
    pub fn display(error: impl core::fmt::Display) -> Self {
        Self::Display(error.to_string())
    }

    /// Returns `true` for errors that must abort the whole render instead of a single sibling.
    #[must_use]
    pub const fn is_binding(&self) -> bool {
        matches!(self, Self::Binding { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn structural_mismatch_display() {
        let error = RenderError::StructuralMismatch { index: 2 };
        assert_eq!(
            error.to_string(),
            "no display node at child index 2 to update; the mount cache is out of sync"
        );
    }

    #[test]
    fn binding_error_keeps_its_source() {
        let error = RenderError::Binding {
            key: "onClick".into(),
            source: BindError::new("listener rejected"),
        };
        assert!(error.is_binding());
        assert_eq!(error.to_string(), "failed to bind `onClick`");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("listener rejected")
        );
    }
}
