use sprout_core::ContainerLookup;
use web_sys::{Document, Node};

/// Finds render targets in a document.
///
/// A key is first tried as an element id (with any leading `#` stripped), then as a CSS
/// selector.
#[derive(Debug, Clone)]
pub struct ElementIdLookup {
    document: Document,
}

impl ElementIdLookup {
    /// Searches `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ContainerLookup<Node> for ElementIdLookup {
    fn find(&self, key: &str) -> Option<Node> {
        let id = key.strip_prefix('#').unwrap_or(key);
        self.document
            .get_element_by_id(id)
            .or_else(|| self.document.query_selector(key).ok().flatten())
            .map(Into::into)
    }
}
