use sprout_core::RenderError;

/// Error type produced by the web backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    #[error("DOM is not available")]
    DomUnavailable,
    /// The requested mounting node cannot be located.
    #[error("failed to find DOM element with id `{0}`")]
    RootNotFound(String),
    /// The node does not support the requested operation.
    #[error("{0:?} cannot {1}")]
    WrongNodeKind(String, &'static str),
    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        match value {
            WebError::Js(message) => Self::from(message),
            other => Self::from(other.to_string()),
        }
    }
}

impl From<WebError> for RenderError {
    fn from(value: WebError) -> Self {
        Self::display(value)
    }
}
