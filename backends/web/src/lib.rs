#![allow(clippy::module_name_repetitions)]

//! Browser DOM backend for `Sprout`.
//!
//! [`WebDocument`] implements [`DisplayTree`](sprout_core::DisplayTree) over `web_sys`
//! nodes, [`DomEventBinder`] turns handler attributes into native listeners, and
//! [`ElementIdLookup`] resolves render targets by id or selector. [`WebMount`] wires the
//! three into a renderer bound to a root element.
//!
//! The crate only does useful work on `wasm32-unknown-unknown` inside a browser.

mod app;
mod dom;
mod error;
mod events;
mod lookup;

pub use app::{WebMount, WebMountBuilder};
pub use dom::{WeakNode, WebDocument};
pub use error::WebError;
pub use events::DomEventBinder;
pub use lookup::ElementIdLookup;

/// A renderer wired to the browser DOM.
pub type WebRenderer = sprout_core::Renderer<WebDocument, DomEventBinder>;
