#![allow(clippy::module_name_repetitions)]

//! In-memory display tree for `Sprout`.
//!
//! [`MemoryDocument`] implements [`DisplayTree`](sprout_core::DisplayTree) over
//! reference-counted [`MemoryNode`]s, and [`EventRegistry`] implements the event-binding
//! collaborator with synchronous dispatch. Together they run the whole engine without a
//! browser, which is what the test suites use.
//!
//! ```
//! use sprout_core::{h, Renderer, Target};
//! use sprout_memory::{EventRegistry, MemoryDocument, MemoryNode};
//!
//! let root = MemoryNode::element("main");
//! let mut renderer = Renderer::new(MemoryDocument::new(), EventRegistry::new());
//! renderer
//!     .mount(Target::node(root.clone()), h("p", [("class", "greeting")], "hello"))
//!     .expect("render");
//! assert_eq!(root.to_markup(), r#"<main><p class="greeting">hello</p></main>"#);
//! ```

mod document;
mod events;
mod markup;
mod node;

pub use document::{IdLookup, MemoryDocument};
pub use events::EventRegistry;
pub use node::{MemoryNode, WeakMemoryNode};

/// A renderer wired to the in-memory backend.
pub type MemoryRenderer = sprout_core::Renderer<MemoryDocument, EventRegistry>;
