#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

#[doc(inline)]
pub use sprout_core::*;

/// The in-memory backend.
#[cfg(feature = "memory")]
pub use sprout_memory as memory;

/// The browser DOM backend.
#[cfg(feature = "web")]
pub use sprout_web as web;

pub mod prelude {
    //! The names needed to describe and render a tree.
    //!
    //! ```
    //! use sprout::prelude::*;
    //!
    //! let card = h("div", attrs! { "class" => "card" }, (h("h2", (), "Title"), text(3)));
    //! assert!(diff(&card, &card).is_none());
    //! ```

    pub use sprout_core::{
        AttrValue, Attrs, BindingConfig, Component, DisplayTree, Event, EventBinder, Handler,
        Node, Patch, RenderError, RenderOutcome, Renderer, StyleMap, Target, attrs, diff, h,
        text,
    };

    #[cfg(feature = "memory")]
    pub use sprout_memory::{EventRegistry, MemoryDocument, MemoryNode, MemoryRenderer};

    #[cfg(feature = "web")]
    pub use sprout_web::{WebMount, WebMountBuilder};
}
