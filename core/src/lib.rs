//! Core reconciliation engine for Sprout.
//!
//! A render cycle flows in one direction:
//!
//! 1. A [`Node`] tree description is built with [`h`] / [`build`].
//! 2. The [`diff`](diff::diff) function compares it with the previously rendered description and
//!    produces a [`Patch`].
//! 3. A [`RenderCtx`] applies the patch to a live display tree through the [`DisplayTree`] trait,
//!    materializing new nodes and binding attributes through the [`BindingPolicy`].
//! 4. The [`Renderer`] remembers the description per container in its [`MountCache`].
//!
//! Display trees are supplied by backends (`sprout-memory`, `sprout-web`).

#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod macros;

pub mod binding;
pub mod builder;
pub mod diff;
pub mod display;
pub mod error;
pub mod materialize;
pub mod mount;
pub mod node;
pub mod patch;
pub mod patcher;

pub use binding::{BindCtx, BindingConfig, BindingPolicy, BindingRule, EventBinder};
pub use builder::{IntoChildren, build, h, text};
pub use diff::diff;
pub use display::DisplayTree;
pub use error::{BindError, RenderError};
pub use materialize::RenderCtx;
pub use mount::{
    Component, ContainerLookup, MountCache, RenderOutcome, Renderer, RendererBuilder, Target,
};
pub use node::{AttrValue, Attrs, Element, Event, Handler, Node, Scalar, StyleMap};
pub use patch::{AttrChange, ElementUpdate, Patch, PatchStats};
