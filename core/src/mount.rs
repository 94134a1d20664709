//! Mount coordination: first render versus re-render, and the per-container cache.

use core::fmt;

use crate::binding::{BindingConfig, BindingPolicy, BindingRule, EventBinder};
use crate::diff::diff;
use crate::display::DisplayTree;
use crate::error::RenderError;
use crate::materialize::RenderCtx;
use crate::node::Node;
use crate::patch::PatchStats;

/// Where to render.
#[derive(Debug, Clone)]
pub enum Target<N> {
    /// An already resolved container node.
    Node(N),
    /// A key resolved by the renderer's [`ContainerLookup`].
    Lookup(String),
}

impl<N> Target<N> {
    /// Targets a resolved container.
    pub const fn node(node: N) -> Self {
        Self::Node(node)
    }

    /// Targets a container found through the lookup collaborator.
    pub fn lookup(key: impl Into<String>) -> Self {
        Self::Lookup(key.into())
    }
}

impl<N> From<&str> for Target<N> {
    fn from(key: &str) -> Self {
        Self::Lookup(key.to_owned())
    }
}

impl<N> From<String> for Target<N> {
    fn from(key: String) -> Self {
        Self::Lookup(key)
    }
}

/// Resolves lookup keys to container nodes.
pub trait ContainerLookup<N> {
    /// Finds the container for `key`.
    fn find(&self, key: &str) -> Option<N>;
}

impl<N, F> ContainerLookup<N> for F
where
    F: Fn(&str) -> Option<N>,
{
    fn find(&self, key: &str) -> Option<N> {
        self(key)
    }
}

/// Something that produces a tree description: a description itself, or a zero-argument
/// closure returning one.
pub trait Component {
    /// Produces the description to render.
    fn into_node(self) -> Node;
}

impl Component for Node {
    fn into_node(self) -> Node {
        self
    }
}

impl<F> Component for F
where
    F: FnOnce() -> Node,
{
    fn into_node(self) -> Node {
        self()
    }
}

/// What a call to [`Renderer::mount`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// First render into the container: its content was replaced wholesale.
    Mounted,
    /// Re-render: the cached description was diffed and the patch applied.
    Patched(PatchStats),
    /// The target could not be resolved; nothing was rendered.
    Skipped,
}

struct MountEntry<D: DisplayTree> {
    container: D::Weak,
    description: Node,
}

/// Per-container record of the last rendered description.
///
/// Containers are held weakly and matched by identity, so the cache never keeps a container
/// alive. Entries whose container is gone are pruned on every write.
pub struct MountCache<D: DisplayTree> {
    entries: Vec<MountEntry<D>>,
}

impl<D: DisplayTree> Default for MountCache<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DisplayTree> fmt::Debug for MountCache<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.container))
            .finish()
    }
}

impl<D: DisplayTree> MountCache<D> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, tree: &D, container: &D::Node) -> Option<usize> {
        self.entries.iter().position(|entry| {
            tree.upgrade(&entry.container)
                .is_some_and(|live| tree.same_node(&live, container))
        })
    }

    /// Returns the description last rendered into `container`.
    #[must_use]
    pub fn get(&self, tree: &D, container: &D::Node) -> Option<&Node> {
        self.position(tree, container)
            .map(|index| &self.entries[index].description)
    }

    /// Records `description` as the latest render into `container`.
    pub fn insert(&mut self, tree: &D, container: &D::Node, description: Node) {
        self.prune(tree);
        if let Some(index) = self.position(tree, container) {
            self.entries[index].description = description;
        } else {
            self.entries.push(MountEntry {
                container: tree.downgrade(container),
                description,
            });
        }
    }

    /// Drops the entry for `container`, returning its description.
    pub fn remove(&mut self, tree: &D, container: &D::Node) -> Option<Node> {
        self.position(tree, container)
            .map(|index| self.entries.swap_remove(index).description)
    }

    /// Drops entries whose container no longer exists. Returns how many were dropped.
    pub fn prune(&mut self, tree: &D) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| tree.upgrade(&entry.container).is_some());
        before - self.entries.len()
    }

    /// Number of entries, including ones whose container may already be gone.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The mount coordinator: owns the display tree handle, the event binder, the binding policy
/// and the mount cache.
///
/// Rendering takes `&mut self`, so a render cannot re-enter another render on the same
/// renderer.
pub struct Renderer<D: DisplayTree, B> {
    tree: D,
    binder: B,
    policy: BindingPolicy<D>,
    lookup: Option<Box<dyn ContainerLookup<D::Node>>>,
    cache: MountCache<D>,
}

impl<D: DisplayTree + fmt::Debug, B: fmt::Debug> fmt::Debug for Renderer<D, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("tree", &self.tree)
            .field("binder", &self.binder)
            .field("policy", &self.policy)
            .field("lookup", &self.lookup.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}

impl<D, B> Renderer<D, B>
where
    D: DisplayTree,
    B: EventBinder<D::Node>,
{
    /// Creates a renderer with the default binding policy and no container lookup.
    pub fn new(tree: D, binder: B) -> Self {
        Self::builder(tree, binder).build()
    }

    /// Starts configuring a renderer.
    pub fn builder(tree: D, binder: B) -> RendererBuilder<D, B> {
        RendererBuilder::new(tree, binder)
    }

    /// Returns the display tree.
    pub const fn tree(&self) -> &D {
        &self.tree
    }

    /// Returns the event binder.
    pub const fn binder(&self) -> &B {
        &self.binder
    }

    /// Returns the event binder mutably.
    pub const fn binder_mut(&mut self) -> &mut B {
        &mut self.binder
    }

    /// Returns the binding policy.
    pub const fn policy(&self) -> &BindingPolicy<D> {
        &self.policy
    }

    /// Returns the mount cache.
    pub const fn cache(&self) -> &MountCache<D> {
        &self.cache
    }

    /// Returns the description last rendered into `container`.
    pub fn cached(&self, container: &D::Node) -> Option<&Node> {
        self.cache.get(&self.tree, container)
    }

    /// Forgets `container`, so the next mount into it re-materializes from scratch.
    pub fn forget(&mut self, container: &D::Node) -> Option<Node> {
        self.cache.remove(&self.tree, container)
    }

    /// Renders `description` into `target`.
    ///
    /// The first render into a container clears it and materializes the description. Later
    /// renders diff against the cached description and patch the display tree in place.
    /// If the target cannot be resolved, a warning is logged and the render is skipped.
    ///
    /// # Errors
    ///
    /// Returns the first display-tree, binder or structural error. The cache entry for the
    /// container is dropped then, so the next mount starts over with a full materialization.
    pub fn mount(
        &mut self,
        target: impl Into<Target<D::Node>>,
        description: Node,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(container) = self.resolve(target.into()) else {
            return Ok(RenderOutcome::Skipped);
        };

        let result = self.reconcile(&container, &description);
        match &result {
            Ok(_) => self.cache.insert(&self.tree, &container, description),
            Err(error) => {
                tracing::error!(?container, %error, "render failed; dropping cached description");
                self.cache.remove(&self.tree, &container);
            }
        }
        result
    }

    /// Produces a description from `component` and mounts it into `target`.
    ///
    /// # Errors
    ///
    /// See [`Renderer::mount`].
    pub fn render(
        &mut self,
        component: impl Component,
        target: impl Into<Target<D::Node>>,
    ) -> Result<RenderOutcome, RenderError> {
        self.mount(target, component.into_node())
    }

    fn resolve(&self, target: Target<D::Node>) -> Option<D::Node> {
        match target {
            Target::Node(node) => Some(node),
            Target::Lookup(key) => {
                let found = self.lookup.as_ref().and_then(|lookup| lookup.find(&key));
                if found.is_none() {
                    tracing::warn!(key = key.as_str(), "render target not found; skipping render");
                }
                found
            }
        }
    }

    fn reconcile(
        &mut self,
        container: &D::Node,
        description: &Node,
    ) -> Result<RenderOutcome, RenderError> {
        let mut ctx = RenderCtx::new(&self.tree, &mut self.binder, &self.policy);

        if let Some(cached) = self.cache.get(&self.tree, container) {
            let patch = diff(cached, description);
            let stats = PatchStats::of(patch.as_ref());
            tracing::debug!(?container, %stats, "re-render");
            ctx.apply(container, patch.as_ref(), 0)?;
            Ok(RenderOutcome::Patched(stats))
        } else {
            tracing::debug!(?container, "first render");
            self.tree.clear(container)?;
            if let Some(root) = ctx.materialize(description)? {
                self.tree.append_child(container, &root)?;
            }
            Ok(RenderOutcome::Mounted)
        }
    }
}

/// Builder for [`Renderer`].
pub struct RendererBuilder<D: DisplayTree, B> {
    tree: D,
    binder: B,
    config: BindingConfig,
    rules: Vec<(usize, BindingRule<D>)>,
    lookup: Option<Box<dyn ContainerLookup<D::Node>>>,
}

impl<D: DisplayTree, B> fmt::Debug for RendererBuilder<D, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererBuilder")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("lookup", &self.lookup.is_some())
            .finish_non_exhaustive()
    }
}

impl<D, B> RendererBuilder<D, B>
where
    D: DisplayTree,
    B: EventBinder<D::Node>,
{
    /// Creates a builder with the default configuration.
    pub fn new(tree: D, binder: B) -> Self {
        Self {
            tree,
            binder,
            config: BindingConfig::default(),
            rules: Vec::new(),
            lookup: None,
        }
    }

    /// Replaces the binding conventions.
    #[must_use]
    pub fn with_config(mut self, config: BindingConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the prefix that marks event-handler keys.
    #[must_use]
    pub fn with_event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.event_prefix = prefix.into();
        self
    }

    /// Adds a key that is assigned as a live property.
    #[must_use]
    pub fn with_live_property(mut self, key: impl Into<String>) -> Self {
        self.config.live_properties.push(key.into());
        self
    }

    /// Adds a binding rule ahead of the default rules.
    #[must_use]
    pub fn with_rule(self, rule: BindingRule<D>) -> Self {
        self.with_rule_at(0, rule)
    }

    /// Adds a binding rule at `priority` in the final table; `0` is evaluated first.
    #[must_use]
    pub fn with_rule_at(mut self, priority: usize, rule: BindingRule<D>) -> Self {
        self.rules.push((priority, rule));
        self
    }

    /// Sets the collaborator that resolves [`Target::Lookup`] keys.
    #[must_use]
    pub fn with_lookup(mut self, lookup: impl ContainerLookup<D::Node> + 'static) -> Self {
        self.lookup = Some(Box::new(lookup));
        self
    }

    /// Finalises the builder.
    pub fn build(self) -> Renderer<D, B> {
        let mut policy = BindingPolicy::new(self.config);
        for (priority, rule) in self.rules {
            policy.insert(priority, rule);
        }
        Renderer {
            tree: self.tree,
            binder: self.binder,
            policy,
            lookup: self.lookup,
            cache: MountCache::new(),
        }
    }
}
