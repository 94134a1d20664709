//! Attribute-binding policy shared by materialization and patching.
//!
//! The policy is an ordered table of [`BindingRule`]s. For each attribute, the first rule
//! whose predicate matches performs the binding. The default table, in priority order:
//!
//! | rule        | matches                                            | action                         |
//! |-------------|----------------------------------------------------|--------------------------------|
//! | `event`     | key has the event prefix, value is a handler       | [`EventBinder::bind`]          |
//! | `remove`    | value is the absent sentinel                       | remove property or attribute   |
//! | `class`     | key is a class synonym                             | set the `class` attribute      |
//! | `style`     | key is the style key, value is a style mapping     | merge style properties         |
//! | `property`  | key is a live property                             | set a live property            |
//! | `attribute` | anything else                                      | set a string attribute         |

use core::fmt;

use crate::display::DisplayTree;
use crate::error::{BindError, RenderError};
use crate::node::{AttrValue, Handler};

/// The event-binding collaborator.
///
/// Binding the same `(node, event)` twice registers a second handler; it must not replace
/// the first one. The binder owns the native listener lifecycle.
pub trait EventBinder<N> {
    /// Registers `handler` for `event` on `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be attached.
    fn bind(&mut self, node: &N, event: &str, handler: Handler) -> Result<(), BindError>;
}

/// Key conventions used by the default rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BindingConfig {
    /// Prefix that marks event-handler keys, `on` by default.
    pub event_prefix: String,
    /// Keys that denote the CSS class attribute.
    pub class_keys: Vec<String>,
    /// Key that denotes the inline style mapping.
    pub style_key: String,
    /// Keys assigned as live properties rather than attributes.
    pub live_properties: Vec<String>,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            event_prefix: "on".to_owned(),
            class_keys: vec!["class".to_owned(), "className".to_owned()],
            style_key: "style".to_owned(),
            live_properties: ["checked", "disabled", "selected", "value"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl BindingConfig {
    /// Returns the lowercased event name if `key` carries the event prefix.
    #[must_use]
    pub fn event_name(&self, key: &str) -> Option<String> {
        key.strip_prefix(self.event_prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns `true` if `key` is one of the class synonyms.
    #[must_use]
    pub fn is_class_key(&self, key: &str) -> bool {
        self.class_keys.iter().any(|class| class == key)
    }

    /// Returns `true` if `key` is the style key.
    #[must_use]
    pub fn is_style_key(&self, key: &str) -> bool {
        self.style_key == key
    }

    /// Returns `true` if `key` is bound as a live property.
    #[must_use]
    pub fn is_live_property(&self, key: &str) -> bool {
        self.live_properties.iter().any(|property| property == key)
    }
}

/// Everything a rule action may touch while binding one attribute.
pub struct BindCtx<'a, D: DisplayTree> {
    /// The display tree.
    pub tree: &'a D,
    /// The event-binding collaborator.
    pub binder: &'a mut dyn EventBinder<D::Node>,
    /// The node being bound.
    pub node: &'a D::Node,
    /// Key conventions.
    pub config: &'a BindingConfig,
}

impl<D: DisplayTree> fmt::Debug for BindCtx<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindCtx")
            .field("node", self.node)
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

type Predicate = Box<dyn Fn(&BindingConfig, &str, Option<&AttrValue>) -> bool>;
type Action<D> =
    Box<dyn Fn(&mut BindCtx<'_, D>, &str, Option<&AttrValue>) -> Result<(), RenderError>>;

/// One `(predicate, action)` entry of the binding table.
pub struct BindingRule<D: DisplayTree> {
    name: &'static str,
    predicate: Predicate,
    action: Action<D>,
}

impl<D: DisplayTree> BindingRule<D> {
    /// Creates a rule. `value == None` means the attribute is being removed.
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&BindingConfig, &str, Option<&AttrValue>) -> bool + 'static,
        action: impl Fn(&mut BindCtx<'_, D>, &str, Option<&AttrValue>) -> Result<(), RenderError>
        + 'static,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
            action: Box::new(action),
        }
    }

    /// The rule's name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the rule handles this attribute.
    #[must_use]
    pub fn matches(&self, config: &BindingConfig, key: &str, value: Option<&AttrValue>) -> bool {
        (self.predicate)(config, key, value)
    }

    /// Applies the rule.
    ///
    /// # Errors
    ///
    /// Propagates display-tree and binder failures.
    pub fn apply(
        &self,
        ctx: &mut BindCtx<'_, D>,
        key: &str,
        value: Option<&AttrValue>,
    ) -> Result<(), RenderError> {
        (self.action)(ctx, key, value)
    }
}

impl<D: DisplayTree> fmt::Debug for BindingRule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingRule({})", self.name)
    }
}

/// The ordered rule table plus its key conventions.
pub struct BindingPolicy<D: DisplayTree> {
    config: BindingConfig,
    rules: Vec<BindingRule<D>>,
}

impl<D: DisplayTree> Default for BindingPolicy<D> {
    fn default() -> Self {
        Self::new(BindingConfig::default())
    }
}

impl<D: DisplayTree> fmt::Debug for BindingPolicy<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingPolicy")
            .field("config", &self.config)
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl<D: DisplayTree> BindingPolicy<D> {
    /// Creates a policy with the default rule table.
    #[must_use]
    pub fn new(config: BindingConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Creates a policy without any rules.
    #[must_use]
    pub const fn empty(config: BindingConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    /// Returns the key conventions.
    #[must_use]
    pub const fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Adds a rule with the lowest priority.
    pub fn push(&mut self, rule: BindingRule<D>) {
        self.rules.push(rule);
    }

    /// Adds a rule at `priority`; `0` is evaluated first. Priorities past the end append.
    pub fn insert(&mut self, priority: usize, rule: BindingRule<D>) {
        let priority = priority.min(self.rules.len());
        self.rules.insert(priority, rule);
    }

    /// Names of the rules in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(BindingRule::name).collect()
    }

    /// Finds the rule that would handle this attribute.
    #[must_use]
    pub fn resolve(&self, key: &str, value: Option<&AttrValue>) -> Option<&BindingRule<D>> {
        self.rules
            .iter()
            .find(|rule| rule.matches(&self.config, key, value))
    }

    /// Binds one attribute onto `node`. Attributes no rule matches are skipped.
    ///
    /// # Errors
    ///
    /// Propagates display-tree and binder failures.
    pub fn bind(
        &self,
        tree: &D,
        binder: &mut dyn EventBinder<D::Node>,
        node: &D::Node,
        key: &str,
        value: Option<&AttrValue>,
    ) -> Result<(), RenderError> {
        let Some(rule) = self.resolve(key, value) else {
            tracing::trace!(key, "no binding rule matched; attribute skipped");
            return Ok(());
        };
        tracing::trace!(key, rule = rule.name(), "binding attribute");
        let mut ctx = BindCtx {
            tree,
            binder,
            node,
            config: &self.config,
        };
        rule.apply(&mut ctx, key, value)
    }
}

fn default_rules<D: DisplayTree>() -> Vec<BindingRule<D>> {
    vec![
        BindingRule::new(
            "event",
            |config, key, value| {
                value.and_then(AttrValue::as_handler).is_some() && config.event_name(key).is_some()
            },
            bind_event::<D>,
        ),
        BindingRule::new(
            "remove",
            |_, _, value| value.is_none(),
            remove_binding::<D>,
        ),
        BindingRule::new(
            "class",
            |config, key, _| config.is_class_key(key),
            |ctx: &mut BindCtx<'_, D>, _, value| match value {
                Some(value) => {
                    ctx.tree
                        .set_attribute(ctx.node, "class", &value.to_attribute_string())
                }
                None => ctx.tree.remove_attribute(ctx.node, "class"),
            },
        ),
        BindingRule::new(
            "style",
            |config, key, value| {
                config.is_style_key(key) && value.and_then(AttrValue::as_style).is_some()
            },
            |ctx: &mut BindCtx<'_, D>, _, value| {
                let Some(style) = value.and_then(AttrValue::as_style) else {
                    return Ok(());
                };
                for (property, value) in style {
                    ctx.tree.set_style(ctx.node, property, value)?;
                }
                Ok(())
            },
        ),
        BindingRule::new(
            "property",
            |config, key, _| config.is_live_property(key),
            |ctx: &mut BindCtx<'_, D>, key, value| match value {
                Some(value) => ctx.tree.set_property(ctx.node, key, value),
                None => ctx.tree.remove_property(ctx.node, key),
            },
        ),
        BindingRule::new(
            "attribute",
            |_, _, _| true,
            |ctx: &mut BindCtx<'_, D>, key, value| match value {
                Some(value) => ctx
                    .tree
                    .set_attribute(ctx.node, key, &value.to_attribute_string()),
                None => ctx.tree.remove_attribute(ctx.node, key),
            },
        ),
    ]
}

fn bind_event<D: DisplayTree>(
    ctx: &mut BindCtx<'_, D>,
    key: &str,
    value: Option<&AttrValue>,
) -> Result<(), RenderError> {
    let (Some(event), Some(handler)) = (
        ctx.config.event_name(key),
        value.and_then(AttrValue::as_handler),
    ) else {
        return Ok(());
    };
    ctx.binder
        .bind(ctx.node, &event, handler.clone())
        .map_err(|source| RenderError::Binding {
            key: key.to_owned(),
            source,
        })
}

fn remove_binding<D: DisplayTree>(
    ctx: &mut BindCtx<'_, D>,
    key: &str,
    _value: Option<&AttrValue>,
) -> Result<(), RenderError> {
    if ctx.config.is_live_property(key) {
        ctx.tree.remove_property(ctx.node, key)
    } else if ctx.config.is_class_key(key) {
        ctx.tree.remove_attribute(ctx.node, "class")
    } else {
        ctx.tree.remove_attribute(ctx.node, key)
    }
}
