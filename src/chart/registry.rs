//! Named action and guard functions referenced by chart tables.

use crate::chart::error::ActionError;
use crate::core::{Context, EventData, Guard};
use crate::table::{ActionRef, GuardRef};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for chart action functions.
///
/// Actions may mutate the context in place. An `Err` aborts the rest of the
/// transition's action sequence.
pub type ActionFn = Arc<dyn Fn(&mut Context, &EventData) -> Result<(), ActionError> + Send + Sync>;

/// Lookup table from action/guard names to functions.
///
/// # Example
///
/// ```rust
/// use modechart::chart::Registry;
/// use modechart::core::{Context, EventData};
/// use serde_json::json;
///
/// let registry = Registry::new()
///     .with_infallible_action("set_active_layer", |ctx: &mut Context, data: &EventData| {
///         ctx.set("activeLayer", data.get("activeLayer").cloned().unwrap_or_default());
///     })
///     .with_guard("has_layer", |_: &Context, data: &EventData| data.get("activeLayer").is_some());
///
/// assert!(registry.has_action(&"set_active_layer".into()));
/// assert!(registry.has_guard(&"has_layer".into()));
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    actions: HashMap<ActionRef, ActionFn>,
    guards: HashMap<GuardRef, Guard>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallible action.
    pub fn with_action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Context, &EventData) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.insert_action(name, action);
        self
    }

    /// Register an action that cannot fail.
    pub fn with_infallible_action<F>(self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Context, &EventData) + Send + Sync + 'static,
    {
        self.with_action(name, move |ctx, data| {
            action(ctx, data);
            Ok(())
        })
    }

    /// Register a guard predicate.
    pub fn with_guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Context, &EventData) -> bool + Send + Sync + 'static,
    {
        self.insert_guard(name, Guard::new(predicate));
        self
    }

    pub fn insert_action<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&mut Context, &EventData) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.actions.insert(ActionRef::new(name), Arc::new(action));
    }

    pub fn insert_guard(&mut self, name: impl Into<String>, guard: Guard) {
        self.guards.insert(GuardRef::new(name), guard);
    }

    /// Merge another registry into this one. Entries in `other` win.
    pub fn merge(mut self, other: Registry) -> Self {
        self.actions.extend(other.actions);
        self.guards.extend(other.guards);
        self
    }

    pub fn action(&self, name: &ActionRef) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    pub fn guard(&self, name: &GuardRef) -> Option<&Guard> {
        self.guards.get(name)
    }

    pub fn has_action(&self, name: &ActionRef) -> bool {
        self.actions.contains_key(name)
    }

    pub fn has_guard(&self, name: &GuardRef) -> bool {
        self.guards.contains_key(name)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.actions.keys().map(ActionRef::name).collect();
        let mut guards: Vec<_> = self.guards.keys().map(GuardRef::name).collect();
        actions.sort_unstable();
        guards.sort_unstable();
        f.debug_struct("Registry")
            .field("actions", &actions)
            .field("guards", &guards)
            .finish()
    }
}
