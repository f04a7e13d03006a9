//! Guard predicates for controlling chart transitions.
//!
//! Guards are pure boolean functions over the machine's context and the
//! event payload. A transition whose guard returns `false` is not taken and
//! leaves the machine untouched.

use super::context::{Context, EventData};
use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use modechart::core::{Context, Guard};
/// use serde_json::json;
///
/// let has_layer = Guard::new(|_ctx: &Context, data: &serde_json::Value| {
///     data.get("activeLayer").is_some()
/// });
///
/// let ctx = Context::new();
/// assert!(has_layer.check(&ctx, &json!({ "activeLayer": "ui" })));
/// assert!(!has_layer.check(&ctx, &json!({})));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Context, &EventData) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context, &EventData) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, context: &Context, data: &EventData) -> bool {
        (self.predicate)(context, data)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
