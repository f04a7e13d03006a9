//! Chart engine: guarded transitions, ordered entry/exit actions and a
//! per-instance context.
//!
//! A [`Chart`] bundles a validated transition table, the registry of
//! functions its actions and guards refer to, and the initial context. It
//! is immutable and meant to be shared behind an `Arc`; each
//! [`StateMachine`] built from it owns its own state and context.
//!
//! # Example
//!
//! ```rust
//! use modechart::builder::{ChartBuilder, StateBuilder, TransitionBuilder};
//! use modechart::chart::{Registry, StateMachine};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Registry::new().with_infallible_action("set_layer", |ctx, data| {
//!     ctx.set("activeLayer", data["activeLayer"].clone());
//! });
//!
//! let chart = ChartBuilder::new("runtime")
//!     .initial("idle")
//!     .context(json!({ "activeLayer": null }))
//!     .state(StateBuilder::new("idle").on("ACTIVATE", TransitionBuilder::to("active").action("set_layer")))
//!     .state(StateBuilder::new("active"))
//!     .registry(registry)
//!     .build()
//!     .unwrap();
//!
//! let mut machine = StateMachine::new(Arc::new(chart));
//! machine.send("ACTIVATE", json!({ "activeLayer": "ui" })).unwrap();
//! assert_eq!(machine.state(), "active");
//! assert_eq!(machine.context().get_str("activeLayer"), Some("ui"));
//! ```

mod error;
mod machine;
mod registry;

pub use error::{ActionError, ChartError, Outcome};
pub use machine::StateMachine;
pub use registry::{ActionFn, Registry};

use crate::builder::BuildError;
use crate::core::{Context, StateId, DEFAULT_HISTORY_LIMIT};
use crate::table::{into_result, validate_table, Transition, TransitionTable};
use serde::Deserialize;

/// Serialized chart layout: a transition table plus its initial context.
#[derive(Deserialize)]
struct ChartDocument {
    #[serde(flatten)]
    table: TransitionTable<Transition>,
    #[serde(default)]
    context: Context,
}

/// Immutable chart definition shared by all of its machines.
#[derive(Debug)]
pub struct Chart {
    name: String,
    table: TransitionTable<Transition>,
    registry: Registry,
    initial_context: Context,
    history_limit: usize,
}

impl Chart {
    /// Validate and assemble a chart.
    ///
    /// Fails with every table problem found: missing initial state, undefined
    /// targets, and action/guard names absent from `registry`.
    pub fn new(
        name: impl Into<String>,
        table: TransitionTable<Transition>,
        registry: Registry,
        initial_context: Context,
    ) -> Result<Self, BuildError> {
        let validation = validate_table(
            &table,
            |action| registry.has_action(action),
            |guard| registry.has_guard(guard),
        );
        into_result(validation).map_err(BuildError::Invalid)?;

        Ok(Self {
            name: name.into(),
            table,
            registry,
            initial_context,
            history_limit: DEFAULT_HISTORY_LIMIT,
        })
    }

    /// Load a chart from JSON: `{ "initial", "context"?, "states" }`.
    pub fn from_json(
        name: impl Into<String>,
        json: &str,
        registry: Registry,
    ) -> Result<Self, BuildError> {
        let document: ChartDocument = serde_json::from_str(json)?;
        Self::new(name, document.table, registry, document.context)
    }

    /// Set how many transitions each machine keeps in its history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial(&self) -> &StateId {
        self.table.initial()
    }

    pub fn table(&self) -> &TransitionTable<Transition> {
        &self.table
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn initial_context(&self) -> &Context {
        &self.initial_context
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableError;
    use serde_json::json;
    use std::sync::Arc;

    const RUNTIME_JSON: &str = r#"{
        "initial": "idle",
        "context": { "operationCount": 0, "activeLayer": null },
        "states": {
            "idle": {
                "on": { "ACTIVATE": { "target": "active", "actions": ["set_active_layer"] } }
            },
            "active": {
                "on": { "PAUSE": { "target": "paused" } }
            },
            "paused": {
                "on": { "RESUME": { "target": "active" } }
            }
        }
    }"#;

    fn registry() -> Registry {
        Registry::new().with_infallible_action("set_active_layer", |ctx, data| {
            ctx.set("activeLayer", data["activeLayer"].clone());
        })
    }

    #[test]
    fn chart_loads_from_json() {
        let chart = Chart::from_json("runtime", RUNTIME_JSON, registry()).unwrap();

        assert_eq!(chart.name(), "runtime");
        assert_eq!(chart.initial(), "idle");
        assert_eq!(chart.initial_context().get_i64("operationCount"), Some(0));
        assert_eq!(chart.table().len(), 3);
    }

    #[test]
    fn json_chart_runs() {
        let chart = Arc::new(Chart::from_json("runtime", RUNTIME_JSON, registry()).unwrap());
        let mut machine = StateMachine::new(chart);

        machine.send("ACTIVATE", json!({ "activeLayer": "ui" })).unwrap();
        machine.send("PAUSE", json!(null)).unwrap();
        machine.send("RESUME", json!(null)).unwrap();

        assert_eq!(machine.state(), "active");
        assert_eq!(machine.context().get_str("activeLayer"), Some("ui"));
    }

    #[test]
    fn unregistered_action_is_rejected() {
        let result = Chart::from_json("runtime", RUNTIME_JSON, Registry::new());

        match result {
            Err(BuildError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(errors[0], TableError::UnknownAction { .. }));
            }
            other => panic!("Expected invalid chart, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = Chart::from_json("broken", "{ not json", Registry::new());
        assert!(matches!(result, Err(BuildError::Parse(_))));
    }

    #[test]
    fn history_limit_propagates_to_machines() {
        let chart = Chart::from_json("runtime", RUNTIME_JSON, registry())
            .unwrap()
            .with_history_limit(1);
        let mut machine = StateMachine::new(Arc::new(chart));

        machine.send("ACTIVATE", json!({ "activeLayer": "ui" })).unwrap();
        machine.send("PAUSE", json!(null)).unwrap();

        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.history().transitions()[0].to, "paused");
    }
}
