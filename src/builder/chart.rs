//! Builder for constructing charts.

use crate::builder::error::BuildError;
use crate::builder::state::{assemble_table, StateBuilder};
use crate::chart::{ActionError, Chart, Registry};
use crate::core::{Context, EventData, StateId};
use crate::table::Transition;
use serde_json::Value;

/// Builder for constructing charts with a fluent API.
pub struct ChartBuilder {
    name: String,
    initial: Option<StateId>,
    context: Context,
    states: Vec<StateBuilder<Transition>>,
    registry: Registry,
    history_limit: Option<usize>,
}

impl ChartBuilder {
    /// Create a new builder for a chart called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            context: Context::new(),
            states: Vec::new(),
            registry: Registry::new(),
            history_limit: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Set the initial context from a JSON object.
    pub fn context(mut self, context: Value) -> Self {
        self.context = Context::from_value(context);
        self
    }

    /// Add a state.
    pub fn state(mut self, state: StateBuilder<Transition>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = StateBuilder<Transition>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Merge a registry of actions and guards.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = self.registry.merge(registry);
        self
    }

    /// Register a single fallible action.
    pub fn action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Context, &EventData) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.registry.insert_action(name, action);
        self
    }

    /// Register a single guard.
    pub fn guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Context, &EventData) -> bool + Send + Sync + 'static,
    {
        self.registry = self.registry.with_guard(name, predicate);
        self
    }

    /// Cap the history kept by each machine.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build and validate the chart.
    pub fn build(self) -> Result<Chart, BuildError> {
        let table = assemble_table(self.initial, self.states)?;
        let chart = Chart::new(self.name, table, self.registry, self.context)?;

        Ok(match self.history_limit {
            Some(limit) => chart.with_history_limit(limit),
            None => chart,
        })
    }
}
