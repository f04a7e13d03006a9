//! Multi-chart coordinator.
//!
//! Holds named [`StateMachine`] instances and resolves names for callers.
//! It carries no business logic: cross-chart decisions ("if the phase chart
//! is in `run` and the environment chart is in `debug`, activate the
//! runtime") live in calling code, which reads one chart and drives another.
//!
//! Each `send` commits independently. There is no atomic multi-chart update.

use crate::chart::{ChartError, Outcome, StateMachine};
use crate::core::{Context, EventData, StateId};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::trace;

/// Errors surfaced by the coordinator.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("No chart registered under '{0}'")]
    UnknownChart(String),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Named collection of chart machines.
#[derive(Debug, Default)]
pub struct Coordinator {
    machines: BTreeMap<String, StateMachine>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a machine under `name`, returning the coordinator.
    pub fn with_chart(mut self, name: impl Into<String>, machine: StateMachine) -> Self {
        self.register(name, machine);
        self
    }

    /// Add or replace a machine under `name`, returning any machine it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        machine: StateMachine,
    ) -> Option<StateMachine> {
        self.machines.insert(name.into(), machine)
    }

    /// Detach a machine from the coordinator.
    pub fn remove(&mut self, name: &str) -> Option<StateMachine> {
        self.machines.remove(name)
    }

    pub fn machine(&self, name: &str) -> Result<&StateMachine, CoordinatorError> {
        self.machines
            .get(name)
            .ok_or_else(|| CoordinatorError::UnknownChart(name.to_string()))
    }

    /// Current state of the named chart.
    pub fn state(&self, name: &str) -> Result<&StateId, CoordinatorError> {
        self.machine(name).map(StateMachine::state)
    }

    pub fn context(&self, name: &str) -> Result<&Context, CoordinatorError> {
        self.machine(name).map(StateMachine::context)
    }

    /// Whether the named chart is currently in `state`.
    pub fn is_in(&self, name: &str, state: &str) -> Result<bool, CoordinatorError> {
        self.machine(name).map(|m| m.is_in(state))
    }

    /// Deliver an event to the named chart.
    ///
    /// The chart's outcome (including no-op outcomes) is returned unchanged.
    pub fn send(
        &mut self,
        name: &str,
        event: &str,
        data: EventData,
    ) -> Result<Outcome, CoordinatorError> {
        let machine = self
            .machines
            .get_mut(name)
            .ok_or_else(|| CoordinatorError::UnknownChart(name.to_string()))?;
        trace!(chart = name, event, "Dispatching event");
        Ok(machine.transition(event, &data)?)
    }

    pub fn chart_names(&self) -> impl Iterator<Item = &str> {
        self.machines.keys().map(String::as_str)
    }

    /// Snapshot of every chart's current state, keyed by chart name.
    pub fn states(&self) -> BTreeMap<&str, &StateId> {
        self.machines
            .iter()
            .map(|(name, machine)| (name.as_str(), machine.state()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ChartBuilder, StateBuilder, TransitionBuilder};
    use crate::chart::{ActionError, Chart};
    use serde_json::json;
    use std::sync::Arc;

    fn toggle_chart(name: &str) -> Arc<Chart> {
        Arc::new(
            ChartBuilder::new(name)
                .initial("off")
                .context(json!({ "flips": 0 }))
                .state(StateBuilder::new("off").on("FLIP", TransitionBuilder::to("on").action("flip")))
                .state(StateBuilder::new("on").on("FLIP", TransitionBuilder::to("off").action("flip")))
                .action("flip", |ctx, _| {
                    let flips = ctx.get_i64("flips").unwrap_or(0);
                    ctx.set("flips", json!(flips + 1));
                    Ok(())
                })
                .build()
                .unwrap(),
        )
    }

    fn coordinator() -> Coordinator {
        Coordinator::new()
            .with_chart("left", StateMachine::new(toggle_chart("left")))
            .with_chart("right", StateMachine::new(toggle_chart("right")))
    }

    #[test]
    fn unknown_chart_is_an_error() {
        let mut coordinator = coordinator();

        assert!(matches!(
            coordinator.state("middle"),
            Err(CoordinatorError::UnknownChart(name)) if name == "middle"
        ));
        assert!(matches!(
            coordinator.send("middle", "FLIP", EventData::Null),
            Err(CoordinatorError::UnknownChart(_))
        ));
    }

    #[test]
    fn send_only_touches_the_named_chart() {
        let mut coordinator = coordinator();

        coordinator.send("left", "FLIP", EventData::Null).unwrap();

        assert_eq!(coordinator.state("left").unwrap(), "on");
        assert_eq!(coordinator.state("right").unwrap(), "off");
        assert_eq!(coordinator.context("left").unwrap().get_i64("flips"), Some(1));
        assert_eq!(coordinator.context("right").unwrap().get_i64("flips"), Some(0));
    }

    #[test]
    fn no_op_outcome_passes_through() {
        let mut coordinator = coordinator();

        let outcome = coordinator.send("left", "UNKNOWN", EventData::Null).unwrap();

        assert!(matches!(outcome, Outcome::NoTransition { .. }));
        assert_eq!(coordinator.state("left").unwrap(), "off");
    }

    #[test]
    fn chart_errors_are_wrapped() {
        let failing = Arc::new(
            ChartBuilder::new("failing")
                .initial("a")
                .state(StateBuilder::new("a").on("GO", TransitionBuilder::to("a").action("fail")))
                .action("fail", |_, _| Err(ActionError::new("nope")))
                .build()
                .unwrap(),
        );
        let mut coordinator = Coordinator::new().with_chart("failing", StateMachine::new(failing));

        let err = coordinator.send("failing", "GO", EventData::Null).unwrap_err();
        assert!(matches!(err, CoordinatorError::Chart(ChartError::ActionFailed { .. })));
    }

    #[test]
    fn states_snapshot_lists_every_chart() {
        let mut coordinator = coordinator();
        coordinator.send("right", "FLIP", EventData::Null).unwrap();

        let states = coordinator.states();
        assert_eq!(states.len(), 2);
        assert_eq!(states["left"], "off");
        assert_eq!(states["right"], "on");
        assert_eq!(coordinator.chart_names().collect::<Vec<_>>(), vec!["left", "right"]);
    }

    #[test]
    fn register_replaces_and_remove_detaches() {
        let mut coordinator = coordinator();
        coordinator.send("left", "FLIP", EventData::Null).unwrap();

        let previous = coordinator.register("left", StateMachine::new(toggle_chart("left")));
        assert_eq!(previous.map(|m| m.state().clone()), Some(StateId::new("on")));
        assert!(coordinator.is_in("left", "off").unwrap());

        assert!(coordinator.remove("left").is_some());
        assert_eq!(coordinator.len(), 1);
        assert!(coordinator.is_in("left", "off").is_err());
    }
}
