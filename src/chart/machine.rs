//! State machine that interprets a chart.

use crate::chart::error::{ChartError, Outcome};
use crate::chart::registry::Registry;
use crate::chart::Chart;
use crate::core::{Context, EventData, StateHistory, StateId, StateTransition};
use crate::table::ActionRef;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// One running instance of a chart.
///
/// The chart is shared and read-only; the current state, context and
/// history belong to this instance alone.
pub struct StateMachine {
    chart: Arc<Chart>,
    current: StateId,
    context: Context,
    history: StateHistory,
}

impl StateMachine {
    /// Create a machine in the chart's initial state with a copy of its
    /// initial context.
    pub fn new(chart: Arc<Chart>) -> Self {
        let context = chart.initial_context().clone();
        Self::with_context(chart, context)
    }

    /// Create a machine in the chart's initial state with the given context.
    pub fn with_context(chart: Arc<Chart>, context: Context) -> Self {
        Self {
            current: chart.initial().clone(),
            history: StateHistory::with_limit(chart.history_limit()),
            chart,
            context,
        }
    }

    /// Get current state (pure)
    pub fn state(&self) -> &StateId {
        &self.current
    }

    pub fn is_in(&self, state: &str) -> bool {
        self.current == state
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn chart(&self) -> &Arc<Chart> {
        &self.chart
    }

    /// Check whether `event` would be taken from the current state (pure).
    pub fn can_handle(&self, event: &str, data: &EventData) -> bool {
        let Some(transition) = self.chart.table().lookup(self.current.name(), event) else {
            return false;
        };
        match &transition.guard {
            Some(guard) => self
                .chart
                .registry()
                .guard(guard)
                .is_some_and(|g| g.check(&self.context, data)),
            None => true,
        }
    }

    /// Feed an event to the machine.
    ///
    /// Order of evaluation: guard, exit actions of the current state, the
    /// transition's actions, state commit, entry actions of the target.
    /// An action error aborts the remaining actions; the state is committed
    /// only if the failure happens in the entry actions. Context mutations
    /// already made are kept.
    pub fn transition(&mut self, event: &str, data: &EventData) -> Result<Outcome, ChartError> {
        let chart = Arc::clone(&self.chart);
        let table = chart.table();

        let current_def = table
            .state(self.current.name())
            .ok_or_else(|| ChartError::UnknownState(self.current.clone()))?;

        let Some(transition) = current_def.lookup(event) else {
            warn!(
                chart = chart.name(),
                state = %self.current,
                event,
                "No transition defined for event"
            );
            return Ok(Outcome::NoTransition {
                state: self.current.clone(),
                event: event.to_string(),
            });
        };

        if let Some(guard_ref) = &transition.guard {
            let guard = chart
                .registry()
                .guard(guard_ref)
                .ok_or_else(|| ChartError::UnregisteredGuard(guard_ref.clone()))?;
            if !guard.check(&self.context, data) {
                warn!(
                    chart = chart.name(),
                    state = %self.current,
                    event,
                    guard = %guard_ref,
                    "Guard condition failed"
                );
                return Ok(Outcome::GuardRejected {
                    state: self.current.clone(),
                    event: event.to_string(),
                    guard: guard_ref.clone(),
                });
            }
        }

        let target_def = table
            .state(transition.target.name())
            .ok_or_else(|| ChartError::UnknownState(transition.target.clone()))?;

        let registry = chart.registry();
        run_actions(registry, &current_def.exit, &self.current, &mut self.context, data)?;
        run_actions(registry, &transition.actions, &self.current, &mut self.context, data)?;

        let from = std::mem::replace(&mut self.current, transition.target.clone());
        self.history.push(StateTransition {
            from: from.clone(),
            to: self.current.clone(),
            event: event.to_string(),
            timestamp: Utc::now(),
        });
        debug!(chart = chart.name(), %from, to = %self.current, event, "Transitioned");

        run_actions(registry, &target_def.entry, &self.current, &mut self.context, data)?;

        Ok(Outcome::Transitioned {
            from,
            to: self.current.clone(),
        })
    }

    /// Alias for [`transition`](Self::transition) taking an owned payload.
    pub fn send(&mut self, event: &str, data: EventData) -> Result<Outcome, ChartError> {
        self.transition(event, &data)
    }
}

fn run_actions(
    registry: &Registry,
    actions: &[ActionRef],
    state: &StateId,
    context: &mut Context,
    data: &EventData,
) -> Result<(), ChartError> {
    for action_ref in actions {
        let action = registry
            .action(action_ref)
            .ok_or_else(|| ChartError::UnregisteredAction(action_ref.clone()))?;
        trace!(action = %action_ref, %state, "Running action");
        action(context, data).map_err(|source| ChartError::ActionFailed {
            action: action_ref.clone(),
            state: state.clone(),
            source,
        })?;
    }
    Ok(())
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("chart", &self.chart.name())
            .field("current", &self.current)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
