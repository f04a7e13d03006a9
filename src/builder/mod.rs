//! Builder API for ergonomic chart and key table construction.
//!
//! This module provides fluent builders for assembling transition tables
//! with minimal boilerplate. Every builder validates on `build()` and
//! reports all table problems at once.

pub mod chart;
pub mod error;
pub mod state;
pub mod transition;

pub use chart::ChartBuilder;
pub use error::BuildError;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;

use crate::core::StateId;

/// Create an unconditional, action-free transition.
///
/// # Example
///
/// ```
/// use modechart::builder::simple_transition;
///
/// let transition = simple_transition("paused").build();
/// assert_eq!(transition.target, "paused");
/// assert!(transition.actions.is_empty());
/// ```
pub fn simple_transition(to: impl Into<StateId>) -> TransitionBuilder {
    TransitionBuilder::to(to)
}

/// Create a transition gated by a registered guard.
///
/// # Example
///
/// ```
/// use modechart::builder::guarded_transition;
///
/// let transition = guarded_transition("active", "has_layer").build();
/// assert_eq!(transition.guard.as_ref().map(|g| g.name()), Some("has_layer"));
/// ```
pub fn guarded_transition(to: impl Into<StateId>, guard: impl Into<String>) -> TransitionBuilder {
    TransitionBuilder::to(to).guard(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Registry, StateMachine};
    use crate::core::EventData;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn helpers_build_a_working_chart() {
        let chart = ChartBuilder::new("helpers")
            .initial("idle")
            .state(StateBuilder::new("idle").on("GO", guarded_transition("active", "ready")))
            .state(StateBuilder::new("active").on("STOP", simple_transition("idle")))
            .registry(Registry::new().with_guard("ready", |_, data| data["ready"] == json!(true)))
            .build()
            .unwrap();

        let mut machine = StateMachine::new(Arc::new(chart));
        assert!(!machine.send("GO", json!({ "ready": false })).unwrap().is_transitioned());
        assert!(machine.send("GO", json!({ "ready": true })).unwrap().is_transitioned());
        assert!(machine.send("STOP", EventData::Null).unwrap().is_transitioned());
        assert_eq!(machine.state(), "idle");
    }
}
