//! Builder for constructing chart transitions.

use crate::core::StateId;
use crate::table::{ActionRef, GuardRef, Transition};

/// Builder for constructing transitions with a fluent API.
///
/// The target state is required, so it is taken up front.
#[derive(Clone, Debug)]
pub struct TransitionBuilder {
    target: StateId,
    actions: Vec<ActionRef>,
    guard: Option<GuardRef>,
}

impl TransitionBuilder {
    /// Start a transition to `target`.
    pub fn to(target: impl Into<StateId>) -> Self {
        Self {
            target: target.into(),
            actions: Vec::new(),
            guard: None,
        }
    }

    /// Append an action to run while taking the transition.
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(ActionRef::new(name));
        self
    }

    /// Gate the transition on a registered guard (optional).
    pub fn guard(mut self, name: impl Into<String>) -> Self {
        self.guard = Some(GuardRef::new(name));
        self
    }

    pub fn build(self) -> Transition {
        Transition {
            target: self.target,
            actions: self.actions,
            guard: self.guard,
        }
    }
}

impl From<TransitionBuilder> for Transition {
    fn from(builder: TransitionBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::to("active")
            .action("set_active_layer")
            .action("log")
            .guard("has_layer")
            .build();

        assert_eq!(transition.target, "active");
        assert_eq!(
            transition.actions,
            vec![ActionRef::new("set_active_layer"), ActionRef::new("log")]
        );
        assert_eq!(transition.guard, Some(GuardRef::new("has_layer")));
    }

    #[test]
    fn bare_transition_has_no_actions_or_guard() {
        let transition: Transition = TransitionBuilder::to("paused").into();
        assert!(transition.actions.is_empty());
        assert!(transition.guard.is_none());
    }
}
