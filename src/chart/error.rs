//! Chart engine errors and transition outcomes.

use crate::core::StateId;
use crate::table::{ActionRef, GuardRef};
use thiserror::Error;

/// Error returned by a chart action.
///
/// Aborts the remaining actions of the transition and surfaces to the
/// caller of `transition`.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while a chart machine transitions.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("State '{0}' is not defined in the chart")]
    UnknownState(StateId),

    #[error("Action '{0}' is not registered with the chart")]
    UnregisteredAction(ActionRef),

    #[error("Guard '{0}' is not registered with the chart")]
    UnregisteredGuard(GuardRef),

    #[error("Action '{action}' failed in state '{state}': {source}")]
    ActionFailed {
        action: ActionRef,
        state: StateId,
        source: ActionError,
    },
}

/// Non-error result of a `transition` call.
///
/// `NoTransition` and `GuardRejected` are no-ops: state and context are
/// exactly as they were before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// State changed and all actions ran
    Transitioned { from: StateId, to: StateId },

    /// The current state has no entry for the event
    NoTransition { state: StateId, event: String },

    /// The guard on the matching transition returned false
    GuardRejected {
        state: StateId,
        event: String,
        guard: GuardRef,
    },
}

impl Outcome {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    /// State the machine landed in, if it moved.
    pub fn target(&self) -> Option<&StateId> {
        match self {
            Self::Transitioned { to, .. } => Some(to),
            _ => None,
        }
    }
}
