//! Build errors for charts and key tables.

use crate::core::StateId;
use crate::table::TableError;
use thiserror::Error;

/// Errors that can occur when building charts and key tables.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("State '{0}' is defined more than once")]
    DuplicateState(StateId),

    #[error("Invalid transition table ({} problem(s)): {}", .0.len(), describe(.0))]
    Invalid(Vec<TableError>),

    #[error("Failed to parse table: {0}")]
    Parse(#[from] serde_json::Error),
}

fn describe(errors: &[TableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
