//! Table validation.
//!
//! Uses Stillwater's `Validation` so a broken table reports every problem
//! in one pass instead of stopping at the first.

use crate::core::StateId;
use crate::table::definition::{ActionRef, GuardRef, TransitionKind, TransitionTable};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found in a transition table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("Initial state '{0}' is not defined")]
    MissingInitial(StateId),

    #[error("State '{state}' maps '{event}' to undefined state '{target}'")]
    UnknownTarget {
        state: StateId,
        event: String,
        target: StateId,
    },

    #[error("State '{state}' references unregistered action '{action}'")]
    UnknownAction { state: StateId, action: ActionRef },

    #[error("State '{state}' references unregistered guard '{guard}'")]
    UnknownGuard { state: StateId, guard: GuardRef },

    #[error("State '{0}' cannot be both sticky and transient")]
    ConflictingFlags(StateId),
}

type Check = Validation<(), NonEmptyVec<TableError>>;

fn check(ok: bool, error: impl FnOnce() -> TableError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

/// Validate a table, accumulating ALL problems.
///
/// `has_action` and `has_guard` report whether a reference resolves in the
/// registry the table will run against.
pub fn validate_table<T, A, G>(table: &TransitionTable<T>, has_action: A, has_guard: G) -> Check
where
    T: TransitionKind,
    A: Fn(&ActionRef) -> bool,
    G: Fn(&GuardRef) -> bool,
{
    let mut checks: Vec<Check> = Vec::new();

    checks.push(check(table.contains(table.initial().name()), || {
        TableError::MissingInitial(table.initial().clone())
    }));

    for (id, def) in table.states() {
        checks.push(check(!(def.flags.sticky && def.flags.transient), || {
            TableError::ConflictingFlags(id.clone())
        }));

        let lifecycle_actions = def.entry.iter().chain(def.exit.iter());
        let transition_actions = def.on.values().flat_map(|t| t.action_refs().iter());
        for action in lifecycle_actions.chain(transition_actions) {
            checks.push(check(has_action(action), || TableError::UnknownAction {
                state: id.clone(),
                action: action.clone(),
            }));
        }

        for (event, entry) in &def.on {
            if let Some(target) = entry.target() {
                checks.push(check(table.contains(target.name()), || {
                    TableError::UnknownTarget {
                        state: id.clone(),
                        event: event.clone(),
                        target: target.clone(),
                    }
                }));
            }
            if let Some(guard) = entry.guard_ref() {
                checks.push(check(has_guard(guard), || TableError::UnknownGuard {
                    state: id.clone(),
                    guard: guard.clone(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Collapse a validation into a plain `Result` with every error listed.
pub fn into_result(validation: Check) -> Result<(), Vec<TableError>> {
    match validation {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}
