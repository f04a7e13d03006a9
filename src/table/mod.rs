//! Transition tables: plain, serializable state/transition data.
//!
//! A table maps state ids to definitions. Charts hold tables of
//! [`Transition`]s; the key dispatcher holds tables of
//! [`crate::keys::Binding`]s. Executable behavior is referenced by name
//! ([`ActionRef`], [`GuardRef`]) and resolved through a registry, so a table
//! can be loaded from JSON and shared freely.

mod definition;
mod validate;

pub use definition::{
    ActionRef, GuardRef, StateDefinition, Transition, TransitionKind, TransitionTable, WILDCARD,
};
pub use validate::{into_result, validate_table, TableError};
