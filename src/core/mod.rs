//! Core state machine types.
//!
//! This module contains the building blocks shared by charts and the key
//! dispatcher:
//! - State identifiers and per-state flags
//! - Context and event payloads
//! - Guard predicates for transition control
//! - Bounded transition history

mod context;
mod guard;
mod history;
mod state;

pub use context::{Context, EventData};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::{StateFlags, StateId};
