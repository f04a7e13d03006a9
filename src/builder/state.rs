//! Builder for state definitions, shared by charts and key tables.

use crate::builder::error::BuildError;
use crate::core::{StateFlags, StateId};
use crate::table::{ActionRef, StateDefinition, TransitionTable};
use std::collections::BTreeMap;

/// Builder for one state of a table.
///
/// `T` is the table's transition flavour: [`crate::table::Transition`] for
/// charts, [`crate::keys::Binding`] for key tables.
#[derive(Clone, Debug)]
pub struct StateBuilder<T> {
    id: StateId,
    definition: StateDefinition<T>,
}

impl<T> StateBuilder<T> {
    pub fn new(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            definition: StateDefinition::default(),
        }
    }

    /// Append an action to run on entering the state.
    pub fn entry(mut self, action: impl Into<String>) -> Self {
        self.definition.entry.push(ActionRef::new(action));
        self
    }

    /// Append an action to run on leaving the state.
    pub fn exit(mut self, action: impl Into<String>) -> Self {
        self.definition.exit.push(ActionRef::new(action));
        self
    }

    /// Map an event label (or `"*"`) to a transition.
    pub fn on(mut self, event: impl Into<String>, transition: impl Into<T>) -> Self {
        self.definition.on.insert(event.into(), transition.into());
        self
    }

    /// Mark the state sticky: exempt from inactivity and post-action resets.
    pub fn sticky(mut self) -> Self {
        self.definition.flags.sticky = true;
        self
    }

    /// Mark the state transient: a prefix state that expires on the chord timeout.
    pub fn transient(mut self) -> Self {
        self.definition.flags.transient = true;
        self
    }

    pub fn flags(mut self, flags: StateFlags) -> Self {
        self.definition.flags = flags;
        self
    }

    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn build(self) -> (StateId, StateDefinition<T>) {
        (self.id, self.definition)
    }
}

/// Assemble built states into an unvalidated table.
pub(crate) fn assemble_table<T>(
    initial: Option<StateId>,
    states: Vec<StateBuilder<T>>,
) -> Result<TransitionTable<T>, BuildError> {
    let initial = initial.ok_or(BuildError::MissingInitialState)?;

    if states.is_empty() {
        return Err(BuildError::NoStates);
    }

    let mut definitions = BTreeMap::new();
    for builder in states {
        let (id, definition) = builder.build();
        if definitions.contains_key(&id) {
            return Err(BuildError::DuplicateState(id));
        }
        definitions.insert(id, definition);
    }

    Ok(TransitionTable::new(initial, definitions))
}
