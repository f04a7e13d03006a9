//! Key binding tables.

use crate::builder::state::assemble_table;
use crate::builder::{BuildError, StateBuilder};
use crate::core::StateId;
use crate::keys::action::EditorAction;
use crate::table::{
    into_result, validate_table, StateDefinition, TransitionKind, TransitionTable,
};
use serde::{Deserialize, Serialize};

/// What a key resolves to in a given state.
///
/// Serialized as `{ "state": "insert" }` or `{ "action": "move_left" }`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Switch the dispatcher to another state (mode switch or chord prefix)
    State(StateId),
    /// Invoke an editor action
    Action(EditorAction),
}

impl Binding {
    pub fn state(id: impl Into<StateId>) -> Self {
        Self::State(id.into())
    }
}

impl From<EditorAction> for Binding {
    fn from(action: EditorAction) -> Self {
        Self::Action(action)
    }
}

impl TransitionKind for Binding {
    fn target(&self) -> Option<&StateId> {
        match self {
            Self::State(id) => Some(id),
            Self::Action(_) => None,
        }
    }
}

/// Validated key binding table.
///
/// Key tables carry no entry/exit actions; every mode-switch target must be
/// a defined state.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(transparent)]
pub struct KeyTable {
    table: TransitionTable<Binding>,
}

impl KeyTable {
    pub fn new(table: TransitionTable<Binding>) -> Result<Self, BuildError> {
        let validation = validate_table(&table, |_| false, |_| false);
        into_result(validation).map_err(BuildError::Invalid)?;
        Ok(Self { table })
    }

    /// Load a table from JSON: `{ "initial", "states": { id: { "on", "flags" } } }`.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let table: TransitionTable<Binding> = serde_json::from_str(json)?;
        Self::new(table)
    }

    pub fn builder() -> KeyTableBuilder {
        KeyTableBuilder::new()
    }

    /// Vim-style bindings.
    ///
    /// `normal` is the initial state. `insert`, `visual` and `command` are
    /// sticky and left with `Escape`. `g_pressed`, `d_pressed` and
    /// `y_pressed` are transient chord prefixes.
    pub fn vim() -> Self {
        use EditorAction::*;

        KeyTable::builder()
            .initial("normal")
            .state(
                StateBuilder::new("normal")
                    .on("h", MoveLeft)
                    .on("j", MoveDown)
                    .on("k", MoveUp)
                    .on("l", MoveRight)
                    .on("w", MoveWordForward)
                    .on("b", MoveWordBackward)
                    .on("0", StartOfLine)
                    .on("$", EndOfLine)
                    .on("G", EndOfDocument)
                    .on("i", Binding::state("insert"))
                    .on("v", Binding::state("visual"))
                    .on(":", Binding::state("command"))
                    .on("g", Binding::state("g_pressed"))
                    .on("d", Binding::state("d_pressed"))
                    .on("y", Binding::state("y_pressed")),
            )
            .state(
                StateBuilder::new("insert")
                    .sticky()
                    .on("Escape", Binding::state("normal"))
                    .on("*", InsertChar),
            )
            .state(
                StateBuilder::new("visual")
                    .sticky()
                    .on("h", SelectLeft)
                    .on("j", SelectDown)
                    .on("k", SelectUp)
                    .on("l", SelectRight)
                    .on("Escape", Binding::state("normal")),
            )
            .state(
                StateBuilder::new("command")
                    .sticky()
                    .on("Enter", ExecuteCommand)
                    .on("Escape", Binding::state("normal"))
                    .on("*", AppendCommandChar),
            )
            .state(
                StateBuilder::new("g_pressed")
                    .transient()
                    .on("g", StartOfDocument),
            )
            .state(
                StateBuilder::new("d_pressed")
                    .transient()
                    .on("d", DeleteLine)
                    .on("w", DeleteWord),
            )
            .state(
                StateBuilder::new("y_pressed")
                    .transient()
                    .on("y", YankLine)
                    .on("w", YankWord),
            )
            .build()
            .expect("built-in vim table is valid")
    }

    pub fn initial(&self) -> &StateId {
        self.table.initial()
    }

    pub fn state(&self, id: &str) -> Option<&StateDefinition<Binding>> {
        self.table.state(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.table.contains(id)
    }

    /// Binding for `key` in `state`: exact match first, then wildcard.
    pub fn lookup(&self, state: &str, key: &str) -> Option<&Binding> {
        self.table.lookup(state, key)
    }

    pub fn is_sticky(&self, state: &str) -> bool {
        self.table.state(state).is_some_and(StateDefinition::is_sticky)
    }

    pub fn is_transient(&self, state: &str) -> bool {
        self.table
            .state(state)
            .is_some_and(StateDefinition::is_transient)
    }

    pub fn table(&self) -> &TransitionTable<Binding> {
        &self.table
    }
}

/// Builder for key tables.
#[derive(Default)]
pub struct KeyTableBuilder {
    initial: Option<StateId>,
    states: Vec<StateBuilder<Binding>>,
}

impl KeyTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial (base) state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn state(mut self, state: StateBuilder<Binding>) -> Self {
        self.states.push(state);
        self
    }

    pub fn build(self) -> Result<KeyTable, BuildError> {
        let table = assemble_table(self.initial, self.states)?;
        KeyTable::new(table)
    }
}
