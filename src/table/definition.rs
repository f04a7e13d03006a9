//! Transition table data model.

use crate::core::{StateFlags, StateId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Event label that matches any event without an exact entry.
pub const WILDCARD: &str = "*";

/// Name of an action function registered with a chart.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionRef(String);

impl ActionRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Name of a guard predicate registered with a chart.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuardRef(String);

impl GuardRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuardRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Chart transition: target state, ordered actions, optional guard.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub target: StateId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<GuardRef>,
}

impl Transition {
    pub fn to(target: impl Into<StateId>) -> Self {
        Self {
            target: target.into(),
            actions: Vec::new(),
            guard: None,
        }
    }
}

/// What a table entry needs to expose for validation.
///
/// Implemented by every transition flavour a table can hold.
pub trait TransitionKind {
    /// State this entry moves the machine to, if any.
    fn target(&self) -> Option<&StateId>;

    fn action_refs(&self) -> &[ActionRef] {
        &[]
    }

    fn guard_ref(&self) -> Option<&GuardRef> {
        None
    }
}

impl TransitionKind for Transition {
    fn target(&self) -> Option<&StateId> {
        Some(&self.target)
    }

    fn action_refs(&self) -> &[ActionRef] {
        &self.actions
    }

    fn guard_ref(&self) -> Option<&GuardRef> {
        self.guard.as_ref()
    }
}

/// Definition of one state: entry/exit actions and outgoing transitions.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct StateDefinition<T> {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<ActionRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exit: Vec<ActionRef>,
    #[serde(default)]
    pub on: BTreeMap<String, T>,
    #[serde(default, skip_serializing_if = "StateFlags::is_default")]
    pub flags: StateFlags,
}

impl<T> Default for StateDefinition<T> {
    fn default() -> Self {
        Self {
            entry: Vec::new(),
            exit: Vec::new(),
            on: BTreeMap::new(),
            flags: StateFlags::default(),
        }
    }
}

impl<T> StateDefinition<T> {
    /// Exact entry for `label`, falling back to the wildcard entry.
    pub fn lookup(&self, label: &str) -> Option<&T> {
        self.on.get(label).or_else(|| self.on.get(WILDCARD))
    }

    pub fn is_sticky(&self) -> bool {
        self.flags.sticky
    }

    pub fn is_transient(&self) -> bool {
        self.flags.transient
    }
}

/// Mapping from state id to state definition plus the initial state.
///
/// Immutable once built; machines share it behind an `Arc`. Construction
/// does not validate; [`crate::chart::Chart`] and [`crate::keys::KeyTable`]
/// validate before accepting a table.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TransitionTable<T> {
    initial: StateId,
    states: BTreeMap<StateId, StateDefinition<T>>,
}

impl<T> TransitionTable<T> {
    pub fn new(initial: impl Into<StateId>, states: BTreeMap<StateId, StateDefinition<T>>) -> Self {
        Self {
            initial: initial.into(),
            states,
        }
    }

    pub fn initial(&self) -> &StateId {
        &self.initial
    }

    pub fn state(&self, id: &str) -> Option<&StateDefinition<T>> {
        self.states.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    /// Entry for `label` in `state`, exact match first, then wildcard.
    pub fn lookup(&self, state: &str, label: &str) -> Option<&T> {
        self.states.get(state).and_then(|def| def.lookup(label))
    }

    pub fn states(&self) -> impl Iterator<Item = (&StateId, &StateDefinition<T>)> {
        self.states.iter()
    }

    pub fn state_ids(&self) -> impl Iterator<Item = &StateId> {
        self.states.keys()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
