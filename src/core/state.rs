//! State identifiers and per-state flags.
//!
//! States are identified by name so that transition tables stay plain,
//! serializable data. Behavior attached to a state lives in its
//! definition, never in the identifier itself.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a state within a transition table.
///
/// Serializes as a bare string.
///
/// # Example
///
/// ```rust
/// use modechart::core::StateId;
///
/// let idle = StateId::new("idle");
/// assert_eq!(idle.name(), "idle");
/// assert_eq!(idle, "idle");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create an identifier from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the state's name for display/logging.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Flags that shape how the key dispatcher treats a state.
///
/// - `sticky`: modal state that survives actions and inactivity; left only
///   through an explicit binding (typically `Escape`).
/// - `transient`: prefix state reached by a chord-starting key; expires
///   after the chord timeout if the chord is not completed.
///
/// A state is never both. Chart machines ignore these flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateFlags {
    pub sticky: bool,
    pub transient: bool,
}

impl StateFlags {
    pub const STICKY: Self = Self {
        sticky: true,
        transient: false,
    };

    pub const TRANSIENT: Self = Self {
        sticky: false,
        transient: true,
    };

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(StateId::new("normal").name(), "normal");
        assert_eq!(StateId::from("g_pressed").to_string(), "g_pressed");
    }

    #[test]
    fn state_id_compares_with_str() {
        let state = StateId::new("insert");
        assert_eq!(state, "insert");
        assert!(state != "normal");
    }

    #[test]
    fn state_serializes_as_bare_string() {
        let state = StateId::new("paused");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"paused\"");

        let deserialized: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn flags_default_to_neither() {
        let flags: StateFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.is_default());
        assert!(!flags.sticky);
        assert!(!flags.transient);
    }

    #[test]
    fn flag_constants_are_distinct() {
        assert!(StateFlags::STICKY.sticky);
        assert!(!StateFlags::STICKY.transient);
        assert!(StateFlags::TRANSIENT.transient);
        assert_ne!(StateFlags::STICKY, StateFlags::TRANSIENT);
    }
}
