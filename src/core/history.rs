//! State transition history tracking.
//!
//! Each chart machine keeps a bounded record of the transitions it has
//! committed, for diagnostics and for callers that want to audit how a
//! chart reached its current state.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of records a machine keeps before dropping the oldest.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use modechart::core::{StateId, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: StateId::new("idle"),
///     to: StateId::new("active"),
///     event: "ACTIVATE".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "active");
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    /// The event that triggered the transition
    pub event: String,
    /// When the state change was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of state transitions.
///
/// `record` is pure and returns a new history; `push` appends in place and
/// is what machines use on their hot path.
///
/// # Example
///
/// ```rust
/// use modechart::core::{StateHistory, StateId, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let history = history.record(StateTransition {
///     from: StateId::new("initialize"),
///     to: StateId::new("load"),
///     event: "LOAD".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[1], "load");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
    limit: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create a new empty history with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new empty history that keeps at most `limit` records.
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit,
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// Does not mutate the existing history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// Append a transition in place, dropping the oldest record when full.
    pub fn push(&mut self, transition: StateTransition) {
        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.remove(0);
        }
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first recorded `from` state, then the `to` state of each
    /// transition.
    pub fn get_path(&self) -> Vec<&StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all retained transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: &str, to: &str, event: &str) -> StateTransition {
        StateTransition {
            from: StateId::new(from),
            to: StateId::new(to),
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(transition("idle", "active", "ACTIVATE"));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.push(transition("idle", "active", "ACTIVATE"));
        history.push(transition("active", "paused", "PAUSE"));
        history.push(transition("paused", "active", "RESUME"));

        let path = history.get_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], "idle");
        assert_eq!(path[1], "active");
        assert_eq!(path[2], "paused");
        assert_eq!(path[3], "active");
    }

    #[test]
    fn push_drops_oldest_when_full() {
        let mut history = StateHistory::with_limit(2);
        history.push(transition("a", "b", "1"));
        history.push(transition("b", "c", "2"));
        history.push(transition("c", "d", "3"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[0].event, "2");
        assert_eq!(history.last().map(|t| t.event.as_str()), Some("3"));
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.push(transition("a", "b", "1"));
        assert!(history.is_empty());
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(transition("idle", "active", "ACTIVATE"));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(transition("normal", "debug", "ENTER_DEBUG"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
