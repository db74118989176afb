//! Transition history of a running machine.
//!
//! History is immutable: `record` returns a new history with the
//! transition appended.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one processed event.
///
/// Targetless transitions (actions only) are recorded with `from == to`.
///
/// # Example
///
/// ```rust
/// use stepform::core::{StateId, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: StateId::from("welcome"),
///     to: StateId::from("residency"),
///     event: "CONTINUE".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_self_transition());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state the event was processed in
    pub from: StateId,
    /// The state the machine ended up in
    pub to: StateId,
    /// Name of the event that caused the transition
    pub event: String,
    /// When the event was processed
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Transitions taken by one run, oldest first.
///
/// # Example
///
/// ```rust
/// use stepform::core::{StateHistory, StateId, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: StateId::from("welcome"),
///         to: StateId::from("residency"),
///         event: "CONTINUE".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: StateId::from("residency"),
///         to: StateId::from("profile"),
///         event: "CONTINUE".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.get_path().len(), 3); // welcome, residency, profile
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append `transition`, leaving `self` as it was.
    ///
    /// ```rust
    /// use stepform::core::{StateHistory, StateId, StateTransition};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new();
    /// let updated = history.record(StateTransition {
    ///     from: StateId::from("a"),
    ///     to: StateId::from("b"),
    ///     event: "GO".to_string(),
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(updated.transitions().len(), 1);
    /// assert!(history.is_empty());
    /// ```
    pub fn record(&self, transition: StateTransition) -> Self {
        Self {
            transitions: self
                .transitions
                .iter()
                .cloned()
                .chain(std::iter::once(transition))
                .collect(),
        }
    }

    /// Get the path of states visited.
    ///
    /// Returns the `from` state of the first transition followed by the
    /// `to` state of every transition. Self transitions repeat the state.
    pub fn get_path(&self) -> Vec<&StateId> {
        self.transitions
            .first()
            .map(|first| &first.from)
            .into_iter()
            .chain(self.transitions.iter().map(|t| &t.to))
            .collect()
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let started = self.transitions.first()?.timestamp;
        let ended = self.transitions.last()?.timestamp;
        (ended - started).to_std().ok()
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
