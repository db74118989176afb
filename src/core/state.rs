//! State identifiers, context bounds and the runtime state snapshot.
//!
//! States are declared by name in a machine config, so they are identified
//! by a string newtype rather than an enum. The context carried through a
//! run is a typed value chosen by the machine author.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};

/// Name of the synthetic event that produced a machine's initial state.
pub const INIT_EVENT: &str = "stepform.init";

/// Identifier of a declared state node.
///
/// # Example
///
/// ```rust
/// use stepform::core::StateId;
///
/// let id = StateId::from("welcome");
/// assert_eq!(id.as_str(), "welcome");
/// assert_eq!(id, "welcome");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(id)
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

/// Bounds for the extended state a machine carries between transitions.
///
/// - `Clone`: actions derive a new context from the previous one
/// - `PartialEq`: lets the interpreter report whether an event changed anything
/// - `Serialize` + `Deserialize`: contexts are part of configs and checkpoints
///
/// Implemented for every type meeting the bounds.
pub trait Context:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Context for T where
    T: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Bounds for event payloads. Implemented for every type meeting them.
pub trait Payload: Clone + Debug + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + Debug + Send + Sync + 'static {}

/// Snapshot of a running machine: where it is and what it carries.
///
/// Each processed event replaces the snapshot as a whole; observers and
/// callers only ever see complete snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct RuntimeState<C: Context> {
    /// The active state node
    pub value: StateId,
    /// Context after the event that produced this snapshot
    pub context: C,
    /// Whether the active state node is marked final
    pub is_final: bool,
    /// Name of the event that produced this snapshot
    pub event: String,
    /// Whether the event moved the machine or replaced its context
    pub changed: bool,
    /// Events the active state accepts, local handlers first
    pub next_events: Vec<String>,
}

impl<C: Context> RuntimeState<C> {
    /// Check whether the machine is in the given state.
    pub fn matches(&self, id: &str) -> bool {
        self.value == id
    }

    /// Check whether `event` is declared for the active state.
    pub fn accepts(&self, event: &str) -> bool {
        self.next_events.iter().any(|e| e == event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    fn snapshot() -> RuntimeState<Counter> {
        RuntimeState {
            value: StateId::from("idle"),
            context: Counter { count: 2 },
            is_final: false,
            event: INIT_EVENT.to_string(),
            changed: false,
            next_events: vec!["START".to_string(), "RESET".to_string()],
        }
    }

    #[test]
    fn state_id_compares_with_str() {
        let id = StateId::new("review");
        assert_eq!(id, "review");
        assert_ne!(id, "welcome");
        assert_eq!(id.to_string(), "review");
    }

    #[test]
    fn state_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&StateId::from("profile")).unwrap();
        assert_eq!(json, "\"profile\"");
    }

    #[test]
    fn matches_checks_active_state() {
        let state = snapshot();
        assert!(state.matches("idle"));
        assert!(!state.matches("running"));
    }

    #[test]
    fn accepts_checks_next_events() {
        let state = snapshot();
        assert!(state.accepts("START"));
        assert!(!state.accepts("STOP"));
    }

    #[test]
    fn runtime_state_serializes_camel_case() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(value["value"], "idle");
        assert_eq!(value["isFinal"], false);
        assert_eq!(value["nextEvents"][0], "START");
        assert_eq!(value["context"]["count"], 2);
    }

    #[test]
    fn runtime_state_roundtrips_through_json() {
        let state = snapshot();
        let json = serde_json::to_string(&state).unwrap();
        let back: RuntimeState<Counter> = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
