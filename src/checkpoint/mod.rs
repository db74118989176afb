//! Checkpoint and resume for running machines.
//!
//! A checkpoint captures where a run is, what its context holds and how it
//! got there, so a form session can survive a restart. Guards and actions
//! are not serialized; a checkpoint is resumed against a definition with
//! [`Interpreter::resume`](crate::machine::Interpreter::resume).

use crate::core::{Context, RuntimeState, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Current on-disk checkpoint format.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a running machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<C: Context> {
    /// Format version this checkpoint was written with
    pub version: u32,

    /// Random v4 id
    pub id: String,

    /// Id of the machine the run belongs to
    pub machine_id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Runtime state at checkpoint time
    pub state: RuntimeState<C>,

    /// Transitions processed so far
    pub history: StateHistory,
}

impl<C: Context> Checkpoint<C> {
    pub fn new(machine_id: impl Into<String>, state: RuntimeState<C>, history: StateHistory) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            machine_id: machine_id.into(),
            timestamp: Utc::now(),
            state,
            history,
        }
    }

    /// Check that this checkpoint can be resumed by this version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    /// Serialize as pretty JSON, readable and diffable.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Serialize in compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateId, StateTransition, INIT_EVENT};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Draft {
        name: Option<String>,
        step: u8,
    }

    fn checkpoint() -> Checkpoint<Draft> {
        let state = RuntimeState {
            value: StateId::from("profile"),
            context: Draft {
                name: Some("Ada".to_string()),
                step: 2,
            },
            is_final: false,
            event: INIT_EVENT.to_string(),
            changed: true,
            next_events: vec!["CONTINUE".to_string()],
        };
        let history = StateHistory::new().record(StateTransition {
            from: StateId::from("welcome"),
            to: StateId::from("profile"),
            event: "CONTINUE".to_string(),
            timestamp: Utc::now(),
        });
        Checkpoint::new("form", state, history)
    }

    #[test]
    fn new_checkpoint_has_current_version_and_unique_id() {
        let a = checkpoint();
        let b = checkpoint();

        assert_eq!(a.version, CHECKPOINT_VERSION);
        assert_ne!(a.id, b.id);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn json_roundtrip_preserves_checkpoint() {
        let original = checkpoint();
        let restored = Checkpoint::<Draft>::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn binary_roundtrip_preserves_checkpoint() {
        let original = checkpoint();
        let bytes = original.to_binary().unwrap();
        let restored = Checkpoint::<Draft>::from_binary(&bytes).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn binary_is_more_compact_than_json() {
        let original = checkpoint();
        assert!(original.to_binary().unwrap().len() < original.to_json().unwrap().len());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut future = checkpoint();
        future.version = CHECKPOINT_VERSION + 1;
        let json = serde_json::to_string(&future).unwrap();

        let result = Checkpoint::<Draft>::from_json(&json);

        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found, supported })
                if found == CHECKPOINT_VERSION + 1 && supported == CHECKPOINT_VERSION
        ));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            Checkpoint::<Draft>::from_json("not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::<Draft>::from_binary(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
