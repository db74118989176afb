//! Errors raised while encoding, decoding or resuming checkpoints.

use thiserror::Error;

/// Why a checkpoint could not be written, read or resumed.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint: {0}")]
    SerializationFailed(String),

    #[error("Could not decode checkpoint: {0}")]
    DeserializationFailed(String),

    #[error("Checkpoint format v{found} cannot be read (this build reads v{supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint was taken from a different machine
    #[error("Checkpoint belongs to machine '{found}', expected '{expected}'")]
    MachineMismatch { expected: String, found: String },

    /// The checkpointed state no longer exists in the definition
    #[error("Checkpoint state '{state}' is not declared by machine '{machine}'")]
    UnknownState { machine: String, state: String },
}
