//! Errors raised while running a machine.

use thiserror::Error;

/// Lifecycle of an [`Interpreter`](super::Interpreter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterStatus {
    Created,
    Started,
    Stopped,
}

impl std::fmt::Display for InterpreterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Stopped => "stopped",
        })
    }
}

/// An operation was called in a lifecycle state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot {operation} an interpreter that is {status}")]
pub struct LifecycleError {
    pub operation: &'static str,
    pub status: InterpreterStatus,
}

/// Errors that can occur while processing an event.
///
/// None of these leave the machine half-updated: when `send` fails, the
/// runtime state is exactly what it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    #[error("Event '{event}' is not handled in state '{state}'")]
    UnhandledEvent { state: String, event: String },

    #[error("No transition for '{event}' in state '{state}' has a passing guard")]
    NoMatchingTransition { state: String, event: String },

    #[error("State '{state}' is not declared by machine '{machine}'")]
    UnknownState { machine: String, state: String },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
