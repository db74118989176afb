//! Core state machine types.
//!
//! This module contains the pure building blocks every machine is made of:
//! - State identifiers, context bounds and runtime snapshots
//! - Guard predicates over the context
//! - Events and the actions that fold them into the context
//! - Immutable transition history
//!
//! Nothing in here performs I/O or holds mutable shared state.

mod action;
mod guard;
mod history;
mod state;

pub use action::{Action, Event};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{Context, Payload, RuntimeState, StateId, INIT_EVENT};
