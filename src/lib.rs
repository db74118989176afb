//! Stepform: guarded, context-carrying state machines for multi-step forms.
//!
//! A machine is described by a serializable config: states, the events each
//! state handles, ordered transition candidates with named guards, and named
//! actions that fold events into a typed context. The config is validated
//! against its guard and action implementations once, then run by an
//! interpreter one event at a time.
//!
//! # Core Concepts
//!
//! - **Config**: plain data, loadable from JSON ([`builder`])
//! - **Definition**: a validated config bound to its guards and actions ([`machine`])
//! - **Interpreter**: one run of a definition, with observers and history
//! - **Checkpoint**: snapshot and resume of a run ([`checkpoint`])
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stepform::form::{form_machine, Answer, FormPatch, CONTINUE, SET_STATE};
//! use stepform::core::Event;
//! use stepform::machine::Interpreter;
//!
//! let mut form = Interpreter::new(Arc::new(form_machine().unwrap()));
//! form.on_transition(|state| println!("Transition: {}", state.value));
//! form.start().unwrap();
//!
//! form.send(CONTINUE).unwrap();
//! form.send(Event::with_payload(SET_STATE, FormPatch::resident(Answer::No))).unwrap();
//! let state = form.send(CONTINUE).unwrap();
//!
//! assert_eq!(state.value, "nonResident");
//! assert!(state.is_final);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod form;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{ConfigError, MachineBuilder, MachineConfig};
pub use crate::core::{Event, Guard, RuntimeState, StateHistory, StateId, StateTransition};
pub use crate::machine::{Interpreter, InterpreterError, MachineDefinition};
