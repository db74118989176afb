//! Running machines.
//!
//! This module is the imperative shell around the pure core:
//!
//! - **Definitions**: a config bound to its guards and actions, validated
//!   once and shared read-only
//! - **Transitions**: the pure `MachineDefinition::transition` function
//! - **Interpreter**: one run of a definition, with lifecycle, observers
//!   and history
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stepform::builder::MachineBuilder;
//! use stepform::machine::Interpreter;
//!
//! let definition = MachineBuilder::<u32, ()>::new("toggle")
//!     .initial("off")
//!     .strict(true)
//!     .context(0)
//!     .state("off", stepform::builder::StateBuilder::new().on("FLIP", "on"))
//!     .state("on", stepform::builder::StateBuilder::new().on("FLIP", "off"))
//!     .build()
//!     .unwrap();
//!
//! let mut interpreter = Interpreter::new(Arc::new(definition));
//! interpreter.start().unwrap();
//! assert_eq!(interpreter.send("FLIP").unwrap().value, "on");
//! assert!(interpreter.send("PUSH").is_err());
//! ```

mod definition;
mod error;
mod implementations;
mod interpreter;
mod transition;

pub use definition::MachineDefinition;
pub use error::{InterpreterError, InterpreterStatus, LifecycleError};
pub use implementations::Implementations;
pub use interpreter::{Interpreter, Observer};
pub use transition::Candidate;
