//! Machine configs and the builders that produce them.
//!
//! A [`MachineConfig`] is plain serializable data naming states, handlers,
//! guards and actions. The builders write configs in code; JSON configs are
//! read with [`MachineConfig::from_json`].

pub mod config;
pub mod error;
pub mod machine;
pub mod transition;

pub use config::{CandidateConfig, Handlers, MachineConfig, StateKind, StateNodeConfig, TransitionConfig};
pub use error::{ConfigError, ConfigIssue};
pub use machine::MachineBuilder;
pub use transition::{StateBuilder, TransitionBuilder};
