//! Validation of machine configs.
//!
//! Uses Stillwater's `Validation` type to accumulate ALL problems in a
//! config instead of stopping at the first one, so a broken config is
//! reported in a single pass.
//!
//! # Example
//!
//! ```rust
//! use stepform::builder::{MachineConfig, StateBuilder};
//! use stepform::core::StateId;
//! use stepform::machine::Implementations;
//! use stepform::validation::validate_config;
//!
//! let mut config = MachineConfig {
//!     id: "door".to_string(),
//!     initial: StateId::from("closed"),
//!     strict: true,
//!     context: (),
//!     states: Default::default(),
//!     on: Default::default(),
//! };
//! config
//!     .states
//!     .insert(StateId::from("closed"), StateBuilder::new().on("OPEN", "open").build());
//!
//! let implementations: Implementations<(), ()> = Implementations::new();
//! // "open" is never declared
//! assert!(validate_config(&config, &implementations).is_failure());
//! ```

pub mod rules;

pub use rules::{validate_config, ConfigValidation};
