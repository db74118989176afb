//! Builder for constructing machine definitions.

use crate::builder::config::{Handlers, MachineConfig, StateNodeConfig, TransitionConfig};
use crate::builder::error::{ConfigError, ConfigIssue};
use crate::core::{Action, Context, Event, Guard, Payload, StateId};
use crate::machine::{Implementations, MachineDefinition};
use indexmap::IndexMap;

/// Builder for machine definitions with a fluent API.
///
/// Collects the config and the implementations together, then validates
/// both in `build`.
pub struct MachineBuilder<C: Context, P: Payload> {
    id: String,
    initial: Option<StateId>,
    strict: bool,
    context: Option<C>,
    states: IndexMap<StateId, StateNodeConfig>,
    on: Handlers,
    implementations: Implementations<C, P>,
}

impl<C: Context, P: Payload> MachineBuilder<C, P> {
    /// Create a new builder for the machine `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            initial: None,
            strict: false,
            context: None,
            states: IndexMap::new(),
            on: IndexMap::new(),
            implementations: Implementations::new(),
        }
    }

    /// Start from an existing config, e.g. one loaded from JSON.
    pub fn from_config(config: MachineConfig<C>) -> Self {
        Self {
            id: config.id,
            initial: Some(config.initial),
            strict: config.strict,
            context: Some(config.context),
            states: config.states,
            on: config.on,
            implementations: Implementations::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the initial context (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Declare a state. Declaring the same id twice replaces the node.
    pub fn state(mut self, id: impl Into<StateId>, node: impl Into<StateNodeConfig>) -> Self {
        self.states.insert(id.into(), node.into());
        self
    }

    /// Declare a machine-wide handler.
    pub fn on(mut self, event: impl Into<String>, handler: impl Into<TransitionConfig>) -> Self {
        self.on.insert(event.into(), handler.into());
        self
    }

    pub fn guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.implementations.add_guard(name, Guard::new(predicate));
        self
    }

    pub fn action<F>(mut self, name: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&C, &Event<P>) -> C + Send + Sync + 'static,
    {
        self.implementations.add_action(name, Action::new(reducer));
        self
    }

    /// Use these implementations, replacing any registered so far.
    pub fn implementations(mut self, implementations: Implementations<C, P>) -> Self {
        self.implementations = implementations;
        self
    }

    /// Assemble the config without validating it.
    pub fn into_config(self) -> Result<(MachineConfig<C>, Implementations<C, P>), ConfigError> {
        let initial = self
            .initial
            .ok_or_else(|| ConfigError::single(ConfigIssue::MissingInitialState))?;
        let context = self
            .context
            .ok_or_else(|| ConfigError::single(ConfigIssue::MissingContext))?;

        let config = MachineConfig {
            id: self.id,
            initial,
            strict: self.strict,
            context,
            states: self.states,
            on: self.on,
        };
        Ok((config, self.implementations))
    }

    /// Build and validate the machine definition.
    pub fn build(self) -> Result<MachineDefinition<C, P>, ConfigError> {
        let (config, implementations) = self.into_config()?;
        MachineDefinition::new(config, implementations)
    }
}
