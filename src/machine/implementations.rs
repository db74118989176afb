//! Named guard and action implementations referenced by a config.

use crate::core::{Action, Event, Guard};
use std::collections::HashMap;
use std::fmt;

/// Registry of the guards and actions a config may name.
///
/// Cloning is cheap: implementations are reference counted.
pub struct Implementations<C, P> {
    guards: HashMap<String, Guard<C>>,
    actions: HashMap<String, Action<C, P>>,
}

impl<C, P> Implementations<C, P> {
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    /// Register a guard under `name`, replacing any previous one.
    pub fn with_guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.add_guard(name, Guard::new(predicate));
        self
    }

    /// Register an action under `name`, replacing any previous one.
    pub fn with_action<F>(mut self, name: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&C, &Event<P>) -> C + Send + Sync + 'static,
    {
        self.add_action(name, Action::new(reducer));
        self
    }

    pub fn add_guard(&mut self, name: impl Into<String>, guard: Guard<C>) {
        self.guards.insert(name.into(), guard);
    }

    pub fn add_action(&mut self, name: impl Into<String>, action: Action<C, P>) {
        self.actions.insert(name.into(), action);
    }

    pub fn guard(&self, name: &str) -> Option<&Guard<C>> {
        self.guards.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&Action<C, P>> {
        self.actions.get(name)
    }
}

impl<C, P> Default for Implementations<C, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, P> Clone for Implementations<C, P> {
    fn clone(&self) -> Self {
        Self {
            guards: self.guards.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<C, P> fmt::Debug for Implementations<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut guards: Vec<_> = self.guards.keys().collect();
        let mut actions: Vec<_> = self.actions.keys().collect();
        guards.sort();
        actions.sort();
        f.debug_struct("Implementations")
            .field("guards", &guards)
            .field("actions", &actions)
            .finish()
    }
}
