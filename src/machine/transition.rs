//! Transition candidates with their guards and actions resolved.

use crate::core::{Action, Context, Event, Guard, StateId};

/// A candidate whose guard and action names have been looked up.
pub struct Candidate<C, P> {
    pub target: Option<StateId>,
    pub guard: Option<(String, Guard<C>)>,
    pub actions: Vec<(String, Action<C, P>)>,
}

impl<C: Context, P> Candidate<C, P> {
    /// Check whether this candidate applies to the context (pure).
    pub fn can_execute(&self, context: &C) -> bool {
        self.guard.as_ref().is_none_or(|(_, g)| g.check(context))
    }

    /// Run the actions in order, threading the context through them.
    pub fn apply(&self, context: &C, event: &Event<P>) -> C {
        self.actions
            .iter()
            .fold(context.clone(), |ctx, (_, action)| action.apply(&ctx, event))
    }
}

impl<C, P> Clone for Candidate<C, P> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            guard: self.guard.clone(),
            actions: self.actions.clone(),
        }
    }
}
