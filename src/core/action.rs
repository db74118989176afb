//! Events and the actions that fold them into the context.

use std::fmt;
use std::sync::Arc;

/// An event sent to a machine: a name plus an optional typed payload.
///
/// # Example
///
/// ```rust
/// use stepform::core::Event;
///
/// let plain: Event<()> = Event::from("CONTINUE");
/// assert_eq!(plain.name, "CONTINUE");
/// assert!(plain.payload.is_none());
///
/// let loaded = Event::with_payload("SET_STATE", 42u32);
/// assert_eq!(loaded.payload, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Event<P> {
    pub name: String,
    pub payload: Option<P>,
}

impl<P> Event<P> {
    /// Create an event without payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Create an event carrying a payload.
    pub fn with_payload(name: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
        }
    }
}

impl<P> From<&str> for Event<P> {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl<P> From<String> for Event<P> {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Derives a new context from the current context and an event.
///
/// The returned context replaces the previous one wholesale; how payload
/// fields are merged is up to the action.
pub struct Action<C, P> {
    reducer: Arc<dyn Fn(&C, &Event<P>) -> C + Send + Sync>,
}

impl<C, P> Action<C, P> {
    pub fn new<F>(reducer: F) -> Self
    where
        F: Fn(&C, &Event<P>) -> C + Send + Sync + 'static,
    {
        Self {
            reducer: Arc::new(reducer),
        }
    }

    /// Run the action, producing the replacement context.
    pub fn apply(&self, context: &C, event: &Event<P>) -> C {
        (self.reducer)(context, event)
    }
}

impl<C, P> Clone for Action<C, P> {
    fn clone(&self) -> Self {
        Self {
            reducer: Arc::clone(&self.reducer),
        }
    }
}

impl<C, P> fmt::Debug for Action<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Default)]
    struct Tally {
        total: u32,
        last_event: String,
    }

    #[test]
    fn action_receives_context_and_event() {
        let add = Action::new(|ctx: &Tally, event: &Event<u32>| Tally {
            total: ctx.total + event.payload.unwrap_or(0),
            last_event: event.name.clone(),
        });

        let next = add.apply(&Tally::default(), &Event::with_payload("ADD", 5));

        assert_eq!(next.total, 5);
        assert_eq!(next.last_event, "ADD");
    }

    #[test]
    fn action_leaves_input_context_untouched() {
        let reset = Action::new(|_: &Tally, _: &Event<()>| Tally::default());
        let before = Tally {
            total: 9,
            last_event: "ADD".to_string(),
        };

        let after = reset.apply(&before, &Event::new("RESET"));

        assert_eq!(before.total, 9);
        assert_eq!(after, Tally::default());
    }

    #[test]
    fn event_from_string_has_no_payload() {
        let event: Event<u32> = Event::from("CONTINUE".to_string());
        assert_eq!(event.name, "CONTINUE");
        assert_eq!(event.payload, None);
    }
}
