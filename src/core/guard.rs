//! Guard predicates for choosing between transition candidates.
//!
//! Guards are pure boolean functions over the machine context. They never
//! see the event payload; anything a guard needs must first be written into
//! the context by an action.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition candidate applies.
///
/// # Example
///
/// ```rust
/// use stepform::core::Guard;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Applicant {
///     resident: bool,
/// }
///
/// let is_resident = Guard::new(|ctx: &Applicant| ctx.resident);
///
/// assert!(is_resident.check(&Applicant { resident: true }));
/// assert!(!is_resident.check(&Applicant { resident: false }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync),
    /// since one definition may be shared by interpreters on several threads.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
