//! Builders for state nodes and transition candidates.

use crate::builder::config::{CandidateConfig, StateKind, StateNodeConfig, TransitionConfig};
use crate::core::StateId;

/// Builder for one transition candidate.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    target: Option<StateId>,
    cond: Option<String>,
    actions: Vec<String>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target state. Leave unset for an actions-only transition.
    pub fn to(mut self, target: impl Into<StateId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Guard the candidate with a named guard.
    pub fn when(mut self, guard: impl Into<String>) -> Self {
        self.cond = Some(guard.into());
        self
    }

    /// Append a named action. Actions run in the order added.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn build(self) -> CandidateConfig {
        CandidateConfig {
            target: self.target,
            cond: self.cond,
            actions: self.actions,
        }
    }
}

impl From<TransitionBuilder> for TransitionConfig {
    fn from(builder: TransitionBuilder) -> Self {
        TransitionConfig::Candidate(builder.build())
    }
}

impl From<Vec<TransitionBuilder>> for TransitionConfig {
    fn from(builders: Vec<TransitionBuilder>) -> Self {
        TransitionConfig::Candidates(builders.into_iter().map(TransitionBuilder::build).collect())
    }
}

/// Builder for a state node.
#[derive(Clone, Debug, Default)]
pub struct StateBuilder {
    node: StateNodeConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the state as final.
    pub fn final_state(mut self) -> Self {
        self.node.kind = StateKind::Final;
        self
    }

    /// Handle `event`. A later call for the same event replaces the handler.
    pub fn on(mut self, event: impl Into<String>, handler: impl Into<TransitionConfig>) -> Self {
        self.node.on.insert(event.into(), handler.into());
        self
    }

    pub fn build(self) -> StateNodeConfig {
        self.node
    }
}

impl From<StateBuilder> for StateNodeConfig {
    fn from(builder: StateBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_builder_sets_fields() {
        let candidate = TransitionBuilder::new()
            .to("review")
            .when("mailingSameAsHomeAddress")
            .action("stamp")
            .action("notify")
            .build();

        assert_eq!(candidate.target, Some(StateId::from("review")));
        assert_eq!(candidate.cond.as_deref(), Some("mailingSameAsHomeAddress"));
        assert_eq!(candidate.actions, vec!["stamp", "notify"]);
    }

    #[test]
    fn targetless_transition_has_only_actions() {
        let candidate = TransitionBuilder::new().action("updateFormState").build();

        assert!(candidate.target.is_none());
        assert!(candidate.cond.is_none());
    }

    #[test]
    fn state_builder_collects_handlers_in_order() {
        let node = StateBuilder::new()
            .on("CONTINUE", "livingSituation")
            .on(
                "BACK",
                vec![
                    TransitionBuilder::new().to("residency").when("cameFromResidency"),
                    TransitionBuilder::new().to("welcome"),
                ],
            )
            .build();

        assert_eq!(
            node.on.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["CONTINUE", "BACK"]
        );
        assert_eq!(node.on["BACK"].candidates().len(), 2);
        assert!(!node.kind.is_final());
    }

    #[test]
    fn final_state_builder() {
        let node = StateBuilder::new().final_state().build();
        assert!(node.kind.is_final());
    }
}
