//! Validated, immutable machine definitions.

use crate::builder::{ConfigError, ConfigIssue, Handlers, MachineConfig, StateKind};
use crate::core::{Context, Event, Payload, RuntimeState, StateId, INIT_EVENT};
use crate::machine::error::InterpreterError;
use crate::machine::implementations::Implementations;
use crate::machine::transition::Candidate;
use crate::validation::validate_config;
use indexmap::IndexMap;
use stillwater::validation::Validation;
use tracing::debug;

type ResolvedHandlers<C, P> = IndexMap<String, Vec<Candidate<C, P>>>;

struct ResolvedNode<C, P> {
    kind: StateKind,
    on: ResolvedHandlers<C, P>,
}

/// A machine config bound to its guard and action implementations.
///
/// Construction validates the whole config up front, so unknown states,
/// guards or actions fail here rather than in the middle of a run. Once
/// built, a definition never changes and can be shared through an `Arc` by
/// any number of interpreters, on any number of threads.
pub struct MachineDefinition<C: Context, P: Payload> {
    config: MachineConfig<C>,
    implementations: Implementations<C, P>,
    nodes: IndexMap<StateId, ResolvedNode<C, P>>,
    global: ResolvedHandlers<C, P>,
}

impl<C: Context, P: Payload> MachineDefinition<C, P> {
    /// Validate `config` and bind it to `implementations`.
    ///
    /// Returns [`ConfigError::Invalid`] listing every issue found.
    pub fn new(
        config: MachineConfig<C>,
        implementations: Implementations<C, P>,
    ) -> Result<Self, ConfigError> {
        if let Validation::Failure(issues) = validate_config(&config, &implementations) {
            return Err(ConfigError::Invalid {
                issues: issues.iter().cloned().collect(),
            });
        }

        let mut nodes = IndexMap::with_capacity(config.states.len());
        for (id, node) in &config.states {
            let scope = format!("state '{id}'");
            nodes.insert(
                id.clone(),
                ResolvedNode {
                    kind: node.kind,
                    on: resolve_handlers(&scope, &node.on, &implementations)?,
                },
            );
        }
        let global = resolve_handlers("global", &config.on, &implementations)?;

        debug!(
            machine = %config.id,
            states = nodes.len(),
            strict = config.strict,
            "Machine defined"
        );

        Ok(Self {
            config,
            implementations,
            nodes,
            global,
        })
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    /// The config this definition was built from, e.g. for serialization.
    pub fn config(&self) -> &MachineConfig<C> {
        &self.config
    }

    pub fn implementations(&self) -> &Implementations<C, P> {
        &self.implementations
    }

    /// Declared state ids, in declaration order.
    pub fn state_ids(&self) -> impl Iterator<Item = &StateId> {
        self.nodes.keys()
    }

    pub fn contains_state(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `id` is a declared final state.
    pub fn is_final(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|node| node.kind.is_final())
    }

    /// Events accepted in state `id`: local handlers first, then global
    /// ones. Final states accept only their local handlers.
    pub fn next_events(&self, id: &str) -> Vec<String> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };

        let mut events: Vec<String> = node.on.keys().cloned().collect();
        if !node.kind.is_final() {
            for event in self.global.keys() {
                if !node.on.contains_key(event) {
                    events.push(event.clone());
                }
            }
        }
        events
    }

    /// The state a fresh run starts in.
    pub fn initial_state(&self) -> RuntimeState<C> {
        self.snapshot(
            self.config.initial.clone(),
            self.config.context.clone(),
            INIT_EVENT.to_string(),
            false,
        )
    }

    /// Compute the state that follows `state` on `event` (pure).
    ///
    /// Candidates declared by the active state are tried first, then the
    /// global ones (skipped for final states). The first candidate whose
    /// guard passes, or that has none, wins.
    ///
    /// Returns `Ok(None)` when the event is not declared anywhere and the
    /// machine is not strict.
    pub fn transition(
        &self,
        state: &RuntimeState<C>,
        event: &Event<P>,
    ) -> Result<Option<RuntimeState<C>>, InterpreterError> {
        let node = self
            .nodes
            .get(state.value.as_str())
            .ok_or_else(|| InterpreterError::UnknownState {
                machine: self.config.id.clone(),
                state: state.value.to_string(),
            })?;

        let local = node.on.get(&event.name);
        let global = if node.kind.is_final() {
            None
        } else {
            self.global.get(&event.name)
        };

        if local.is_none() && global.is_none() {
            return if self.config.strict {
                Err(InterpreterError::UnhandledEvent {
                    state: state.value.to_string(),
                    event: event.name.clone(),
                })
            } else {
                Ok(None)
            };
        }

        let candidate = local
            .into_iter()
            .chain(global)
            .flatten()
            .find(|candidate| candidate.can_execute(&state.context))
            .ok_or_else(|| InterpreterError::NoMatchingTransition {
                state: state.value.to_string(),
                event: event.name.clone(),
            })?;

        let context = candidate.apply(&state.context, event);
        let value = candidate
            .target
            .clone()
            .unwrap_or_else(|| state.value.clone());
        let changed = value != state.value || context != state.context;

        Ok(Some(self.snapshot(
            value,
            context,
            event.name.clone(),
            changed,
        )))
    }

    /// Build a runtime state for `value`, deriving `is_final` and
    /// `next_events` from this definition.
    pub(crate) fn snapshot(
        &self,
        value: StateId,
        context: C,
        event: String,
        changed: bool,
    ) -> RuntimeState<C> {
        RuntimeState {
            is_final: self.is_final(value.as_str()),
            next_events: self.next_events(value.as_str()),
            value,
            context,
            event,
            changed,
        }
    }
}

fn resolve_handlers<C: Context, P: Payload>(
    scope: &str,
    handlers: &Handlers,
    implementations: &Implementations<C, P>,
) -> Result<ResolvedHandlers<C, P>, ConfigError> {
    handlers
        .iter()
        .map(|(event, handler)| {
            let candidates = handler
                .candidates()
                .into_iter()
                .map(|candidate| {
                    let guard = match candidate.cond {
                        Some(name) => {
                            let guard = implementations.guard(&name).cloned().ok_or_else(|| {
                                ConfigError::single(ConfigIssue::UnknownGuard {
                                    scope: scope.to_string(),
                                    event: event.clone(),
                                    guard: name.clone(),
                                })
                            })?;
                            Some((name, guard))
                        }
                        None => None,
                    };

                    let actions = candidate
                        .actions
                        .into_iter()
                        .map(|name| {
                            let action = implementations.action(&name).cloned().ok_or_else(|| {
                                ConfigError::single(ConfigIssue::UnknownAction {
                                    scope: scope.to_string(),
                                    event: event.clone(),
                                    action: name.clone(),
                                })
                            })?;
                            Ok((name, action))
                        })
                        .collect::<Result<Vec<_>, ConfigError>>()?;

                    Ok(Candidate {
                        target: candidate.target,
                        guard,
                        actions,
                    })
                })
                .collect::<Result<Vec<_>, ConfigError>>()?;

            Ok((event.clone(), candidates))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateBuilder, TransitionBuilder};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
    struct Checkout {
        paid: bool,
        notes: Vec<String>,
    }

    fn implementations() -> Implementations<Checkout, String> {
        Implementations::new()
            .with_guard("isPaid", |c: &Checkout| c.paid)
            .with_action("pay", |c: &Checkout, _: &Event<String>| Checkout {
                paid: true,
                ..c.clone()
            })
            .with_action("note", |c: &Checkout, e: &Event<String>| {
                let mut next = c.clone();
                next.notes.extend(e.payload.clone());
                next
            })
    }

    fn config(strict: bool) -> MachineConfig<Checkout> {
        let mut states = IndexMap::new();
        states.insert(
            StateId::from("cart"),
            StateBuilder::new()
                .on("PAY", TransitionBuilder::new().action("pay"))
                .on(
                    "CHECKOUT",
                    vec![
                        TransitionBuilder::new().to("shipped").when("isPaid"),
                        TransitionBuilder::new().to("awaitingPayment"),
                    ],
                )
                .build(),
        );
        states.insert(
            StateId::from("awaitingPayment"),
            StateBuilder::new()
                .on("CHECKOUT", TransitionBuilder::new().to("shipped").when("isPaid"))
                .build(),
        );
        states.insert(
            StateId::from("shipped"),
            StateBuilder::new().final_state().build(),
        );

        let mut on = IndexMap::new();
        on.insert("NOTE".to_string(), TransitionBuilder::new().action("note").into());
        on.insert("PAY".to_string(), TransitionBuilder::new().to("shipped").into());

        MachineConfig {
            id: "checkout".to_string(),
            initial: StateId::from("cart"),
            strict,
            context: Checkout::default(),
            states,
            on,
        }
    }

    fn definition(strict: bool) -> MachineDefinition<Checkout, String> {
        MachineDefinition::new(config(strict), implementations()).unwrap()
    }

    #[test]
    fn initial_state_comes_from_config() {
        let initial = definition(true).initial_state();

        assert_eq!(initial.value, "cart");
        assert_eq!(initial.context, Checkout::default());
        assert_eq!(initial.event, INIT_EVENT);
        assert_eq!(initial.event, "stepform.init");
        assert!(!initial.is_final);
        assert!(!initial.changed);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = config(true);
        config.initial = StateId::from("void");

        let result = MachineDefinition::new(config, implementations());

        match result {
            Err(ConfigError::Invalid { issues }) => assert_eq!(
                issues,
                vec![ConfigIssue::UnknownInitialState {
                    initial: "void".to_string()
                }]
            ),
            _ => panic!("Expected invalid config"),
        }
    }

    #[test]
    fn missing_implementation_is_rejected() {
        let result = MachineDefinition::new(config(false), Implementations::<Checkout, String>::new());
        let error = result.err().expect("Expected config error");
        assert_eq!(error.issues().len(), 4);
    }

    #[test]
    fn first_matching_candidate_wins() {
        let definition = definition(true);
        let cart = definition.initial_state();

        let next = definition
            .transition(&cart, &Event::new("CHECKOUT"))
            .unwrap()
            .unwrap();
        assert_eq!(next.value, "awaitingPayment");

        let paid = definition
            .transition(&cart, &Event::new("PAY"))
            .unwrap()
            .unwrap();
        let next = definition
            .transition(&paid, &Event::new("CHECKOUT"))
            .unwrap()
            .unwrap();
        assert_eq!(next.value, "shipped");
        assert!(next.is_final);
    }

    #[test]
    fn local_handler_shadows_global_one() {
        let definition = definition(true);
        let cart = definition.initial_state();

        // local PAY only sets the flag, global PAY would jump to shipped
        let next = definition
            .transition(&cart, &Event::new("PAY"))
            .unwrap()
            .unwrap();

        assert_eq!(next.value, "cart");
        assert!(next.context.paid);
        assert!(next.changed);
    }

    #[test]
    fn global_handler_applies_when_state_is_silent() {
        let definition = definition(true);
        let cart = definition.initial_state();
        let waiting = definition
            .transition(&cart, &Event::new("CHECKOUT"))
            .unwrap()
            .unwrap();

        let next = definition
            .transition(&waiting, &Event::with_payload("NOTE", "leave at door".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(next.value, "awaitingPayment");
        assert_eq!(next.context.notes, vec!["leave at door"]);
    }

    #[test]
    fn global_handler_can_change_state() {
        let definition = definition(true);
        let cart = definition.initial_state();
        let waiting = definition
            .transition(&cart, &Event::new("CHECKOUT"))
            .unwrap()
            .unwrap();

        let next = definition
            .transition(&waiting, &Event::new("PAY"))
            .unwrap()
            .unwrap();
        assert_eq!(next.value, "shipped");
    }

    #[test]
    fn failed_local_guards_fall_through_to_global() {
        let mut config = config(true);
        config
            .on
            .insert("CHECKOUT".to_string(), TransitionBuilder::new().to("cart").into());
        let definition = MachineDefinition::new(config, implementations()).unwrap();
        let mut waiting = definition.initial_state();
        waiting.value = StateId::from("awaitingPayment");

        let next = definition
            .transition(&waiting, &Event::new("CHECKOUT"))
            .unwrap()
            .unwrap();

        assert_eq!(next.value, "cart");
    }

    #[test]
    fn no_passing_guard_is_an_error() {
        let definition = definition(true);
        let cart = definition.initial_state();
        let mut waiting = definition
            .transition(&cart, &Event::new("CHECKOUT"))
            .unwrap()
            .unwrap();
        waiting.context.paid = false;

        let result = definition.transition(&waiting, &Event::new("CHECKOUT"));

        assert_eq!(
            result,
            Err(InterpreterError::NoMatchingTransition {
                state: "awaitingPayment".to_string(),
                event: "CHECKOUT".to_string(),
            })
        );
    }

    #[test]
    fn unhandled_event_depends_on_strictness() {
        let strict = definition(true);
        let result = strict.transition(&strict.initial_state(), &Event::new("CANCEL"));
        assert!(matches!(result, Err(InterpreterError::UnhandledEvent { .. })));

        let lenient = definition(false);
        let result = lenient.transition(&lenient.initial_state(), &Event::new("CANCEL"));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn final_states_ignore_global_handlers() {
        let definition = definition(true);
        let mut shipped = definition.initial_state();
        shipped.value = StateId::from("shipped");

        let result = definition.transition(&shipped, &Event::new("NOTE"));

        assert!(matches!(result, Err(InterpreterError::UnhandledEvent { .. })));
        assert!(definition.next_events("shipped").is_empty());
    }

    #[test]
    fn next_events_lists_local_then_global() {
        let definition = definition(true);
        assert_eq!(definition.next_events("cart"), vec!["PAY", "CHECKOUT", "NOTE"]);
        assert_eq!(
            definition.next_events("awaitingPayment"),
            vec!["CHECKOUT", "NOTE", "PAY"]
        );
    }

    #[test]
    fn unknown_runtime_state_is_reported() {
        let definition = definition(true);
        let mut state = definition.initial_state();
        state.value = StateId::from("lost");

        let result = definition.transition(&state, &Event::new("CHECKOUT"));

        assert!(matches!(result, Err(InterpreterError::UnknownState { .. })));
    }

    #[test]
    fn definition_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MachineDefinition<Checkout, String>>();
    }
}
