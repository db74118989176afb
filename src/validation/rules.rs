//! Config checks, accumulated with `Validation`.

use crate::builder::{ConfigIssue, Handlers, MachineConfig};
use crate::core::Context;
use crate::machine::Implementations;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of validating a config: success, or every issue found.
pub type ConfigValidation = Validation<(), NonEmptyVec<ConfigIssue>>;

const GLOBAL_SCOPE: &str = "global";

/// Validate a config against its implementations, accumulating ALL issues.
///
/// Checks:
/// - at least one state is declared
/// - the initial state is declared
/// - every target, guard and action named by a handler exists
/// - no handler declares an empty candidate list
/// - in strict mode, no non-final state is a dead end
pub fn validate_config<C: Context, P>(
    config: &MachineConfig<C>,
    implementations: &Implementations<C, P>,
) -> ConfigValidation {
    let mut checks: Vec<ConfigValidation> = Vec::new();

    checks.push(check_has_states(config));
    checks.push(check_initial_state(config));

    for (state, node) in &config.states {
        let scope = format!("state '{state}'");
        checks.extend(check_handlers(&scope, &node.on, config, implementations));
    }
    checks.extend(check_handlers(
        GLOBAL_SCOPE,
        &config.on,
        config,
        implementations,
    ));

    if config.strict {
        checks.push(check_strict_dead_ends(config));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_has_states<C: Context>(config: &MachineConfig<C>) -> ConfigValidation {
    if config.states.is_empty() {
        Validation::fail(ConfigIssue::NoStates {
            machine: config.id.clone(),
        })
    } else {
        Validation::success(())
    }
}

fn check_initial_state<C: Context>(config: &MachineConfig<C>) -> ConfigValidation {
    if config.states.is_empty() || config.states.contains_key(config.initial.as_str()) {
        Validation::success(())
    } else {
        Validation::fail(ConfigIssue::UnknownInitialState {
            initial: config.initial.to_string(),
        })
    }
}

fn check_handlers<C: Context, P>(
    scope: &str,
    handlers: &Handlers,
    config: &MachineConfig<C>,
    implementations: &Implementations<C, P>,
) -> Vec<ConfigValidation> {
    let mut checks = Vec::new();

    for (event, handler) in handlers {
        let candidates = handler.candidates();
        if candidates.is_empty() {
            checks.push(Validation::fail(ConfigIssue::EmptyHandler {
                scope: scope.to_string(),
                event: event.clone(),
            }));
        }

        for candidate in candidates {
            if let Some(target) = &candidate.target {
                if !config.states.contains_key(target.as_str()) {
                    checks.push(Validation::fail(ConfigIssue::UnknownTarget {
                        scope: scope.to_string(),
                        event: event.clone(),
                        target: target.to_string(),
                    }));
                }
            }

            if let Some(guard) = &candidate.cond {
                if implementations.guard(guard).is_none() {
                    checks.push(Validation::fail(ConfigIssue::UnknownGuard {
                        scope: scope.to_string(),
                        event: event.clone(),
                        guard: guard.clone(),
                    }));
                }
            }

            for action in &candidate.actions {
                if implementations.action(action).is_none() {
                    checks.push(Validation::fail(ConfigIssue::UnknownAction {
                        scope: scope.to_string(),
                        event: event.clone(),
                        action: action.clone(),
                    }));
                }
            }
        }
    }

    checks
}

/// A non-final state with no local handlers, in a machine without global
/// handlers, rejects every event it could ever receive.
fn check_strict_dead_ends<C: Context>(config: &MachineConfig<C>) -> ConfigValidation {
    let checks: Vec<ConfigValidation> = config
        .states
        .iter()
        .filter(|(_, node)| !node.kind.is_final() && node.on.is_empty() && config.on.is_empty())
        .map(|(state, _)| {
            Validation::fail(ConfigIssue::StrictDeadEnd {
                state: state.to_string(),
            })
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}
