//! Errors raised while defining a machine.

use thiserror::Error;

/// A single problem found in a machine config.
///
/// `scope` names where the offending handler lives: `state 'welcome'` for
/// per-state handlers, `global` for machine-wide ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("Machine '{machine}' declares no states")]
    NoStates { machine: String },

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial context not specified. Call .context(value) before .build()")]
    MissingContext,

    #[error("Initial state '{initial}' is not declared")]
    UnknownInitialState { initial: String },

    #[error("{scope} handler for '{event}' targets undeclared state '{target}'")]
    UnknownTarget {
        scope: String,
        event: String,
        target: String,
    },

    #[error("{scope} handler for '{event}' uses unregistered guard '{guard}'")]
    UnknownGuard {
        scope: String,
        event: String,
        guard: String,
    },

    #[error("{scope} handler for '{event}' uses unregistered action '{action}'")]
    UnknownAction {
        scope: String,
        event: String,
        action: String,
    },

    #[error("{scope} declares an empty candidate list for '{event}'")]
    EmptyHandler { scope: String, event: String },

    #[error("State '{state}' is not final but handles no events in strict mode")]
    StrictDeadEnd { state: String },
}

/// Errors that can occur when defining a machine.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config failed validation. Every issue found is listed.
    #[error("Invalid machine config: {}", summarize(.issues))]
    Invalid { issues: Vec<ConfigIssue> },

    /// The config could not be read from or written to JSON.
    #[error("Machine config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn single(issue: ConfigIssue) -> Self {
        Self::Invalid {
            issues: vec![issue],
        }
    }

    /// Issues found during validation; empty for JSON errors.
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::Invalid { issues } => issues,
            Self::Json(_) => &[],
        }
    }
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_issue() {
        let error = ConfigError::Invalid {
            issues: vec![
                ConfigIssue::UnknownInitialState {
                    initial: "start".to_string(),
                },
                ConfigIssue::StrictDeadEnd {
                    state: "limbo".to_string(),
                },
            ],
        };

        let message = error.to_string();
        assert!(message.contains("Initial state 'start' is not declared"));
        assert!(message.contains("State 'limbo' is not final"));
        assert_eq!(error.issues().len(), 2);
    }

    #[test]
    fn json_errors_carry_no_issues() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConfigError::from(parse);
        assert!(error.issues().is_empty());
    }
}
