//! Serializable machine config.
//!
//! The config is plain data: it names guards and actions but does not hold
//! them. Pairing a config with its implementations happens in
//! [`MachineDefinition::new`](crate::machine::MachineDefinition::new).
//!
//! Unknown keys are rejected, so a misspelled `cond` cannot silently
//! become an unguarded candidate. The JSON shape accepts the usual
//! shorthands:
//!
//! ```json
//! {
//!   "id": "form",
//!   "strict": true,
//!   "initial": "welcome",
//!   "context": {},
//!   "states": {
//!     "welcome": { "on": { "CONTINUE": "residency" } },
//!     "residency": {
//!       "on": {
//!         "CONTINUE": [
//!           { "target": "profile", "cond": "isStateResident" },
//!           { "target": "nonResident" }
//!         ]
//!       }
//!     },
//!     "nonResident": { "type": "final" }
//!   },
//!   "on": { "SET_STATE": { "actions": "updateFormState" } }
//! }
//! ```

use crate::builder::error::ConfigError;
use crate::core::{Context, StateId};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Event name to handler, in declaration order.
pub type Handlers = IndexMap<String, TransitionConfig>;

/// Complete description of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "", deny_unknown_fields)]
pub struct MachineConfig<C: Context> {
    pub id: String,
    pub initial: StateId,
    /// Reject events the active state does not declare instead of ignoring them
    #[serde(default)]
    pub strict: bool,
    pub context: C,
    pub states: IndexMap<StateId, StateNodeConfig>,
    /// Machine-wide handlers, consulted after the active state's own
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub on: Handlers,
}

impl<C: Context> MachineConfig<C> {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Atomic,
    Final,
}

impl StateKind {
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final)
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Self::Atomic)
    }
}

/// One state node: its kind and the events it handles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateNodeConfig {
    #[serde(rename = "type", default, skip_serializing_if = "StateKind::is_atomic")]
    pub kind: StateKind,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub on: Handlers,
}

/// Handler for one event.
///
/// Variant order matters for untagged deserialization: a JSON array must be
/// tried as a candidate list before a single candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitionConfig {
    /// Unconditional transition to a state
    Target(StateId),
    /// Candidates evaluated in declared order, first match wins
    Candidates(Vec<CandidateConfig>),
    Candidate(CandidateConfig),
}

impl TransitionConfig {
    /// Normalize to the ordered candidate list.
    pub fn candidates(&self) -> Vec<CandidateConfig> {
        match self {
            Self::Target(target) => vec![CandidateConfig {
                target: Some(target.clone()),
                ..CandidateConfig::default()
            }],
            Self::Candidates(candidates) => candidates.clone(),
            Self::Candidate(candidate) => vec![candidate.clone()],
        }
    }
}

impl From<&str> for TransitionConfig {
    fn from(target: &str) -> Self {
        Self::Target(StateId::from(target))
    }
}

impl From<CandidateConfig> for TransitionConfig {
    fn from(candidate: CandidateConfig) -> Self {
        Self::Candidate(candidate)
    }
}

impl From<Vec<CandidateConfig>> for TransitionConfig {
    fn from(candidates: Vec<CandidateConfig>) -> Self {
        Self::Candidates(candidates)
    }
}

/// A possible transition: where to go, when, and what to run on the way.
///
/// Without a target the machine stays in its current state and only the
/// actions run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<StateId>,
    #[serde(default, alias = "guard", skip_serializing_if = "Option::is_none")]
    pub cond: Option<String>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub actions: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(action) => vec![action],
        OneOrMany::Many(actions) => actions,
    })
}
