//! Typed context and payload of the residency form.

use serde::{Deserialize, Serialize};

/// Value of the context field set before the first step is shown.
pub const INITIAL_CONTEXT_FIELD: &str = "This is a context field that is set by default";

/// Answer to a yes/no question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LivingSituation {
    Stable,
    Unstable,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Everything the form has collected so far.
///
/// Fields stay `None` until the step that asks for them is submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormContext {
    pub initial_context_field: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_state_resident: Option<Answer>,
    pub living_situation: Option<LivingSituation>,
    pub home_address: Option<Address>,
    pub mailing_same_as_home_address: Option<Answer>,
    pub mailing_address: Option<Address>,
}

impl FormContext {
    /// The context a new form session starts with.
    pub fn initial() -> Self {
        Self {
            initial_context_field: Some(INITIAL_CONTEXT_FIELD.to_string()),
            ..Self::default()
        }
    }

    /// Apply a submitted step, field by field.
    ///
    /// Fields present in the patch overwrite the context; absent fields
    /// keep their current value.
    pub fn merge(&self, patch: &FormPatch) -> Self {
        let mut next = self.clone();
        if let Some(first_name) = &patch.first_name {
            next.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            next.last_name = Some(last_name.clone());
        }
        if let Some(answer) = patch.is_state_resident {
            next.is_state_resident = Some(answer);
        }
        if let Some(situation) = patch.living_situation {
            next.living_situation = Some(situation);
        }
        if let Some(address) = &patch.home_address {
            next.home_address = Some(address.clone());
        }
        if let Some(answer) = patch.mailing_same_as_home_address {
            next.mailing_same_as_home_address = Some(answer);
        }
        if let Some(address) = &patch.mailing_address {
            next.mailing_address = Some(address.clone());
        }
        next
    }

    pub fn is_state_resident(&self) -> bool {
        self.is_state_resident == Some(Answer::Yes)
    }

    pub fn has_stable_housing(&self) -> bool {
        self.living_situation == Some(LivingSituation::Stable)
    }

    pub fn mailing_same_as_home_address(&self) -> bool {
        self.mailing_same_as_home_address == Some(Answer::Yes)
    }
}

/// Field values submitted by one form step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_state_resident: Option<Answer>,
    pub living_situation: Option<LivingSituation>,
    pub home_address: Option<Address>,
    pub mailing_same_as_home_address: Option<Answer>,
    pub mailing_address: Option<Address>,
}

impl FormPatch {
    pub fn resident(answer: Answer) -> Self {
        Self {
            is_state_resident: Some(answer),
            ..Self::default()
        }
    }

    pub fn living_situation(situation: LivingSituation) -> Self {
        Self {
            living_situation: Some(situation),
            ..Self::default()
        }
    }

    pub fn home_address(address: Address, mailing_same: Answer) -> Self {
        Self {
            home_address: Some(address),
            mailing_same_as_home_address: Some(mailing_same),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_context_sets_default_field_only() {
        let context = FormContext::initial();
        assert_eq!(
            context.initial_context_field.as_deref(),
            Some(INITIAL_CONTEXT_FIELD)
        );
        assert!(context.is_state_resident.is_none());
        assert!(!context.is_state_resident());
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let context = FormContext::initial().merge(&FormPatch {
            first_name: Some("Ada".to_string()),
            is_state_resident: Some(Answer::No),
            ..FormPatch::default()
        });

        let merged = context.merge(&FormPatch::resident(Answer::Yes));

        assert_eq!(merged.first_name.as_deref(), Some("Ada"));
        assert!(merged.is_state_resident());
        assert_eq!(merged.initial_context_field, context.initial_context_field);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let context = FormContext::initial();
        assert_eq!(context.merge(&FormPatch::default()), context);
    }

    #[test]
    fn guards_read_typed_answers() {
        let context = FormContext::initial()
            .merge(&FormPatch::living_situation(LivingSituation::Stable))
            .merge(&FormPatch::home_address(Address::default(), Answer::No));

        assert!(context.has_stable_housing());
        assert!(!context.mailing_same_as_home_address());
    }

    #[test]
    fn patch_reads_form_field_names() {
        let patch: FormPatch = serde_json::from_str(
            r#"{ "isStateResident": "yes", "livingSituation": "unstable" }"#,
        )
        .unwrap();

        assert_eq!(patch.is_state_resident, Some(Answer::Yes));
        assert_eq!(patch.living_situation, Some(LivingSituation::Unstable));
        assert!(patch.first_name.is_none());
    }
}
