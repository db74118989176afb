//! The residency application form.
//!
//! A strict machine walking an applicant through
//! `welcome → residency → profile → livingSituation → homeAddress → review`,
//! branching to `nonResident` and `mailingAddress` on their answers. Each
//! step submits its fields with a global `SET_STATE` event, then moves on
//! with `CONTINUE`.

mod context;
mod session;

pub use context::{Address, Answer, FormContext, FormPatch, LivingSituation, INITIAL_CONTEXT_FIELD};
pub use session::{FormSession, StepRenderer};

use crate::builder::{ConfigError, MachineConfig, StateBuilder, TransitionBuilder};
use crate::core::{Event, StateId};
use crate::machine::{Implementations, MachineDefinition};
use indexmap::IndexMap;

pub const MACHINE_ID: &str = "form";

pub const CONTINUE: &str = "CONTINUE";
pub const SET_STATE: &str = "SET_STATE";

pub const IS_STATE_RESIDENT: &str = "isStateResident";
pub const HAS_STABLE_HOUSING: &str = "hasStableHousing";
pub const MAILING_SAME_AS_HOME_ADDRESS: &str = "mailingSameAsHomeAddress";
pub const UPDATE_FORM_STATE: &str = "updateFormState";

/// The form's state graph.
pub fn form_config() -> MachineConfig<FormContext> {
    let states: IndexMap<StateId, _> = [
        ("welcome", StateBuilder::new().on(CONTINUE, "residency")),
        (
            "residency",
            StateBuilder::new().on(
                CONTINUE,
                vec![
                    TransitionBuilder::new().to("profile").when(IS_STATE_RESIDENT),
                    TransitionBuilder::new().to("nonResident"),
                ],
            ),
        ),
        ("profile", StateBuilder::new().on(CONTINUE, "livingSituation")),
        (
            "livingSituation",
            StateBuilder::new().on(
                CONTINUE,
                vec![
                    TransitionBuilder::new().to("homeAddress").when(HAS_STABLE_HOUSING),
                    TransitionBuilder::new().to("mailingAddress"),
                ],
            ),
        ),
        (
            "homeAddress",
            StateBuilder::new().on(
                CONTINUE,
                vec![
                    TransitionBuilder::new()
                        .to("review")
                        .when(MAILING_SAME_AS_HOME_ADDRESS),
                    TransitionBuilder::new().to("mailingAddress"),
                ],
            ),
        ),
        ("mailingAddress", StateBuilder::new()),
        ("nonResident", StateBuilder::new().final_state()),
        ("review", StateBuilder::new().final_state()),
    ]
    .into_iter()
    .map(|(id, node)| (StateId::from(id), node.build()))
    .collect();

    let mut on = IndexMap::new();
    on.insert(
        SET_STATE.to_string(),
        TransitionBuilder::new().action(UPDATE_FORM_STATE).into(),
    );

    MachineConfig {
        id: MACHINE_ID.to_string(),
        initial: StateId::from("welcome"),
        strict: true,
        context: FormContext::initial(),
        states,
        on,
    }
}

/// Guards and actions named by [`form_config`].
pub fn form_implementations() -> Implementations<FormContext, FormPatch> {
    Implementations::new()
        .with_guard(IS_STATE_RESIDENT, FormContext::is_state_resident)
        .with_guard(HAS_STABLE_HOUSING, FormContext::has_stable_housing)
        .with_guard(
            MAILING_SAME_AS_HOME_ADDRESS,
            FormContext::mailing_same_as_home_address,
        )
        .with_action(UPDATE_FORM_STATE, update_form_state)
}

/// Build the form machine definition.
pub fn form_machine() -> Result<MachineDefinition<FormContext, FormPatch>, ConfigError> {
    MachineDefinition::new(form_config(), form_implementations())
}

fn update_form_state(context: &FormContext, event: &Event<FormPatch>) -> FormContext {
    match &event.payload {
        Some(patch) => context.merge(patch),
        None => context.clone(),
    }
}
