//! One form session: an interpreter plus whatever displays its steps.

use crate::core::{Event, RuntimeState};
use crate::form::{FormContext, FormPatch, CONTINUE, SET_STATE};
use crate::machine::{Interpreter, InterpreterError, MachineDefinition};
use std::sync::Arc;

/// Displays the step matching a runtime state.
pub trait StepRenderer {
    fn render(&mut self, state: &RuntimeState<FormContext>);
}

impl<F> StepRenderer for F
where
    F: FnMut(&RuntimeState<FormContext>),
{
    fn render(&mut self, state: &RuntimeState<FormContext>) {
        self(state)
    }
}

/// A running form session.
///
/// Owns its interpreter and renderer; nothing is shared with other
/// sessions except the read-only definition.
pub struct FormSession<R: StepRenderer> {
    interpreter: Interpreter<FormContext, FormPatch>,
    renderer: R,
}

impl<R: StepRenderer> FormSession<R> {
    /// Start a session and render its first step.
    pub fn open(
        definition: Arc<MachineDefinition<FormContext, FormPatch>>,
        mut renderer: R,
    ) -> Result<Self, InterpreterError> {
        let mut interpreter = Interpreter::new(definition);
        renderer.render(interpreter.start()?);
        Ok(Self {
            interpreter,
            renderer,
        })
    }

    /// Submit the current step: store its fields, then move on.
    ///
    /// The step is rendered once, after both events are processed. If the
    /// store succeeds but the move fails, the stored fields are kept.
    pub fn submit(&mut self, patch: FormPatch) -> Result<&RuntimeState<FormContext>, InterpreterError> {
        self.interpreter
            .send(Event::with_payload(SET_STATE, patch))?;
        self.interpreter.send(CONTINUE)?;
        let state = self.interpreter.state();
        self.renderer.render(state);
        Ok(state)
    }

    pub fn state(&self) -> &RuntimeState<FormContext> {
        self.interpreter.state()
    }

    pub fn interpreter(&self) -> &Interpreter<FormContext, FormPatch> {
        &self.interpreter
    }

    /// End the session, returning its renderer.
    pub fn close(mut self) -> R {
        self.interpreter.stop();
        self.renderer
    }
}
