//! Interpreter: runs one instance of a machine definition.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{Context, Event, Payload, RuntimeState, StateHistory, StateTransition};
use crate::machine::definition::MachineDefinition;
use crate::machine::error::{InterpreterError, InterpreterStatus, LifecycleError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Callback invoked with every new runtime state.
pub type Observer<C> = Box<dyn FnMut(&RuntimeState<C>) + Send>;

/// Runs one machine instance: owns its runtime state, context and history.
///
/// Lifecycle is `created → started → stopped`. Events are processed one at
/// a time and to completion; `send` borrows the interpreter mutably, so no
/// two transitions can overlap.
pub struct Interpreter<C: Context, P: Payload> {
    definition: Arc<MachineDefinition<C, P>>,
    status: InterpreterStatus,
    state: RuntimeState<C>,
    history: StateHistory,
    observers: Vec<Observer<C>>,
}

impl<C: Context, P: Payload> Interpreter<C, P> {
    /// Create an interpreter for `definition`. Nothing runs until `start`.
    pub fn new(definition: Arc<MachineDefinition<C, P>>) -> Self {
        let state = definition.initial_state();
        Self {
            definition,
            status: InterpreterStatus::Created,
            state,
            history: StateHistory::new(),
            observers: Vec::new(),
        }
    }

    /// Resume a run from a checkpoint.
    ///
    /// The checkpoint must come from a machine with the same id, and its
    /// state must still be declared. Only the state id, context, event and
    /// `changed` flag are taken from the checkpoint; `is_final` and
    /// `next_events` are derived from `definition`. The resumed interpreter
    /// is already started; observers registered afterwards get the resumed
    /// state.
    pub fn resume(
        definition: Arc<MachineDefinition<C, P>>,
        checkpoint: Checkpoint<C>,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        if checkpoint.machine_id != definition.id() {
            return Err(CheckpointError::MachineMismatch {
                expected: definition.id().to_string(),
                found: checkpoint.machine_id,
            });
        }
        if !definition.contains_state(checkpoint.state.value.as_str()) {
            return Err(CheckpointError::UnknownState {
                machine: definition.id().to_string(),
                state: checkpoint.state.value.to_string(),
            });
        }

        info!(
            machine = %definition.id(),
            checkpoint = %checkpoint.id,
            state = %checkpoint.state.value,
            "Interpreter resumed"
        );

        let stored = checkpoint.state;
        let state = definition.snapshot(stored.value, stored.context, stored.event, stored.changed);

        Ok(Self {
            definition,
            status: InterpreterStatus::Started,
            state,
            history: checkpoint.history,
            observers: Vec::new(),
        })
    }

    /// Start the run and notify observers with the initial state.
    pub fn start(&mut self) -> Result<&RuntimeState<C>, LifecycleError> {
        if self.status != InterpreterStatus::Created {
            return Err(LifecycleError {
                operation: "start",
                status: self.status,
            });
        }

        self.status = InterpreterStatus::Started;
        self.state = self.definition.initial_state();
        info!(
            machine = %self.definition.id(),
            state = %self.state.value,
            "Interpreter started"
        );
        notify(&mut self.observers, &self.state);

        Ok(&self.state)
    }

    /// Process one event to completion.
    ///
    /// On error the runtime state is left exactly as it was. An undeclared
    /// event on a non-strict machine is ignored: the current state is
    /// returned untouched and observers are not notified. Its `event` and
    /// `changed` fields keep describing the last event that was processed.
    pub fn send(&mut self, event: impl Into<Event<P>>) -> Result<&RuntimeState<C>, InterpreterError> {
        let event = event.into();

        if self.status != InterpreterStatus::Started {
            return Err(LifecycleError {
                operation: "send to",
                status: self.status,
            }
            .into());
        }

        let next = match self.definition.transition(&self.state, &event) {
            Ok(next) => next,
            Err(error) => {
                warn!(
                    machine = %self.definition.id(),
                    state = %self.state.value,
                    event = %event.name,
                    %error,
                    "Event rejected"
                );
                return Err(error);
            }
        };

        let Some(next) = next else {
            trace!(
                machine = %self.definition.id(),
                state = %self.state.value,
                event = %event.name,
                "Event ignored"
            );
            return Ok(&self.state);
        };

        debug!(
            machine = %self.definition.id(),
            from = %self.state.value,
            to = %next.value,
            event = %event.name,
            changed = next.changed,
            "Transition"
        );

        self.history = self.history.record(StateTransition {
            from: self.state.value.clone(),
            to: next.value.clone(),
            event: event.name,
            timestamp: Utc::now(),
        });
        self.state = next;
        notify(&mut self.observers, &self.state);

        Ok(&self.state)
    }

    /// Register an observer, called after every completed transition in
    /// registration order.
    ///
    /// Registered before `start`, the observer sees the initial state when
    /// the run starts; registered on a started interpreter, it is called
    /// right away with the current state.
    pub fn on_transition<F>(&mut self, observer: F) -> &mut Self
    where
        F: FnMut(&RuntimeState<C>) + Send + 'static,
    {
        let mut observer: Observer<C> = Box::new(observer);
        if self.status == InterpreterStatus::Started {
            observer(&self.state);
        }
        self.observers.push(observer);
        self
    }

    /// Stop the run. Later `send` and `start` calls fail.
    pub fn stop(&mut self) {
        if self.status == InterpreterStatus::Stopped {
            return;
        }
        self.status = InterpreterStatus::Stopped;
        info!(
            machine = %self.definition.id(),
            state = %self.state.value,
            transitions = self.history.len(),
            "Interpreter stopped"
        );
    }

    /// Current runtime state; the initial state until the run starts.
    pub fn state(&self) -> &RuntimeState<C> {
        &self.state
    }

    pub fn status(&self) -> InterpreterStatus {
        self.status
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn definition(&self) -> &Arc<MachineDefinition<C, P>> {
        &self.definition
    }

    /// Snapshot the run so it can be resumed later.
    pub fn checkpoint(&self) -> Checkpoint<C> {
        Checkpoint::new(
            self.definition.id(),
            self.state.clone(),
            self.history.clone(),
        )
    }
}

fn notify<C: Context>(observers: &mut [Observer<C>], state: &RuntimeState<C>) {
    for observer in observers.iter_mut() {
        observer(state);
    }
}
