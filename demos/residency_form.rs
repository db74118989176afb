//! Residency Form
//!
//! This example walks one applicant through the residency form.
//!
//! Key concepts:
//! - A strict machine loaded from its JSON config
//! - `SET_STATE` stores each step's fields, `CONTINUE` moves on
//! - A console renderer standing in for a UI
//! - Checkpointing a half-finished session
//!
//! Run with: cargo run --example residency_form
//!
//! Set `STEPFORM_LOG` (e.g. `STEPFORM_LOG=trace`) to change log verbosity.

use std::sync::Arc;
use stepform::builder::MachineConfig;
use stepform::checkpoint::Checkpoint;
use stepform::core::{Event, RuntimeState};
use stepform::form::{
    form_config, form_implementations, Address, Answer, FormContext, FormPatch, FormSession,
    LivingSituation, StepRenderer, CONTINUE, SET_STATE,
};
use stepform::machine::{Interpreter, MachineDefinition};
use tracing_subscriber::EnvFilter;

struct ConsoleRenderer {
    steps: usize,
}

impl StepRenderer for ConsoleRenderer {
    fn render(&mut self, state: &RuntimeState<FormContext>) {
        self.steps += 1;
        let title = match state.value.as_str() {
            "welcome" => "Welcome",
            "residency" => "Are you a resident of this state?",
            "profile" => "Tell us about yourself",
            "livingSituation" => "Is your housing stable?",
            "homeAddress" => "Home address",
            "mailingAddress" => "Mailing address",
            "nonResident" => "Sorry, this form is for residents only",
            "review" => "Review your answers",
            other => other,
        };
        println!("\n[{}] {title}", self.steps);
        println!("  accepts: {:?}", state.next_events);
        if state.is_final {
            println!("  (final step)");
        }
        match serde_json::to_string_pretty(&state.context) {
            Ok(json) => println!("  context: {json}"),
            Err(e) => println!("  context unavailable: {e}"),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("STEPFORM_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    println!("=== Residency Form ===");

    // The config travels as JSON; the guards and actions stay in code.
    let json = form_config().to_json()?;
    let config: MachineConfig<FormContext> = MachineConfig::from_json(&json)?;
    let definition = Arc::new(MachineDefinition::new(config, form_implementations())?);

    let mut session = FormSession::open(Arc::clone(&definition), ConsoleRenderer { steps: 0 })?;

    session.submit(FormPatch::default())?;
    session.submit(FormPatch::resident(Answer::Yes))?;
    session.submit(FormPatch {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        ..FormPatch::default()
    })?;
    session.submit(FormPatch::living_situation(LivingSituation::Stable))?;

    // Save mid-form, then pick up where we left off.
    let checkpoint = session.interpreter().checkpoint();
    println!("\nCheckpoint {} at {}", checkpoint.id, checkpoint.state.value);
    let saved = checkpoint.to_json()?;
    let mut renderer = session.close();

    let mut resumed = Interpreter::resume(Arc::clone(&definition), Checkpoint::from_json(&saved)?)?;
    resumed.on_transition(move |state| renderer.render(state));

    resumed.send(Event::with_payload(
        SET_STATE,
        FormPatch::home_address(
            Address {
                street: "12 Crescent Rd".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62704".to_string(),
            },
            Answer::Yes,
        ),
    ))?;
    let finished = resumed.send(CONTINUE)?.value.clone();
    println!("\nFinished in {finished} ({} steps recorded)", resumed.history().len());

    // The review step is final; the strict machine refuses anything else.
    if let Err(e) = resumed.send(CONTINUE) {
        println!("Rejected as expected: {e}");
    }

    resumed.stop();
    Ok(())
}
