//! Drive the phase, runtime and environment charts side by side.
//!
//! Run with `RUST_LOG=modechart=debug cargo run --example orchestration`.

use modechart::coordinator::{Coordinator, CoordinatorError};
use modechart::lifecycle::{self, application_coordinator, ENVIRONMENT, PHASE, RUNTIME};
use modechart::BuildError;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

fn print_states(app: &Coordinator) {
    let states: Vec<String> = app
        .states()
        .into_iter()
        .map(|(name, state)| format!("{name}={state}"))
        .collect();
    println!("  [{}]", states.join(", "));
}

/// Activate the debug overlay when the app is running in debug mode.
fn apply_debug_overlay(app: &mut Coordinator) -> Result<(), CoordinatorError> {
    if app.is_in(PHASE, "run")? && app.is_in(ENVIRONMENT, "debug")? && app.is_in(RUNTIME, "idle")? {
        app.send(RUNTIME, "ACTIVATE", lifecycle::activate("debug-overlay"))?;
    }
    Ok(())
}

fn run() -> Result<(), DemoError> {
    let mut app = application_coordinator()?;
    print_states(&app);

    let script: [(&str, &str, Value); 6] = [
        (PHASE, "LOAD", Value::Null),
        (PHASE, "PROGRESS", json!({ "progress": 60 })),
        (PHASE, "RUN", Value::Null),
        (ENVIRONMENT, "ENTER_DEBUG", Value::Null),
        (RUNTIME, "PAUSE", Value::Null),
        (PHASE, "CLEANUP", Value::Null),
    ];

    for (chart, event, data) in script {
        let outcome = app.send(chart, event, data)?;
        println!("{chart}.{event}: {outcome:?}");
        apply_debug_overlay(&mut app)?;
        print_states(&app);
    }

    println!("runtime context: {:?}", app.context(RUNTIME)?);
    println!("environment context: {:?}", app.context(ENVIRONMENT)?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("orchestration failed: {err}");
        std::process::exit(1);
    }
}
