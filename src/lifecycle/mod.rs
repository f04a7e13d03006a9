//! Application lifecycle charts.
//!
//! Three independent charts describe a running application:
//!
//! - `phase`: `initialize → load → run → cleanup → initialize`
//! - `runtime`: `idle ⇄ active ⇄ paused`
//! - `environment`: `normal ⇄ debug` and `normal ⇄ mobile`
//!
//! [`application_coordinator`] registers one machine of each under those
//! names. Cross-chart rules are left to the caller, which reads one chart and
//! drives another through the [`Coordinator`].

use crate::builder::{BuildError, ChartBuilder, StateBuilder, TransitionBuilder};
use crate::chart::{ActionError, Chart, StateMachine};
use crate::coordinator::Coordinator;
use crate::core::{Context, EventData};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub const PHASE: &str = "phase";
pub const RUNTIME: &str = "runtime";
pub const ENVIRONMENT: &str = "environment";

/// Startup-to-shutdown phases.
///
/// Context: `progress` (0-100), reset on `LOAD` and updated by `PROGRESS`
/// events while loading (`{ "progress": n }`).
pub fn phase_chart() -> Result<Chart, BuildError> {
    ChartBuilder::new(PHASE)
        .initial("initialize")
        .context(json!({ "progress": 0 }))
        .state(
            StateBuilder::new("initialize")
                .entry("log_phase")
                .on("LOAD", TransitionBuilder::to("load").action("reset_progress")),
        )
        .state(
            StateBuilder::new("load")
                .entry("log_phase")
                .on("PROGRESS", TransitionBuilder::to("load").action("set_progress"))
                .on("RUN", TransitionBuilder::to("run").action("complete_progress")),
        )
        .state(
            StateBuilder::new("run")
                .entry("log_phase")
                .on("CLEANUP", TransitionBuilder::to("cleanup")),
        )
        .state(
            StateBuilder::new("cleanup")
                .entry("log_phase")
                .on("INITIALIZE", TransitionBuilder::to("initialize")),
        )
        .action("log_phase", |_ctx, data| {
            debug!(chart = PHASE, ?data, "Entered phase");
            Ok(())
        })
        .action("reset_progress", |ctx, _| {
            ctx.set("progress", json!(0));
            Ok(())
        })
        .action("set_progress", |ctx, data| {
            if let Some(progress) = data.get("progress").and_then(Value::as_i64) {
                ctx.set("progress", json!(progress.clamp(0, 100)));
            }
            Ok(())
        })
        .action("complete_progress", |ctx, _| {
            ctx.set("progress", json!(100));
            Ok(())
        })
        .build()
}

/// Whether the application is doing work.
///
/// Context: `activeLayer` (set from `ACTIVATE` data) and `operationCount`
/// (incremented on each activation).
pub fn runtime_chart() -> Result<Chart, BuildError> {
    ChartBuilder::new(RUNTIME)
        .initial("idle")
        .context(json!({ "operationCount": 0, "activeLayer": null }))
        .state(StateBuilder::new("idle").on(
            "ACTIVATE",
            TransitionBuilder::to("active")
                .action("set_active_layer")
                .action("count_operation"),
        ))
        .state(
            StateBuilder::new("active")
                .on("PAUSE", TransitionBuilder::to("paused"))
                .on("IDLE", TransitionBuilder::to("idle").action("clear_active_layer")),
        )
        .state(
            StateBuilder::new("paused")
                .on("RESUME", TransitionBuilder::to("active"))
                .on("IDLE", TransitionBuilder::to("idle").action("clear_active_layer")),
        )
        .action("set_active_layer", |ctx, data| {
            if let Some(layer) = data.get("activeLayer") {
                ctx.set("activeLayer", layer.clone());
            }
            Ok(())
        })
        .action("count_operation", |ctx, _| {
            let count = ctx.get_i64("operationCount").unwrap_or(0);
            ctx.set("operationCount", json!(count + 1));
            Ok(())
        })
        .action("clear_active_layer", |ctx, _| {
            ctx.set("activeLayer", Value::Null);
            Ok(())
        })
        .build()
}

/// Display and diagnostics environment.
///
/// Context: `debugMode` (bool) and `screenSize` (`"large"` or `"small"`).
pub fn environment_chart() -> Result<Chart, BuildError> {
    ChartBuilder::new(ENVIRONMENT)
        .initial("normal")
        .context(json!({ "screenSize": "large", "debugMode": false }))
        .state(
            StateBuilder::new("normal")
                .on("ENTER_DEBUG", TransitionBuilder::to("debug").action("enable_debug"))
                .on("ENTER_MOBILE", TransitionBuilder::to("mobile").action("small_screen")),
        )
        .state(
            StateBuilder::new("debug")
                .on("EXIT_DEBUG", TransitionBuilder::to("normal").action("disable_debug")),
        )
        .state(
            StateBuilder::new("mobile")
                .on("EXIT_MOBILE", TransitionBuilder::to("normal").action("large_screen")),
        )
        .action("enable_debug", |ctx, _| set_flag(ctx, "debugMode", json!(true)))
        .action("disable_debug", |ctx, _| set_flag(ctx, "debugMode", json!(false)))
        .action("small_screen", |ctx, _| set_flag(ctx, "screenSize", json!("small")))
        .action("large_screen", |ctx, _| set_flag(ctx, "screenSize", json!("large")))
        .build()
}

fn set_flag(ctx: &mut Context, key: &str, value: Value) -> Result<(), ActionError> {
    ctx.set(key, value);
    Ok(())
}

/// Coordinator holding fresh `phase`, `runtime` and `environment` machines.
pub fn application_coordinator() -> Result<Coordinator, BuildError> {
    Ok(Coordinator::new()
        .with_chart(PHASE, StateMachine::new(Arc::new(phase_chart()?)))
        .with_chart(RUNTIME, StateMachine::new(Arc::new(runtime_chart()?)))
        .with_chart(ENVIRONMENT, StateMachine::new(Arc::new(environment_chart()?))))
}

/// Event payload carrying the layer to activate.
pub fn activate(layer: &str) -> EventData {
    json!({ "activeLayer": layer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Outcome;

    fn machine(chart: Result<Chart, BuildError>) -> StateMachine {
        StateMachine::new(Arc::new(chart.unwrap()))
    }

    #[test]
    fn phase_cycles_back_to_initialize() {
        let mut phase = machine(phase_chart());

        for (event, state) in [
            ("LOAD", "load"),
            ("RUN", "run"),
            ("CLEANUP", "cleanup"),
            ("INITIALIZE", "initialize"),
        ] {
            phase.send(event, Value::Null).unwrap();
            assert_eq!(phase.state(), state);
        }
        assert_eq!(phase.history().len(), 4);
    }

    #[test]
    fn phase_tracks_load_progress() {
        let mut phase = machine(phase_chart());

        phase.send("LOAD", Value::Null).unwrap();
        phase.send("PROGRESS", json!({ "progress": 40 })).unwrap();
        assert_eq!(phase.context().get_i64("progress"), Some(40));

        phase.send("PROGRESS", json!({ "progress": 250 })).unwrap();
        assert_eq!(phase.context().get_i64("progress"), Some(100));

        phase.send("RUN", Value::Null).unwrap();
        assert_eq!(phase.state(), "run");
    }

    #[test]
    fn phase_ignores_out_of_order_events() {
        let mut phase = machine(phase_chart());

        let outcome = phase.send("RUN", Value::Null).unwrap();

        assert!(matches!(outcome, Outcome::NoTransition { .. }));
        assert_eq!(phase.state(), "initialize");
    }

    #[test]
    fn runtime_keeps_layer_across_pause() {
        let mut runtime = machine(runtime_chart());

        runtime.send("ACTIVATE", activate("ui")).unwrap();
        assert_eq!(runtime.state(), "active");
        assert_eq!(runtime.context().get_str("activeLayer"), Some("ui"));

        runtime.send("PAUSE", Value::Null).unwrap();
        assert_eq!(runtime.state(), "paused");

        runtime.send("RESUME", Value::Null).unwrap();
        assert_eq!(runtime.state(), "active");
        assert_eq!(runtime.context().get_str("activeLayer"), Some("ui"));
        assert_eq!(runtime.context().get_i64("operationCount"), Some(1));
    }

    #[test]
    fn runtime_idle_clears_layer() {
        let mut runtime = machine(runtime_chart());

        runtime.send("ACTIVATE", activate("ui")).unwrap();
        runtime.send("IDLE", Value::Null).unwrap();
        runtime.send("ACTIVATE", Value::Null).unwrap();

        assert_eq!(runtime.context().get("activeLayer"), Some(&Value::Null));
        assert_eq!(runtime.context().get_i64("operationCount"), Some(2));
    }

    #[test]
    fn environment_toggles_flags() {
        let mut env = machine(environment_chart());

        env.send("ENTER_DEBUG", Value::Null).unwrap();
        assert_eq!(env.context().get_bool("debugMode"), Some(true));

        let outcome = env.send("ENTER_MOBILE", Value::Null).unwrap();
        assert!(!outcome.is_transitioned());

        env.send("EXIT_DEBUG", Value::Null).unwrap();
        env.send("ENTER_MOBILE", Value::Null).unwrap();
        assert_eq!(env.state(), "mobile");
        assert_eq!(env.context().get_str("screenSize"), Some("small"));
        assert_eq!(env.context().get_bool("debugMode"), Some(false));
    }

    #[test]
    fn coordinator_holds_all_three_charts() {
        let coordinator = application_coordinator().unwrap();

        let names: Vec<_> = coordinator.chart_names().collect();
        assert_eq!(names, vec![ENVIRONMENT, PHASE, RUNTIME]);
        assert_eq!(coordinator.state(PHASE).unwrap(), "initialize");
        assert_eq!(coordinator.state(RUNTIME).unwrap(), "idle");
        assert_eq!(coordinator.state(ENVIRONMENT).unwrap(), "normal");
    }

    #[test]
    fn charts_do_not_affect_each_other() {
        let mut coordinator = application_coordinator().unwrap();
        let runtime_before = coordinator.context(RUNTIME).unwrap().clone();
        let env_before = coordinator.context(ENVIRONMENT).unwrap().clone();

        coordinator.send(PHASE, "LOAD", Value::Null).unwrap();
        coordinator.send(PHASE, "PROGRESS", json!({ "progress": 10 })).unwrap();

        assert_eq!(coordinator.state(RUNTIME).unwrap(), "idle");
        assert_eq!(coordinator.state(ENVIRONMENT).unwrap(), "normal");
        assert_eq!(coordinator.context(RUNTIME).unwrap(), &runtime_before);
        assert_eq!(coordinator.context(ENVIRONMENT).unwrap(), &env_before);
    }

    #[test]
    fn cross_chart_rule_drives_runtime() {
        let mut coordinator = application_coordinator().unwrap();
        coordinator.send(PHASE, "LOAD", Value::Null).unwrap();
        coordinator.send(PHASE, "RUN", Value::Null).unwrap();
        coordinator.send(ENVIRONMENT, "ENTER_DEBUG", Value::Null).unwrap();

        if coordinator.is_in(PHASE, "run").unwrap() && coordinator.is_in(ENVIRONMENT, "debug").unwrap() {
            coordinator.send(RUNTIME, "ACTIVATE", activate("debug-overlay")).unwrap();
        }

        assert_eq!(coordinator.state(RUNTIME).unwrap(), "active");
        assert_eq!(
            coordinator.context(RUNTIME).unwrap().get_str("activeLayer"),
            Some("debug-overlay")
        );
    }
}
