//! Modechart: flat state charts for modal input and application orchestration
//!
//! Transition tables are plain serde data. The functions that actions and
//! guards name live in a registry, so a table can be written in JSON,
//! validated as a whole, and shared by any number of running machines.
//!
//! # Core Concepts
//!
//! - **Chart**: a validated table, its action/guard registry and an initial context
//! - **StateMachine**: one running instance of a chart with its own context and history
//! - **Coordinator**: named machines driven side by side
//! - **KeyDispatcher**: a key table driving an [`keys::Editor`], with chord prefixes
//!   that time out and sticky modes that do not
//!
//! # Example
//!
//! ```rust
//! use modechart::lifecycle::{self, application_coordinator};
//! use serde_json::Value;
//!
//! let mut app = application_coordinator().unwrap();
//!
//! app.send("phase", "LOAD", Value::Null).unwrap();
//! app.send("phase", "RUN", Value::Null).unwrap();
//! app.send("environment", "ENTER_DEBUG", Value::Null).unwrap();
//!
//! if app.is_in("phase", "run").unwrap() && app.is_in("environment", "debug").unwrap() {
//!     app.send("runtime", "ACTIVATE", lifecycle::activate("ui")).unwrap();
//! }
//!
//! assert_eq!(app.state("runtime").unwrap(), "active");
//! ```

pub mod builder;
pub mod chart;
pub mod coordinator;
pub mod core;
pub mod keys;
pub mod lifecycle;
pub mod table;

// Re-export commonly used types
pub use builder::{BuildError, ChartBuilder, StateBuilder, TransitionBuilder};
pub use chart::{ActionError, Chart, ChartError, Outcome, Registry, StateMachine};
pub use coordinator::{Coordinator, CoordinatorError};
pub use core::{Context, EventData, StateHistory, StateId, StateTransition};
pub use keys::{Dispatch, Editor, EditorAction, KeyDispatcher, KeyEvent, KeyTable};
pub use table::{StateDefinition, Transition, TransitionTable};
