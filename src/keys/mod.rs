//! Modal key dispatch.
//!
//! A [`KeyTable`] maps each state to the keys it understands. A key either
//! switches state (a mode such as `insert`, or a chord prefix such as
//! `g_pressed`) or invokes an [`EditorAction`] on the [`Editor`].
//!
//! States that are neither sticky nor the initial state fall back to the
//! initial state after a period without input. Sticky states (modes) stay
//! until a key leaves them.
//!
//! # Example
//!
//! ```rust
//! use modechart::keys::{Editor, KeyDispatcher, KeyEvent, KeyTable, ManualScheduler};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Buffer {
//!     at_top: bool,
//! }
//!
//! impl Editor for Buffer {
//!     fn start_of_document(&mut self, _event: &KeyEvent) {
//!         self.at_top = true;
//!     }
//! }
//!
//! let mut keys = KeyDispatcher::new(Arc::new(KeyTable::vim()), Buffer::default(), ManualScheduler::new());
//!
//! keys.handle_event(&KeyEvent::new("g"));
//! keys.handle_event(&KeyEvent::new("g"));
//! assert!(keys.editor().at_top);
//!
//! keys.handle_event(&KeyEvent::new("d"));
//! keys.advance(Duration::from_secs(1));
//! assert_eq!(keys.state(), "normal");
//! ```

mod action;
mod binding;
mod command;
mod config;
mod dispatcher;
mod driver;
mod event;
mod timer;

pub use action::{Editor, EditorAction};
pub use binding::{Binding, KeyTable, KeyTableBuilder};
pub use command::CommandBuffer;
pub use config::{DispatcherConfig, DEFAULT_RESET_DELAY_MS};
pub use dispatcher::{Dispatch, KeyDispatcher};
pub use driver::run_dispatcher;
pub use event::{KeyEvent, Modifiers};
pub use timer::{DeadlineScheduler, ManualScheduler, Scheduler, TimerHandle};
