//! Modal key dispatcher.

use crate::core::StateId;
use crate::keys::action::{Editor, EditorAction};
use crate::keys::binding::{Binding, KeyTable};
use crate::keys::command::CommandBuffer;
use crate::keys::config::DispatcherConfig;
use crate::keys::event::KeyEvent;
use crate::keys::timer::{ManualScheduler, Scheduler, TimerHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// What a single key press did.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Dispatch {
    /// The key switched the dispatcher into a state
    Entered(StateId),
    /// The key invoked an editor action
    Performed(EditorAction),
    /// Nothing matched; the dispatcher fell back to its initial state
    Unmatched { state: StateId, key: String },
}

/// Drives an [`Editor`] from key events through a [`KeyTable`].
///
/// Invariants:
/// - the current state is always a state of the table;
/// - at most one reset timer is pending, and every key event cancels it
///   before doing anything else;
/// - sticky states never time out and survive actions.
pub struct KeyDispatcher<E, S = ManualScheduler> {
    table: Arc<KeyTable>,
    current: StateId,
    pending_reset: Option<TimerHandle>,
    commands: CommandBuffer,
    editor: E,
    scheduler: S,
    config: DispatcherConfig,
}

impl<E: Editor, S: Scheduler> KeyDispatcher<E, S> {
    /// Create a dispatcher in the table's initial state.
    pub fn new(table: Arc<KeyTable>, editor: E, scheduler: S) -> Self {
        Self {
            current: table.initial().clone(),
            table,
            pending_reset: None,
            commands: CommandBuffer::new(),
            editor,
            scheduler,
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Process one key press.
    pub fn handle_event(&mut self, event: &KeyEvent) -> Dispatch {
        self.cancel_pending_reset();

        let key = event.label();
        let binding = self.table.lookup(self.current.name(), key).cloned();

        let dispatch = match binding {
            None => {
                debug!(key, state = %self.current, "No action for key in state");
                let state = self.current.clone();
                self.return_to_initial();
                Dispatch::Unmatched {
                    state,
                    key: key.to_string(),
                }
            }
            Some(Binding::State(target)) => {
                debug!(key, from = %self.current, to = %target, "Transitioned to state");
                self.current = target.clone();
                Dispatch::Entered(target)
            }
            Some(Binding::Action(action)) => {
                debug!(key, state = %self.current, %action, "Performing action");
                action.invoke(&mut self.editor, event, &mut self.commands);
                if !self.is_sticky() {
                    self.return_to_initial();
                }
                Dispatch::Performed(action)
            }
        };

        if !self.is_sticky() {
            self.schedule_reset();
        }

        dispatch
    }

    /// Deliver a fired timer.
    ///
    /// Only the live pending timer resets the dispatcher; stale handles are
    /// ignored. Returns whether the handle was live.
    pub fn fire_timer(&mut self, handle: TimerHandle) -> bool {
        if self.pending_reset != Some(handle) {
            trace!(timer = handle.id(), "Ignoring stale reset timer");
            return false;
        }
        self.pending_reset = None;
        if self.current != *self.table.initial() {
            debug!(from = %self.current, "State reset due to timeout");
            self.return_to_initial();
        }
        true
    }

    /// Return to the initial state immediately and drop any pending timer.
    pub fn reset(&mut self) {
        self.cancel_pending_reset();
        self.return_to_initial();
    }

    fn return_to_initial(&mut self) {
        if self.current != *self.table.initial() {
            self.current = self.table.initial().clone();
        }
    }

    fn cancel_pending_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Arm the inactivity timer for the current state.
    ///
    /// Nothing is scheduled in the initial state, where a reset is a no-op.
    fn schedule_reset(&mut self) {
        if self.current == *self.table.initial() {
            return;
        }
        let delay = self.reset_delay_for_current();
        let handle = self.scheduler.schedule_once(delay);
        trace!(timer = handle.id(), state = %self.current, ?delay, "Scheduled reset");
        self.pending_reset = Some(handle);
    }

    fn reset_delay_for_current(&self) -> Duration {
        if self.table.is_transient(self.current.name()) {
            self.config.chord_timeout()
        } else {
            self.config.reset_delay()
        }
    }

    pub fn state(&self) -> &StateId {
        &self.current
    }

    pub fn is_in(&self, state: &str) -> bool {
        self.current == state
    }

    /// Whether the current state is sticky.
    pub fn is_sticky(&self) -> bool {
        self.table.is_sticky(self.current.name())
    }

    pub fn pending_reset(&self) -> Option<TimerHandle> {
        self.pending_reset
    }

    pub fn command_buffer(&self) -> &str {
        self.commands.as_str()
    }

    pub fn table(&self) -> &Arc<KeyTable> {
        &self.table
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn into_editor(self) -> E {
        self.editor
    }
}

impl<E: Editor> KeyDispatcher<E, ManualScheduler> {
    /// Advance the virtual clock and deliver every timer that came due.
    ///
    /// Returns how many delivered timers were live.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.scheduler.advance(by);
        due.into_iter().filter(|h| self.fire_timer(*h)).count()
    }
}
