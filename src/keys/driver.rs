//! Async event loop for a dispatcher on the tokio clock.

use crate::keys::action::Editor;
use crate::keys::dispatcher::KeyDispatcher;
use crate::keys::event::KeyEvent;
use crate::keys::timer::DeadlineScheduler;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Drive `dispatcher` from a channel of key events until the channel closes.
///
/// Key events and reset timers are handled one at a time on the calling
/// task. A key that arrives together with a due timer is handled first; the
/// key cancels that timer, so the stale firing is then ignored.
///
/// Returns the dispatcher so callers can inspect the final state.
pub async fn run_dispatcher<E: Editor>(
    mut dispatcher: KeyDispatcher<E, DeadlineScheduler>,
    mut keys: mpsc::Receiver<KeyEvent>,
) -> KeyDispatcher<E, DeadlineScheduler> {
    loop {
        let deadline = dispatcher.scheduler().next_deadline().map(|(_, at)| at);

        tokio::select! {
            biased;

            key = keys.recv() => match key {
                Some(event) => {
                    dispatcher.handle_event(&event);
                }
                None => {
                    trace!("Key channel closed");
                    break;
                }
            },
            _ = wait_until(deadline) => {
                let due = dispatcher.scheduler_mut().take_due(Instant::now());
                for handle in due {
                    dispatcher.fire_timer(handle);
                }
            }
        }
    }

    dispatcher
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
