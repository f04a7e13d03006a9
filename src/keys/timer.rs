//! Timer service used for the dispatcher's inactivity reset.
//!
//! A scheduler only hands out and forgets handles. It never calls back into
//! the dispatcher: whoever drives the event loop asks the scheduler which
//! handles are due and passes each to [`crate::keys::KeyDispatcher::fire_timer`],
//! so a firing timer is just one more serialized event.

use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// Opaque identifier of a scheduled one-shot timer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Platform scheduler abstraction.
pub trait Scheduler {
    /// Schedule a one-shot timer that comes due after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Virtual-clock scheduler for deterministic tests and simulations.
///
/// # Example
///
/// ```rust
/// use modechart::keys::{ManualScheduler, Scheduler};
/// use std::time::Duration;
///
/// let mut scheduler = ManualScheduler::new();
/// let handle = scheduler.schedule_once(Duration::from_millis(1000));
///
/// assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
/// assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![handle]);
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerHandle, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward, returning every timer that came due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<(Duration, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(handle, deadline)| (*deadline, *handle))
            .collect();
        due.sort();

        for (_, handle) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle, self.now + delay);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.remove(&handle);
    }
}

/// Wall-clock scheduler backed by tokio instants.
///
/// Used by [`crate::keys::run_dispatcher`], which sleeps until
/// [`next_deadline`](Self::next_deadline) alongside waiting for key events.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    pending: BTreeMap<TimerHandle, Instant>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending timer and its deadline.
    pub fn next_deadline(&self) -> Option<(TimerHandle, Instant)> {
        self.pending
            .iter()
            .min_by_key(|(_, deadline)| **deadline)
            .map(|(handle, deadline)| (*handle, *deadline))
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due: Vec<(Instant, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(handle, deadline)| (*deadline, *handle))
            .collect();
        due.sort();

        for (_, handle) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle, Instant::now() + delay);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule_once(Duration::from_millis(10));
        let second = scheduler.schedule_once(Duration::from_millis(10));
        assert_ne!(first, second);
        assert_eq!(scheduler.pending_count(), 2);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_once(Duration::from_millis(10));
        scheduler.cancel(handle);

        assert!(!scheduler.is_pending(handle));
        assert!(scheduler.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn advance_returns_due_timers_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule_once(Duration::from_millis(300));
        let early = scheduler.schedule_once(Duration::from_millis(100));
        let never = scheduler.schedule_once(Duration::from_millis(900));

        assert_eq!(scheduler.advance(Duration::from_millis(500)), vec![early, late]);
        assert!(scheduler.is_pending(never));
        assert_eq!(scheduler.now(), Duration::from_millis(500));
    }

    #[test]
    fn fired_timer_is_not_returned_twice() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_once(Duration::ZERO);

        assert_eq!(scheduler.advance(Duration::ZERO), vec![handle]);
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_scheduler_tracks_earliest_timer() {
        let mut scheduler = DeadlineScheduler::new();
        let late = scheduler.schedule_once(Duration::from_millis(500));
        let early = scheduler.schedule_once(Duration::from_millis(100));

        let (next, _) = scheduler.next_deadline().unwrap();
        assert_eq!(next, early);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(scheduler.take_due(Instant::now()), vec![early]);

        scheduler.cancel(late);
        assert!(scheduler.next_deadline().is_none());
    }
}
