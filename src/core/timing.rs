//! Host-clocked timers and cancellation primitives.
//!
//! Nothing here spawns threads or OS timers. The host passes its current
//! monotonic time (milliseconds) into `poll`, which keeps every delayed
//! transition deterministic and trivially cancellable.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic host time in milliseconds.
pub type Millis = u64;

/// One pending delayed action carrying `T` once it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedTask<T> {
    pending: Option<(Millis, T)>,
}

impl<T> Default for DelayedTask<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DelayedTask<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to fire at `now + delay`, replacing any pending task.
    pub fn schedule(&mut self, now: Millis, delay: Millis, payload: T) {
        self.pending = Some((now.saturating_add(delay), payload));
    }

    /// Drops the pending task. Returns `true` when something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Returns the payload once `now` reached the deadline.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, p)| p),
            _ => None,
        }
    }
}

/// Coalesces bursts of updates into the last value after a quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    delay: Millis,
    task: DelayedTask<T>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Millis) -> Self {
        Self {
            delay,
            task: DelayedTask::new(),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Millis {
        self.delay
    }

    /// Records `value`; the quiet period restarts at `now`.
    pub fn push(&mut self, now: Millis, value: T) {
        self.task.schedule(now, self.delay, value);
    }

    pub fn poll(&mut self, now: Millis) -> Option<T> {
        self.task.poll(now)
    }

    pub fn cancel(&mut self) -> bool {
        self.task.cancel()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.task.is_pending()
    }
}

/// Shared "disposed" flag captured by in-flight work.
///
/// Clones observe the same flag; once cancelled it never resets.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{CancellationToken, Debouncer, DelayedTask};

    #[test]
    fn delayed_task_fires_once_at_deadline() {
        let mut task = DelayedTask::new();
        task.schedule(100, 50, "upgrade");
        assert_eq!(task.poll(149), None);
        assert_eq!(task.poll(150), Some("upgrade"));
        assert_eq!(task.poll(500), None);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut task = DelayedTask::new();
        task.schedule(0, 10, ());
        assert!(task.cancel());
        assert_eq!(task.poll(1_000), None);
    }

    #[test]
    fn debouncer_keeps_last_value_after_quiet_period() {
        let mut debouncer = Debouncer::new(150);
        debouncer.push(0, 1);
        debouncer.push(100, 2);
        assert_eq!(debouncer.poll(200), None);
        debouncer.push(200, 3);
        assert_eq!(debouncer.poll(349), None);
        assert_eq!(debouncer.poll(350), Some(3));
    }

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let captured = token.clone();
        token.cancel();
        assert!(captured.is_cancelled());
    }
}
