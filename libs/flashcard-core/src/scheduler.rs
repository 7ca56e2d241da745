//! Virtual-time one-shot timers.
//!
//! Sessions never sleep. The owner feeds elapsed wall time through
//! [`Scheduler::advance`] and receives the events that came due, in order.

use std::time::Duration;

/// Handle for cancelling a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone)]
struct Pending<E> {
    token: TimerToken,
    due: Duration,
    event: E,
}

/// One-shot timer queue driven by a single tick source.
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: Duration,
    next_token: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_token: 0,
            pending: Vec::new(),
        }
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `after` from now.
    pub fn schedule(&mut self, after: Duration, event: E) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Pending {
            token,
            due: self.now + after,
            event,
        });
        token
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        self.pending.len() != before
    }

    /// Drop every pending event.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move time forward and return the events that came due.
    ///
    /// Events are ordered by deadline, ties broken by scheduling order.
    pub fn advance(&mut self, delta: Duration) -> Vec<E> {
        self.now += delta;
        let now = self.now;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by_key(|p| (p.due, p.token.0));
        due.into_iter().map(|p| p.event).collect()
    }
}
