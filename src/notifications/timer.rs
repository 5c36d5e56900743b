// SPDX-License-Identifier: MPL-2.0
//! Deferred callbacks for toast phase changes.
//!
//! [`TimerQueue`] is a min-heap of deadlines. Every scheduled entry gets a
//! fresh [`TimerToken`]; a record remembers the token it currently expects
//! for each slot. Cancelling removes the entry and forgets the token, and a
//! firing whose token is no longer expected is ignored, so a cancelled timer
//! can never act on a toast.

use super::toast::ToastId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Generation id of one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

#[cfg(test)]
impl TimerToken {
    pub(crate) fn for_tests(raw: u64) -> Self {
        Self(raw)
    }
}

/// Which phase step a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// `Entering → Visible`.
    Enter,
    /// `Visible → Exiting` on expiry.
    AutoDismiss,
    /// `Exiting → removed`.
    Exit,
}

/// A timer whose deadline has passed.
#[derive(Debug, Clone)]
pub struct DueTimer {
    pub deadline: Instant,
    pub token: TimerToken,
    pub id: ToastId,
    pub kind: TimerKind,
}

#[derive(Debug)]
struct Entry {
    deadline: Instant,
    token: TimerToken,
    id: ToastId,
    kind: TimerKind,
}

// Ordered by deadline, ties broken by scheduling order.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.token.cmp(&other.token))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for Entry {}

/// Pending deferred callbacks of one toaster.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_token: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, id: ToastId, kind: TimerKind) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        tracing::trace!(%id, ?kind, token = token.0, "timer scheduled");
        self.heap.push(Reverse(Entry {
            deadline,
            token,
            id,
            kind,
        }));
        token
    }

    /// Pops the earliest entry due at `now`, stale or not.
    pub fn pop_due(&mut self, now: Instant) -> Option<DueTimer> {
        if self.heap.peek()?.0.deadline > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| DueTimer {
            deadline: entry.deadline,
            token: entry.token,
            id: entry.id,
            kind: entry.kind,
        })
    }

    /// Drops the entry scheduled under `token`, if it is still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.heap.len();
        self.heap.retain(|Reverse(entry)| entry.token != token);
        let removed = self.heap.len() != before;
        if removed {
            tracing::trace!(token = token.0, "timer cancelled");
        }
        removed
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

/// Auto-dismiss countdown of one toast.
///
/// Pausing cancels the countdown; resuming restarts the **full** duration
/// rather than the remainder.
#[derive(Debug, Clone)]
pub struct DismissTimer {
    duration: Duration,
    prevented: bool,
    paused: bool,
    token: Option<TimerToken>,
}

impl DismissTimer {
    #[must_use]
    pub fn new(duration: Duration, prevented: bool) -> Self {
        Self {
            duration,
            prevented,
            paused: false,
            token: None,
        }
    }

    fn is_enabled(&self) -> bool {
        !self.prevented && !self.duration.is_zero()
    }

    /// Schedules expiry `duration` after `now`, replacing any pending one.
    ///
    /// No-op when disabled or paused. A duration too large to be represented
    /// as a deadline behaves like zero: the toast never expires.
    pub fn arm(&mut self, timers: &mut TimerQueue, id: &ToastId, now: Instant) -> Option<TimerToken> {
        self.cancel(timers);
        if !self.is_enabled() || self.paused {
            return None;
        }
        let deadline = now.checked_add(self.duration)?;
        let token = timers.schedule(deadline, id.clone(), TimerKind::AutoDismiss);
        self.token = Some(token);
        Some(token)
    }

    /// Returns false if already paused.
    pub fn pause(&mut self, timers: &mut TimerQueue) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        self.cancel(timers);
        true
    }

    /// Returns false if not paused.
    pub fn resume(&mut self, timers: &mut TimerQueue, id: &ToastId, now: Instant) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.arm(timers, id, now);
        true
    }

    pub fn cancel(&mut self, timers: &mut TimerQueue) -> Option<TimerToken> {
        let cancelled = self.token.take();
        if let Some(token) = cancelled {
            timers.cancel(token);
        }
        cancelled
    }

    #[must_use]
    pub fn is_current(&self, token: TimerToken) -> bool {
        self.token == Some(token)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_prevented(&self) -> bool {
        self.prevented
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
