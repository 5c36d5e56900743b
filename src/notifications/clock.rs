// SPDX-License-Identifier: MPL-2.0
//! Time sources for the toaster.
//!
//! The toaster never reads the system clock directly. Hosts pick a
//! [`Clock`]: [`SystemClock`] for plain event loops, [`TokioClock`] when the
//! [`driver`](crate::driver) runs the timers, and [`ManualClock`] for tests
//! and deterministic replays.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Reads the tokio clock, so paused test runtimes drive toasts too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one clone and hand the
/// other to the toaster.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Moves the clock forward and returns the new time.
    ///
    /// A step past the platform's `Instant` range leaves the clock unchanged.
    pub fn advance(&self, by: Duration) -> Instant {
        let current = self.now.get();
        let next = current.checked_add(by).unwrap_or(current);
        self.now.set(next);
        next
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), start + Duration::from_millis(250));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let shared = clock.clone();
        let moved_to = clock.advance(Duration::from_secs(1));
        assert_eq!(shared.now(), moved_to);
    }

    #[test]
    fn manual_clock_ignores_overflowing_steps() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.advance(Duration::MAX), start);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
