// SPDX-License-Identifier: MPL-2.0
//! Real-time timer driver for tokio hosts.
//!
//! Hosts with their own event loop call [`Toaster::tick`] whenever
//! [`Toaster::next_deadline`] passes. Hosts already running tokio can
//! instead await one of the functions below. A `Toaster` is `!Send`, so
//! the driver runs on a current-thread runtime or a
//! [`LocalSet`](tokio::task::LocalSet).
//!
//! Pair the driver with [`TokioClock`](crate::notifications::TokioClock) so
//! toasts follow tokio's clock, including paused test time.

use crate::notifications::Toaster;
use std::future::{self, Future};
use std::time::Instant;
use tracing::trace;

/// Fires due timers until `shutdown` resolves.
pub async fn run_until<F>(toaster: &Toaster, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        toaster.tick();

        tokio::select! {
            () = &mut shutdown => {
                trace!("toast driver shut down");
                break;
            }
            // Something was shown, dismissed or resumed; the earliest
            // deadline may have moved.
            () = toaster.timers_changed() => {}
            () = sleep_until(toaster.next_deadline()) => {}
        }
    }
}

/// Fires due timers forever.
pub async fn run(toaster: &Toaster) {
    run_until(toaster, future::pending()).await;
}

/// Fires due timers until no toast is left.
///
/// Returns immediately when the toaster is already empty. Never returns
/// while a toast that does not auto-dismiss is alive.
pub async fn run_until_idle(toaster: &Toaster) {
    loop {
        toaster.tick();
        if toaster.is_empty() {
            break;
        }

        tokio::select! {
            () = toaster.timers_changed() => {}
            () = sleep_until(toaster.next_deadline()) => {}
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => future::pending().await,
    }
}
