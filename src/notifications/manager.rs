// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! [`Toaster`] is the public facade: it creates toasts, dismisses them,
//! drives their timers and tells subscribers about every change. It is a
//! cheap `Clone` handle; clones share one registry.
//!
//! User code (`on_close`, action callbacks, subscribers) always runs with no
//! internal borrow held, so it may call back into the toaster.

use super::clock::{Clock, SystemClock};
use super::registry::Registry;
use super::timer::{DueTimer, TimerKind, TimerQueue};
use super::toast::{
    DismissReason, OnClose, Phase, ToastId, ToastOptions, ToastRecord, ToastSnapshot, Variant,
};
use super::view::{OverlayView, Position};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::notifications::DefaultDuration;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Instant;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;
use tracing::{debug, error};

/// Runtime settings of a toaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToasterConfig {
    /// Applied when a toast does not set its own duration.
    pub default_duration: DefaultDuration,
    pub position: Position,
}

/// User interactions a renderer forwards to the toaster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Close control activated.
    Dismiss(ToastId),
    /// Action control activated.
    ActivateAction(ToastId),
    /// Pointer entered the toast surface.
    PointerEntered(ToastId),
    /// Pointer left the toast surface.
    PointerLeft(ToastId),
    /// Fire every timer due at the clock's current time.
    Tick,
}

/// Returned by [`Toaster::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[ToastSnapshot])>;

/// Handle to one toast registry and its timers.
#[derive(Clone)]
pub struct Toaster {
    inner: Rc<Inner>,
}

struct Inner {
    state: RefCell<State>,
    subscribers: RefCell<Subscribers>,
    clock: Box<dyn Clock>,
    timers_changed: Notify,
}

struct State {
    registry: Registry,
    timers: TimerQueue,
    config: ToasterConfig,
    diagnostics: Option<DiagnosticsHandle>,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Subscriber)>,
    /// Unsubscribed while a notification round had the entries checked out.
    removed: Vec<SubscriptionId>,
    notifying: bool,
    dirty: bool,
}

/// Work deferred until the state borrow is released.
#[derive(Default)]
struct Effects {
    changed: bool,
    rescheduled: bool,
    closed: Vec<(ToastId, Option<OnClose>)>,
}

impl State {
    fn log(&self, record: impl FnOnce(&DiagnosticsHandle)) {
        if let Some(handle) = &self.diagnostics {
            record(handle);
        }
    }

    fn begin_exit(
        &mut self,
        id: &ToastId,
        now: Instant,
        reason: DismissReason,
        fx: &mut Effects,
    ) -> bool {
        let Some(record) = self.registry.get_mut(id) else {
            return false;
        };
        if !record.begin_exit(&mut self.timers, now) {
            return false;
        }
        debug!(%id, ?reason, "toast exiting");
        self.log(|d| {
            d.log_dismissed(id, reason);
            d.log_phase(id, Phase::Exiting);
        });
        fx.changed = true;
        fx.rescheduled = true;
        true
    }

    fn pause(&mut self, id: &ToastId, fx: &mut Effects) {
        let paused = match self.registry.get_mut(id) {
            Some(record) => record.pause(&mut self.timers),
            None => false,
        };
        if paused {
            debug!(%id, "toast paused");
            self.log(|d| d.log(DiagnosticEventKind::Paused { id: id.clone() }));
            fx.changed = true;
        }
    }

    fn resume(&mut self, id: &ToastId, now: Instant, fx: &mut Effects) {
        let resumed = match self.registry.get_mut(id) {
            Some(record) => record.resume(&mut self.timers, now),
            None => false,
        };
        if resumed {
            debug!(%id, "toast resumed");
            self.log(|d| d.log(DiagnosticEventKind::Resumed { id: id.clone() }));
            fx.changed = true;
            fx.rescheduled = true;
        }
    }

    /// Applies one due timer. Stale tokens are ignored.
    fn fire(&mut self, due: DueTimer, fx: &mut Effects) {
        let DueTimer {
            deadline,
            token,
            id,
            kind,
        } = due;

        match kind {
            TimerKind::Enter => {
                let entered = self
                    .registry
                    .get_mut(&id)
                    .is_some_and(|record| record.finish_entering(token));
                if entered {
                    debug!(%id, "toast visible");
                    self.log(|d| d.log_phase(&id, Phase::Visible));
                    fx.changed = true;
                }
            }
            TimerKind::AutoDismiss => {
                let expired = self
                    .registry
                    .get(&id)
                    .is_some_and(|record| record.is_expiry_current(token));
                if expired {
                    self.begin_exit(&id, deadline, DismissReason::Expired, fx);
                }
            }
            TimerKind::Exit => {
                let due_now = self
                    .registry
                    .get(&id)
                    .is_some_and(|record| record.is_exit_due(token));
                if due_now {
                    if let Some(record) = self.registry.remove(&id) {
                        debug!(%id, "toast removed");
                        self.log(|d| d.log_removed(&id));
                        fx.closed.push(record.into_on_close());
                        fx.changed = true;
                    }
                }
            }
        }
    }
}

impl Toaster {
    pub fn new(config: ToasterConfig, clock: impl Clock + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State {
                    registry: Registry::new(),
                    timers: TimerQueue::new(),
                    config,
                    diagnostics: None,
                }),
                subscribers: RefCell::new(Subscribers::default()),
                clock: Box::new(clock),
                timers_changed: Notify::new(),
            }),
        }
    }

    /// Default configuration on the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::new(ToasterConfig::default(), clock)
    }

    #[must_use]
    pub fn config(&self) -> ToasterConfig {
        self.inner.state.borrow().config
    }

    /// Logs lifecycle events to a diagnostics collector from now on.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.inner.state.borrow_mut().diagnostics = Some(handle);
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.inner.clock.now()
    }

    // ----------------------------------------------------------------------
    // Creation
    // ----------------------------------------------------------------------

    /// Shows a toast and returns its id.
    ///
    /// The toast starts in [`Phase::Entering`], becomes visible after the
    /// entrance delay and, unless auto-dismiss is disabled, starts exiting
    /// once its duration has elapsed.
    pub fn show(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        let message = message.into();
        self.update(self.now(), move |state, now, fx| {
            let default_duration = state.config.default_duration.as_duration();
            let mut record = ToastRecord::new(message, options, default_duration, now);
            record.schedule_entrance(&mut state.timers, now);
            record.arm(&mut state.timers, now);

            let id = record.id().clone();
            let variant = record.variant();
            debug!(%id, %variant, action = record.has_action(), "toast shown");
            state.log(|d| d.log_shown(&id, variant));
            state.registry.insert(record);

            fx.changed = true;
            fx.rescheduled = true;
            id
        })
    }

    pub fn success(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, options.variant(Variant::Success))
    }

    pub fn error(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, options.variant(Variant::Error))
    }

    pub fn warning(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, options.variant(Variant::Warning))
    }

    pub fn info(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, options.variant(Variant::Info))
    }

    // ----------------------------------------------------------------------
    // Dismissal
    // ----------------------------------------------------------------------

    /// Starts the exit of a toast. Unknown or already exiting ids are ignored.
    pub fn dismiss(&self, id: &ToastId) {
        self.dismiss_with(id, DismissReason::Manual);
    }

    /// Starts the exit of every live toast. Each one still waits out its
    /// own exit delay; toasts shown afterwards are unaffected.
    pub fn dismiss_all(&self) {
        self.update(self.now(), |state, now, fx| {
            for id in state.registry.ids() {
                state.begin_exit(&id, now, DismissReason::DismissAll, fx);
            }
        });
    }

    /// Removes every toast immediately, skipping exit delays.
    ///
    /// Each removed toast's `on_close` still runs once.
    pub fn clear(&self) {
        self.update(self.now(), |state, _, fx| {
            let removed = state.registry.clear();
            state.timers.clear();
            if removed.is_empty() {
                return;
            }
            debug!(count = removed.len(), "toasts cleared");
            let count = removed.len();
            state.log(|d| d.log(DiagnosticEventKind::Cleared { count }));
            fx.closed
                .extend(removed.into_iter().map(ToastRecord::into_on_close));
            fx.changed = true;
            fx.rescheduled = true;
        });
    }

    /// Runs the toast's action callback, then dismisses the toast.
    ///
    /// The dismissal happens even if the callback panics; the panic is
    /// logged and then resumed so it reaches the host's panic handling.
    /// Does nothing for toasts without an action or already exiting.
    pub fn activate_action(&self, id: &ToastId) {
        let callback = self
            .inner
            .state
            .borrow_mut()
            .registry
            .get_mut(id)
            .and_then(ToastRecord::take_action_callback);
        let Some(mut callback) = callback else {
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback()));
        self.dismiss_with(id, DismissReason::Action);

        if let Err(payload) = outcome {
            let message = panic_message(payload.as_ref());
            error!(%id, %message, "toast action panicked");
            self.inner.state.borrow().log(|d| {
                d.log(DiagnosticEventKind::ActionPanicked {
                    id: id.clone(),
                    message,
                });
            });
            panic::resume_unwind(payload);
        }
    }

    fn dismiss_with(&self, id: &ToastId, reason: DismissReason) {
        self.update(self.now(), |state, now, fx| {
            state.begin_exit(id, now, reason, fx);
        });
    }

    // ----------------------------------------------------------------------
    // Hover
    // ----------------------------------------------------------------------

    /// Suspends the auto-dismiss countdown.
    pub fn pause(&self, id: &ToastId) {
        self.update(self.now(), |state, _, fx| state.pause(id, fx));
    }

    /// Restarts the full auto-dismiss countdown after a pause.
    pub fn resume(&self, id: &ToastId) {
        self.update(self.now(), |state, now, fx| state.resume(id, now, fx));
    }

    pub fn handle_message(&self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.dismiss(id),
            Message::ActivateAction(id) => self.activate_action(id),
            Message::PointerEntered(id) => self.pause(id),
            Message::PointerLeft(id) => self.resume(id),
            Message::Tick => self.tick(),
        }
    }

    // ----------------------------------------------------------------------
    // Time
    // ----------------------------------------------------------------------

    /// Fires every timer due at or before `now`, in deadline order.
    ///
    /// Timers scheduled while firing (the removal following an expiry, for
    /// instance) are fired too when they fall inside the window.
    pub fn advance(&self, now: Instant) {
        loop {
            let due = self.inner.state.borrow_mut().timers.pop_due(now);
            let Some(due) = due else {
                break;
            };
            self.update(due.deadline, |state, _, fx| state.fire(due, fx));
        }
    }

    /// [`advance`](Self::advance) to the clock's current time.
    pub fn tick(&self) {
        self.advance(self.now());
    }

    /// Earliest pending timer deadline, for hosts that schedule their own wakeups.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.state.borrow().timers.next_deadline()
    }

    /// Resolves after timers were scheduled or cancelled.
    pub(crate) fn timers_changed(&self) -> Notified<'_> {
        self.inner.timers_changed.notified()
    }

    // ----------------------------------------------------------------------
    // Reading
    // ----------------------------------------------------------------------

    /// Live toasts in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<ToastSnapshot> {
        self.inner.state.borrow().registry.list()
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<ToastSnapshot> {
        self.inner
            .state
            .borrow()
            .registry
            .get(id)
            .map(ToastRecord::snapshot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.borrow().registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().registry.is_empty()
    }

    #[must_use]
    pub fn overlay(&self) -> OverlayView {
        let state = self.inner.state.borrow();
        OverlayView::new(state.config.position, &state.registry.list())
    }

    // ----------------------------------------------------------------------
    // Observers
    // ----------------------------------------------------------------------

    /// Calls `subscriber` with the full ordered snapshot after every change.
    ///
    /// The subscriber is not called for the current state; read
    /// [`list`](Self::list) for that.
    pub fn subscribe(&self, subscriber: impl FnMut(&[ToastSnapshot]) + 'static) -> SubscriptionId {
        let mut subs = self.inner.subscribers.borrow_mut();
        subs.next_id += 1;
        let id = SubscriptionId(subs.next_id);
        subs.entries.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.inner.subscribers.borrow_mut();
        subs.entries.retain(|(sid, _)| *sid != id);
        if subs.notifying {
            subs.removed.push(id);
        }
    }

    fn update<R>(&self, now: Instant, f: impl FnOnce(&mut State, Instant, &mut Effects) -> R) -> R {
        let mut fx = Effects::default();
        let result = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state, now, &mut fx)
        };
        self.apply(fx);
        result
    }

    fn apply(&self, fx: Effects) {
        if fx.rescheduled {
            self.inner.timers_changed.notify_one();
        }
        for (id, on_close) in fx.closed {
            if let Some(on_close) = on_close {
                on_close(&id);
            }
        }
        if fx.changed {
            self.notify_subscribers();
        }
    }

    /// Changes raised by subscribers themselves are coalesced into one
    /// extra round once the current one finishes.
    ///
    /// A panicking subscriber ends the round early. The subscriber list is
    /// restored before the panic is resumed, so later changes are delivered.
    fn notify_subscribers(&self) {
        {
            let mut subs = self.inner.subscribers.borrow_mut();
            if subs.notifying {
                subs.dirty = true;
                return;
            }
            subs.notifying = true;
        }

        loop {
            let snapshot = self.list();
            let mut entries = std::mem::take(&mut self.inner.subscribers.borrow_mut().entries);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                for (_, subscriber) in &mut entries {
                    subscriber(&snapshot);
                }
            }));

            let mut subs = self.inner.subscribers.borrow_mut();
            let removed = std::mem::take(&mut subs.removed);
            entries.retain(|(sid, _)| !removed.contains(sid));
            let added = std::mem::take(&mut subs.entries);
            entries.extend(added);
            subs.entries = entries;

            if let Err(payload) = outcome {
                subs.notifying = false;
                subs.dirty = false;
                drop(subs);
                error!(message = %panic_message(payload.as_ref()), "toast subscriber panicked");
                panic::resume_unwind(payload);
            }

            if !subs.dirty {
                subs.notifying = false;
                break;
            }
            subs.dirty = false;
        }
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Toaster")
            .field("config", &state.config)
            .field("toasts", &state.registry.len())
            .field("pending_timers", &state.timers.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
