// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures and the per-toast phase machine.
//!
//! A toast moves through `Entering → Visible → Exiting` and is then removed
//! from the registry. Content (`variant`, `message`, `title`, `action` label)
//! never changes after creation; only the phase and the pause flag do.

use super::timer::{DismissTimer, TimerKind, TimerQueue, TimerToken};
use crate::config::{ENTER_DELAY_MS, EXIT_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub(crate) const ENTER_DELAY: Duration = Duration::from_millis(ENTER_DELAY_MS);
pub(crate) const EXIT_DELAY: Duration = Duration::from_millis(EXIT_DELAY_MS);

/// Unique identifier for a toast.
///
/// Rendered as `toast-{counter}-{unix_millis}`. The counter is shared by every
/// toaster in the process, so ids never repeat within a process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    pub(crate) fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let sequence = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("toast-{sequence}-{millis}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Variant {
    /// Glyph shown next to the message.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Variant::Success => "✓",
            Variant::Error => "✕",
            Variant::Warning => "⚠",
            Variant::Info => "ℹ",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Warning => "warning",
            Variant::Info => "info",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(Variant::Success),
            "error" => Ok(Variant::Error),
            "warning" => Ok(Variant::Warning),
            "info" => Ok(Variant::Info),
            other => Err(format!("unknown toast variant `{other}`")),
        }
    }
}

/// Visibility phase, owned by the toaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Inserted, entrance transition not yet observable.
    Entering,
    /// Fully shown; the auto-dismiss countdown may be running.
    Visible,
    /// Exit transition playing; removal follows after the exit delay.
    Exiting,
}

impl Phase {
    /// Whether a dismissal (or timer expiry) may still move the toast to `Exiting`.
    #[must_use]
    pub fn is_dismissible(self) -> bool {
        matches!(self, Phase::Entering | Phase::Visible)
    }
}

/// What moved a toast to `Exiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    Expired,
    Manual,
    Action,
    DismissAll,
}

/// Callback run exactly once when a toast leaves the registry.
pub type OnClose = Box<dyn FnOnce(&ToastId)>;

/// Secondary control rendered on a toast.
pub struct ToastAction {
    label: String,
    on_click: Option<Box<dyn FnMut()>>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, on_click: impl FnMut() + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Some(Box::new(on_click)),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .field("pending", &self.on_click.is_some())
            .finish()
    }
}

/// Options accepted by [`Toaster::show`](super::Toaster::show) and the
/// variant helpers.
///
/// ```
/// use toastkit::notifications::{ToastAction, ToastOptions, Variant};
/// use std::time::Duration;
///
/// let options = ToastOptions::new()
///     .variant(Variant::Warning)
///     .title("Disk almost full")
///     .duration(Duration::from_secs(8))
///     .action(ToastAction::new("Clean up", || {}));
/// # let _ = options;
/// ```
#[derive(Default)]
pub struct ToastOptions {
    pub(crate) variant: Option<Variant>,
    pub(crate) title: Option<String>,
    pub(crate) duration: Option<Duration>,
    pub(crate) prevent_auto_dismiss: bool,
    pub(crate) action: Option<ToastAction>,
    pub(crate) show_close_button: Option<bool>,
    pub(crate) on_close: Option<OnClose>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variant. The variant helpers (`success`, `error`, ...)
    /// override this value.
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Auto-dismiss delay. `Duration::ZERO` keeps the toast until dismissed.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Disables the auto-dismiss timer regardless of `duration`.
    #[must_use]
    pub fn prevent_auto_dismiss(mut self, prevent: bool) -> Self {
        self.prevent_auto_dismiss = prevent;
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = Some(show);
        self
    }

    #[must_use]
    pub fn on_close(mut self, on_close: impl FnOnce(&ToastId) + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }
}

impl fmt::Debug for ToastOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastOptions")
            .field("variant", &self.variant)
            .field("title", &self.title)
            .field("duration", &self.duration)
            .field("prevent_auto_dismiss", &self.prevent_auto_dismiss)
            .field("action", &self.action)
            .field("show_close_button", &self.show_close_button)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Read-only copy of a live toast, handed to renderers and subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSnapshot {
    pub id: ToastId,
    pub variant: Variant,
    pub message: String,
    pub title: Option<String>,
    pub action_label: Option<String>,
    pub show_close_button: bool,
    pub duration: Duration,
    pub prevent_auto_dismiss: bool,
    pub phase: Phase,
    pub paused: bool,
    pub created_at: Instant,
}

/// A live toast owned by the registry.
pub(crate) struct ToastRecord {
    id: ToastId,
    variant: Variant,
    message: String,
    title: Option<String>,
    action: Option<ToastAction>,
    show_close_button: bool,
    on_close: Option<OnClose>,
    created_at: Instant,
    phase: Phase,
    timer: DismissTimer,
    enter_token: Option<TimerToken>,
    exit_token: Option<TimerToken>,
}

impl ToastRecord {
    pub(crate) fn new(
        message: String,
        options: ToastOptions,
        default_duration: Duration,
        now: Instant,
    ) -> Self {
        let ToastOptions {
            variant,
            title,
            duration,
            prevent_auto_dismiss,
            action,
            show_close_button,
            on_close,
        } = options;

        Self {
            id: ToastId::generate(),
            variant: variant.unwrap_or_default(),
            message,
            title,
            action,
            show_close_button: show_close_button.unwrap_or(true),
            on_close,
            created_at: now,
            phase: Phase::Entering,
            timer: DismissTimer::new(duration.unwrap_or(default_duration), prevent_auto_dismiss),
            enter_token: None,
            exit_token: None,
        }
    }

    pub(crate) fn id(&self) -> &ToastId {
        &self.id
    }

    pub(crate) fn variant(&self) -> Variant {
        self.variant
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Schedules the `Entering → Visible` step.
    pub(crate) fn schedule_entrance(&mut self, timers: &mut TimerQueue, now: Instant) {
        if self.phase == Phase::Entering {
            let deadline = now.checked_add(ENTER_DELAY).unwrap_or(now);
            let token = timers.schedule(deadline, self.id.clone(), TimerKind::Enter);
            self.enter_token = Some(token);
        }
    }

    /// Starts the auto-dismiss countdown. Returns false when nothing was armed.
    pub(crate) fn arm(&mut self, timers: &mut TimerQueue, now: Instant) -> bool {
        if !self.phase.is_dismissible() {
            return false;
        }
        self.timer.arm(timers, &self.id, now).is_some()
    }

    /// Completes the entrance if `token` is the one currently expected.
    pub(crate) fn finish_entering(&mut self, token: TimerToken) -> bool {
        if self.phase != Phase::Entering || self.enter_token != Some(token) {
            return false;
        }
        self.enter_token = None;
        self.phase = Phase::Visible;
        true
    }

    /// Whether an auto-dismiss firing carrying `token` should act.
    pub(crate) fn is_expiry_current(&self, token: TimerToken) -> bool {
        self.phase.is_dismissible() && self.timer.is_current(token)
    }

    pub(crate) fn pause(&mut self, timers: &mut TimerQueue) -> bool {
        self.phase.is_dismissible() && self.timer.pause(timers)
    }

    pub(crate) fn resume(&mut self, timers: &mut TimerQueue, now: Instant) -> bool {
        self.phase.is_dismissible() && self.timer.resume(timers, &self.id, now)
    }

    /// Moves to `Exiting` and schedules removal. Cancels every other timer.
    ///
    /// Returns false if the toast is already exiting.
    pub(crate) fn begin_exit(&mut self, timers: &mut TimerQueue, now: Instant) -> bool {
        if !self.phase.is_dismissible() {
            return false;
        }
        if let Some(token) = self.enter_token.take() {
            timers.cancel(token);
        }
        self.timer.cancel(timers);
        self.phase = Phase::Exiting;
        let deadline = now.checked_add(EXIT_DELAY).unwrap_or(now);
        self.exit_token = Some(timers.schedule(deadline, self.id.clone(), TimerKind::Exit));
        true
    }

    /// Whether a removal firing carrying `token` should act.
    pub(crate) fn is_exit_due(&self, token: TimerToken) -> bool {
        self.phase == Phase::Exiting && self.exit_token == Some(token)
    }

    /// Hands out the action callback once, while the toast can still be dismissed.
    pub(crate) fn take_action_callback(&mut self) -> Option<Box<dyn FnMut()>> {
        if !self.phase.is_dismissible() {
            return None;
        }
        self.action.as_mut().and_then(|action| action.on_click.take())
    }

    pub(crate) fn into_on_close(self) -> (ToastId, Option<OnClose>) {
        (self.id, self.on_close)
    }

    pub(crate) fn snapshot(&self) -> ToastSnapshot {
        ToastSnapshot {
            id: self.id.clone(),
            variant: self.variant,
            message: self.message.clone(),
            title: self.title.clone(),
            action_label: self.action.as_ref().map(|a| a.label.clone()),
            show_close_button: self.show_close_button,
            duration: self.timer.duration(),
            prevent_auto_dismiss: self.timer.is_prevented(),
            phase: self.phase,
            paused: self.timer.is_paused(),
            created_at: self.created_at,
        }
    }
}
