// SPDX-License-Identifier: MPL-2.0
//! Notification newtypes.

use std::time::Duration;

/// Bounds for the application-wide default toast duration, in milliseconds.
pub mod default_duration_bounds {
    /// `0` disables auto-dismiss for toasts that do not set their own duration.
    pub const MIN_MS: u64 = 0;
    /// Two minutes; longer toasts should opt out of auto-dismiss instead.
    pub const MAX_MS: u64 = 120_000;
    /// Five seconds.
    pub const DEFAULT_MS: u64 = 5_000;
}

/// Default auto-dismiss duration applied when a toast does not specify one.
///
/// The value is clamped to `0..=120000` ms. Zero is valid and means
/// "never auto-dismiss".
///
/// # Example
///
/// ```
/// use toastkit::domain::notifications::DefaultDuration;
/// use std::time::Duration;
///
/// let duration = DefaultDuration::from_millis(3_000);
/// assert_eq!(duration.as_duration(), Duration::from_secs(3));
///
/// // Values above the maximum are clamped
/// assert_eq!(DefaultDuration::from_millis(u64::MAX).as_millis(), 120_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultDuration(u64);

impl DefaultDuration {
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(
            default_duration_bounds::MIN_MS,
            default_duration_bounds::MAX_MS,
        ))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true when toasts using this default never auto-dismiss.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        self.0 == 0
    }
}

impl Default for DefaultDuration {
    fn default() -> Self {
        Self(default_duration_bounds::DEFAULT_MS)
    }
}
