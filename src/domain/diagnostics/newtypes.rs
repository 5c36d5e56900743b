// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// Event Log Capacity Bounds
// =============================================================================

/// Lifecycle event log bounds (16 to 4096 events).
pub mod event_log_capacity_bounds {
    /// Minimum number of retained events.
    pub const MIN: usize = 16;
    /// Maximum number of retained events.
    pub const MAX: usize = 4096;
    /// Default number of retained events.
    pub const DEFAULT: usize = 256;
}

// =============================================================================
// EventLogCapacity
// =============================================================================

/// Number of lifecycle events the diagnostics log retains before evicting
/// the oldest ones.
///
/// # Example
///
/// ```
/// use toastkit::domain::diagnostics::EventLogCapacity;
///
/// assert_eq!(EventLogCapacity::new(512).value(), 512);
/// // Values outside range are clamped
/// assert_eq!(EventLogCapacity::new(1).value(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLogCapacity(usize);

impl EventLogCapacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            event_log_capacity_bounds::MIN,
            event_log_capacity_bounds::MAX,
        ))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for EventLogCapacity {
    fn default() -> Self {
        Self(event_log_capacity_bounds::DEFAULT)
    }
}
