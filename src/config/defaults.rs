// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Timing**: Auto-dismiss duration and the fixed phase delays
//! - **Diagnostics**: Lifecycle event log sizing

use crate::domain::diagnostics::event_log_capacity_bounds;
use crate::domain::notifications::default_duration_bounds;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Auto-dismiss duration used when neither the toast nor the settings file
/// specify one.
pub const DEFAULT_DURATION_MS: u64 = default_duration_bounds::DEFAULT_MS;

/// Upper bound for the configurable default duration.
pub const MAX_DEFAULT_DURATION_MS: u64 = default_duration_bounds::MAX_MS;

/// Delay between insertion (`Entering`) and the `Visible` phase.
/// Gives renderers one state change to hang an entrance transition on.
pub const ENTER_DELAY_MS: u64 = 10;

/// Delay between `Exiting` and removal from the registry.
/// Matches the exit transition length renderers are expected to play.
pub const EXIT_DELAY_MS: u64 = 300;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

pub const DEFAULT_EVENT_LOG_CAPACITY: usize = event_log_capacity_bounds::DEFAULT;
pub const MIN_EVENT_LOG_CAPACITY: usize = event_log_capacity_bounds::MIN;
pub const MAX_EVENT_LOG_CAPACITY: usize = event_log_capacity_bounds::MAX;
