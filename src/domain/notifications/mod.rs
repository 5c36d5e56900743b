// SPDX-License-Identifier: MPL-2.0
//! Notification domain types.
//!
//! Value objects for toast timing, independent of any clock or renderer.

mod newtypes;

pub use newtypes::{default_duration_bounds, DefaultDuration};
