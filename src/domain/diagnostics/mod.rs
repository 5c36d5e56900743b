// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`EventLogCapacity`]: Capacity for the toast lifecycle event log

mod newtypes;

pub use newtypes::{event_log_capacity_bounds, EventLogCapacity};
