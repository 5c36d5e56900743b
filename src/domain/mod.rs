// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`diagnostics`]: Event log sizing ([`EventLogCapacity`](diagnostics::EventLogCapacity))
//! - [`notifications`]: Toast timing values ([`DefaultDuration`](notifications::DefaultDuration))

pub mod diagnostics;
pub mod notifications;
