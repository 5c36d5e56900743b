// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording toast lifecycle activity.
//!
//! A [`DiagnosticsCollector`] keeps the most recent lifecycle events in a
//! memory-bounded circular buffer. Toasters log through a cheap, cloneable
//! [`DiagnosticsHandle`] that never blocks: events are dropped when the
//! channel is full. The collected log can be exported as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring buffer that counts evictions
//! - [`DiagnosticEvent`]: Timestamped [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: Storage and producer side

mod buffer;
mod collector;
mod events;

pub use buffer::CircularBuffer;
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle, ReportedEvent};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
