// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating toast lifecycle events.
//!
//! Toasters send events through a [`DiagnosticsHandle`]; the owner of the
//! [`DiagnosticsCollector`] drains them into its circular buffer.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{CircularBuffer, DiagnosticEvent, DiagnosticEventKind};
use crate::domain::diagnostics::EventLogCapacity;
use crate::error::Result;
use crate::notifications::{DismissReason, Phase, ToastId, Variant};

/// Channel slots between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending lifecycle events to the collector.
///
/// Cheap to clone. Sending never blocks; events are dropped when the
/// channel is full or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    pub fn log_shown(&self, id: &ToastId, variant: Variant) {
        self.log(DiagnosticEventKind::Shown {
            id: id.clone(),
            variant,
        });
    }

    pub fn log_phase(&self, id: &ToastId, phase: Phase) {
        self.log(DiagnosticEventKind::PhaseChanged {
            id: id.clone(),
            phase,
        });
    }

    pub fn log_dismissed(&self, id: &ToastId, reason: DismissReason) {
        self.log(DiagnosticEventKind::Dismissed {
            id: id.clone(),
            reason,
        });
    }

    pub fn log_removed(&self, id: &ToastId) {
        self.log(DiagnosticEventKind::Removed { id: id.clone() });
    }
}

/// One exported event, timed relative to collection start.
#[derive(Debug, Clone, Serialize)]
pub struct ReportedEvent {
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

/// JSON export of the lifecycle log.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub collection_started_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
    /// Events dropped by the circular buffer before export.
    pub evicted_events: u64,
    pub events: Vec<ReportedEvent>,
}

/// Central store for lifecycle events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for event offsets.
    collection_started_at: Instant,
    /// Wall-clock start, for report metadata.
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: EventLogCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer.
    ///
    /// Call this periodically (e.g., once per UI frame), or at least before
    /// the channel's 100 slots fill up.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Stored events about one toast, oldest first.
    pub fn events_for<'a>(
        &'a self,
        id: &'a ToastId,
    ) -> impl Iterator<Item = &'a DiagnosticEventKind> + 'a {
        self.buffer
            .iter()
            .map(|event| &event.kind)
            .filter(move |kind| kind.toast_id() == Some(id))
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[must_use]
    pub fn report(&self) -> DiagnosticReport {
        let events = self
            .buffer
            .iter()
            .map(|event| ReportedEvent {
                offset_ms: u64::try_from(
                    event
                        .timestamp
                        .saturating_duration_since(self.collection_started_at)
                        .as_millis(),
                )
                .unwrap_or(u64::MAX),
                kind: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            collection_started_at: self.collection_started_at_utc,
            exported_at: Utc::now(),
            evicted_events: self.buffer.evicted(),
            events,
        }
    }

    /// Exports the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Export`](crate::error::Error::Export) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(EventLogCapacity::default())
    }
}
