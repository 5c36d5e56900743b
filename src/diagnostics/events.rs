// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for toast lifecycle tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{DismissReason, Phase, ToastId, Variant};

/// A diagnostic event with the monotonic time it was logged at.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// What happened to a toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A toast was created and inserted.
    Shown { id: ToastId, variant: Variant },

    /// A toast moved to a new phase.
    PhaseChanged { id: ToastId, phase: Phase },

    /// Hover suspended the auto-dismiss countdown.
    Paused { id: ToastId },

    /// Hover ended; the countdown restarted.
    Resumed { id: ToastId },

    /// A toast started exiting.
    Dismissed { id: ToastId, reason: DismissReason },

    /// A toast left the registry.
    Removed { id: ToastId },

    /// The registry was emptied without exit delays.
    Cleared { count: usize },

    /// An action callback panicked. The toast was dismissed anyway.
    ActionPanicked { id: ToastId, message: String },
}

impl DiagnosticEventKind {
    /// Toast the event refers to, if any.
    #[must_use]
    pub fn toast_id(&self) -> Option<&ToastId> {
        match self {
            DiagnosticEventKind::Shown { id, .. }
            | DiagnosticEventKind::PhaseChanged { id, .. }
            | DiagnosticEventKind::Paused { id }
            | DiagnosticEventKind::Resumed { id }
            | DiagnosticEventKind::Dismissed { id, .. }
            | DiagnosticEventKind::Removed { id }
            | DiagnosticEventKind::ActionPanicked { id, .. } => Some(id),
            DiagnosticEventKind::Cleared { .. } => None,
        }
    }
}
