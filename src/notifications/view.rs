// SPDX-License-Identifier: MPL-2.0
//! Renderer-agnostic overlay description.
//!
//! Toolkits turn an [`OverlayView`] into widgets: anchor the stack at
//! [`Position`], draw one card per [`ToastView`], fade cards in when
//! `shown` flips to true and out when the phase becomes `Exiting`.

use super::toast::{Phase, ToastId, ToastSnapshot, Variant};
use serde::{Deserialize, Serialize};

/// Corner or edge the toast stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

/// Horizontal alignment of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

impl Position {
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopRight | Position::TopCenter
        )
    }

    #[must_use]
    pub fn horizontal(self) -> Horizontal {
        match self {
            Position::TopLeft | Position::BottomLeft => Horizontal::Left,
            Position::TopCenter | Position::BottomCenter => Horizontal::Center,
            Position::TopRight | Position::BottomRight => Horizontal::Right,
        }
    }
}

/// Everything a renderer needs to draw one toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub id: ToastId,
    pub variant: Variant,
    pub icon: &'static str,
    pub title: Option<String>,
    pub message: String,
    pub action_label: Option<String>,
    pub show_close_button: bool,
    pub phase: Phase,
    /// Fully opaque and in place: visible and not exiting.
    pub shown: bool,
    /// Accepts pointer input once the entrance completed.
    pub interactive: bool,
}

impl From<&ToastSnapshot> for ToastView {
    fn from(snapshot: &ToastSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            variant: snapshot.variant,
            icon: snapshot.variant.icon(),
            title: snapshot.title.clone(),
            message: snapshot.message.clone(),
            action_label: snapshot.action_label.clone(),
            show_close_button: snapshot.show_close_button,
            phase: snapshot.phase,
            shown: snapshot.phase == Phase::Visible,
            interactive: snapshot.phase != Phase::Entering,
        }
    }
}

/// The whole toast stack, in stacking order.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub position: Position,
    pub toasts: Vec<ToastView>,
}

impl OverlayView {
    #[must_use]
    pub fn new(position: Position, snapshots: &[ToastSnapshot]) -> Self {
        Self {
            position,
            toasts: snapshots.iter().map(ToastView::from).collect(),
        }
    }

    /// Nothing to draw; renderers can skip the overlay layer entirely.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn snapshot(phase: Phase) -> ToastSnapshot {
        ToastSnapshot {
            id: serde_json::from_str("\"toast-1-0\"").expect("valid id"),
            variant: Variant::Warning,
            message: "Low battery".to_string(),
            title: Some("Power".to_string()),
            action_label: None,
            show_close_button: true,
            duration: Duration::from_secs(5),
            prevent_auto_dismiss: false,
            phase,
            paused: false,
            created_at: Instant::now(),
        }
    }

    #[test]
    fn default_position_is_top_right() {
        assert_eq!(Position::default(), Position::TopRight);
        assert!(Position::TopRight.is_top());
        assert_eq!(Position::TopRight.horizontal(), Horizontal::Right);
    }

    #[test]
    fn positions_map_to_edges() {
        assert!(!Position::BottomCenter.is_top());
        assert_eq!(Position::BottomCenter.horizontal(), Horizontal::Center);
        assert_eq!(Position::TopLeft.horizontal(), Horizontal::Left);
    }

    #[test]
    fn position_uses_kebab_case_in_toml() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            position: Position,
        }
        let text = toml::to_string(&Wrapper {
            position: Position::BottomLeft,
        })
        .expect("serializes");
        assert!(text.contains("\"bottom-left\""));
    }

    #[test]
    fn entering_toast_is_neither_shown_nor_interactive() {
        let view = ToastView::from(&snapshot(Phase::Entering));
        assert!(!view.shown);
        assert!(!view.interactive);
    }

    #[test]
    fn visible_toast_is_shown_and_interactive() {
        let view = ToastView::from(&snapshot(Phase::Visible));
        assert!(view.shown);
        assert!(view.interactive);
        assert_eq!(view.icon, Variant::Warning.icon());
    }

    #[test]
    fn exiting_toast_fades_but_stays_interactive() {
        let view = ToastView::from(&snapshot(Phase::Exiting));
        assert!(!view.shown);
        assert!(view.interactive);
    }

    #[test]
    fn overlay_keeps_order_and_position() {
        let overlay = OverlayView::new(
            Position::BottomRight,
            &[snapshot(Phase::Visible), snapshot(Phase::Entering)],
        );
        assert_eq!(overlay.position, Position::BottomRight);
        assert_eq!(overlay.toasts.len(), 2);
        assert_eq!(overlay.toasts[1].phase, Phase::Entering);
        assert!(!overlay.is_empty());
    }
}
