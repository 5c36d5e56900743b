// SPDX-License-Identifier: MPL-2.0
//! Toast notification lifecycle.
//!
//! Toasts are short, non-blocking messages that appear, stay for a while and
//! leave on their own. This module owns their state and timing; drawing them
//! is left to whatever toolkit the host uses.
//!
//! # Components
//!
//! - [`toast`] - `ToastId`, `Variant`, `Phase`, options and snapshots
//! - [`timer`] - deadline queue and the per-toast auto-dismiss timer
//! - [`manager`] - `Toaster`, the facade hosts talk to
//! - [`provider`] - ambient `use_toaster()` access
//! - [`view`] - renderer-agnostic overlay description
//! - [`clock`] - time sources
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use toastkit::notifications::{ManualClock, Phase, ToastOptions, Toaster};
//!
//! let clock = ManualClock::new();
//! let toaster = Toaster::with_clock(clock.clone());
//!
//! let id = toaster.success("Image saved", ToastOptions::new());
//!
//! clock.advance(Duration::from_millis(10));
//! toaster.tick();
//! assert_eq!(toaster.get(&id).map(|t| t.phase), Some(Phase::Visible));
//!
//! // Default duration (5 s) plus the exit delay (300 ms)
//! clock.advance(Duration::from_millis(5_300));
//! toaster.tick();
//! assert!(toaster.is_empty());
//! ```
//!
//! # Design Considerations
//!
//! - Entrance delay: 10 ms; exit delay: 300 ms
//! - Default duration: 5 s; zero or `prevent_auto_dismiss` keeps a toast up
//! - Hovering pauses the countdown; leaving restarts the full duration
//! - Position: top-right unless configured otherwise

pub mod clock;
pub mod manager;
pub mod provider;
mod registry;
pub mod timer;
pub mod toast;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use manager::{Message, SubscriptionId, Toaster, ToasterConfig};
pub use provider::{try_use_toaster, use_toaster, ToastProvider};
pub use timer::{DismissTimer, DueTimer, TimerKind, TimerQueue, TimerToken};
pub use toast::{
    DismissReason, OnClose, Phase, ToastAction, ToastId, ToastOptions, ToastSnapshot, Variant,
};
pub use view::{Horizontal, OverlayView, Position, ToastView};
