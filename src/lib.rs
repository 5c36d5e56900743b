// SPDX-License-Identifier: MPL-2.0
//! `toastkit` manages the lifecycle of toast notifications.
//!
//! It creates toasts, moves them through their entrance, visible and exit
//! phases on a timer queue, pauses them on hover and tells renderers what to
//! draw. Drawing itself is left to the host toolkit.

#![doc(html_root_url = "https://docs.rs/toastkit/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod driver;
pub mod error;
pub mod notifications;
