// SPDX-License-Identifier: MPL-2.0
//! Ambient access to a toaster.
//!
//! A [`ToastProvider`] makes its toaster reachable from code that was not
//! handed one explicitly. Inside [`ToastProvider::scope`], [`use_toaster`]
//! returns the innermost provided toaster; outside every scope it is an
//! error. Scopes are per thread and nest.

use super::clock::Clock;
use super::manager::{Toaster, ToasterConfig};
use crate::error::{Error, Result};
use std::cell::RefCell;

thread_local! {
    static PROVIDED: RefCell<Vec<Toaster>> = const { RefCell::new(Vec::new()) };
}

/// Owns a toaster and provides it to scoped code.
#[derive(Debug, Clone, Default)]
pub struct ToastProvider {
    toaster: Toaster,
}

impl ToastProvider {
    pub fn new(config: ToasterConfig, clock: impl Clock + 'static) -> Self {
        Self {
            toaster: Toaster::new(config, clock),
        }
    }

    /// Provides an existing toaster.
    #[must_use]
    pub fn from_toaster(toaster: Toaster) -> Self {
        Self { toaster }
    }

    #[must_use]
    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Runs `f` with this provider's toaster installed for the current thread.
    ///
    /// The previous provider (if any) is restored when `f` returns or unwinds.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        PROVIDED.with(|stack| stack.borrow_mut().push(self.toaster.clone()));
        let _guard = ScopeGuard;
        f()
    }
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        PROVIDED.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Innermost provided toaster.
///
/// # Errors
///
/// Returns [`Error::MissingProvider`] outside every [`ToastProvider::scope`].
pub fn try_use_toaster() -> Result<Toaster> {
    PROVIDED
        .with(|stack| stack.borrow().last().cloned())
        .ok_or(Error::MissingProvider)
}

/// Innermost provided toaster.
///
/// # Panics
///
/// Panics outside every [`ToastProvider::scope`]; that is a programming
/// error in the host. Use [`try_use_toaster`] to handle it instead.
#[must_use]
pub fn use_toaster() -> Toaster {
    match try_use_toaster() {
        Ok(toaster) => toaster,
        Err(err) => panic!("{err}"),
    }
}
