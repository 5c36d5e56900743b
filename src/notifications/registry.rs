// SPDX-License-Identifier: MPL-2.0
//! Ordered store of live toasts.
//!
//! Records stay in insertion order, which is also the visual stacking order.
//! Reads hand out copies so callers never observe a record mid-update.

use super::toast::{ToastId, ToastRecord, ToastSnapshot};

#[derive(Default)]
pub(crate) struct Registry {
    records: Vec<ToastRecord>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub(crate) fn insert(&mut self, record: ToastRecord) {
        debug_assert!(
            self.get(record.id()).is_none(),
            "duplicate toast id {}",
            record.id()
        );
        self.records.push(record);
    }

    /// Removes a record, preserving the order of the others.
    pub(crate) fn remove(&mut self, id: &ToastId) -> Option<ToastRecord> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(pos))
    }

    /// Removes every record at once, in insertion order.
    pub(crate) fn clear(&mut self) -> Vec<ToastRecord> {
        std::mem::take(&mut self.records)
    }

    pub(crate) fn get(&self, id: &ToastId) -> Option<&ToastRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &ToastId) -> Option<&mut ToastRecord> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub(crate) fn list(&self) -> Vec<ToastSnapshot> {
        self.records.iter().map(ToastRecord::snapshot).collect()
    }

    /// Ids in insertion order, for iterate-then-mutate loops.
    pub(crate) fn ids(&self) -> Vec<ToastId> {
        self.records.iter().map(|r| r.id().clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
