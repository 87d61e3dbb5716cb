//! Stable identities for host-owned view objects.
//!
//! Host callbacks hand us transient view objects with no identity that survives
//! from one callback to the next. [`ViewRegistry`] keeps a side table from the
//! host's [`ViewHandle`] to a [`ViewId`] of our own. Ids come from a monotonic
//! counter and are never reused within a process run; the registry only
//! observes views and has no say in their lifetime.

use crate::core::host::ViewHandle;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct ViewRegistry {
    ids: HashMap<ViewHandle, ViewId>,
    next_id: u64,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the identity of `view`, allocating one when `auto_create` is set.
    ///
    /// Without `auto_create` an unknown view yields `None` and nothing changes.
    pub fn identify(&mut self, view: ViewHandle, auto_create: bool) -> Option<ViewId> {
        if auto_create {
            Some(self.assign(view))
        } else {
            self.lookup(view)
        }
    }

    /// Identity of `view`, allocating the next id if it has none yet.
    pub fn assign(&mut self, view: ViewHandle) -> ViewId {
        if let Some(&id) = self.ids.get(&view) {
            return id;
        }

        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.ids.insert(view, id);
        log::debug!("Assigned identity {id} to {view}");
        id
    }

    /// Read-only lookup.
    pub fn lookup(&self, view: ViewHandle) -> Option<ViewId> {
        self.ids.get(&view).copied()
    }

    /// Detach the identity from `view`; a recycled handle starts fresh.
    pub fn clear(&mut self, view: ViewHandle) -> Option<ViewId> {
        let removed = self.ids.remove(&view);
        if let Some(id) = removed {
            log::debug!("Cleared identity {id} from {view}");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
