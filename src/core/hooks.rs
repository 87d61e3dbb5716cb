//! Per-view "about to unload" hooks.
//!
//! Each view gets one [`UnloadHook`] installed through the host. When the view
//! is about to drop or replace its content, the hook snapshots the live viewport
//! and stores it under the path the view is still showing. [`HookManager`]
//! tracks which view identities currently carry a hook so registration is
//! idempotent and teardown can remove every hook it installed.
//!
//! Hooks hold only a weak reference to the subsystem and check its active flag,
//! so a host that fires a stale hook after shutdown gets a no-op.

use crate::core::host::{capture_viewport, Host, ViewHandle};
use crate::core::identity::{ViewId, ViewRegistry};
use crate::core::tracker::Shared;
use std::collections::HashMap;
use std::fmt;
use std::rc::Weak;

#[derive(Clone)]
pub struct UnloadHook {
    shared: Weak<Shared>,
}

impl UnloadHook {
    pub(crate) fn new(shared: Weak<Shared>) -> Self {
        Self { shared }
    }

    /// Whether the owning subsystem is still alive and active.
    pub fn is_live(&self) -> bool {
        self.shared
            .upgrade()
            .map(|shared| shared.is_active())
            .unwrap_or(false)
    }

    /// Called by the host right before `view` discards its current content.
    pub fn before_unload(&self, host: &dyn Host, view: ViewHandle) {
        let Some(shared) = self.shared.upgrade() else {
            log::debug!("Unload hook for {view} fired after the subsystem was dropped");
            return;
        };
        if !shared.is_active() {
            log::debug!("Unload hook for {view} fired after shutdown, ignoring");
            return;
        }
        let Some(path) = host.view_file(view) else {
            log::debug!("{view} is unloading without a file, nothing to remember");
            return;
        };

        let state = capture_viewport(host, view);
        let Ok(mut inner) = shared.state().try_borrow_mut() else {
            log::warn!("Skipped remembering '{path}': state is busy");
            return;
        };
        inner.cache.remember(&path, state);
    }
}

impl fmt::Debug for UnloadHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnloadHook")
            .field("live", &self.is_live())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Unregistered,
    Registered,
}

#[derive(Debug, Default)]
pub struct HookManager {
    states: HashMap<ViewId, HookState>,
}

impl HookManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: ViewId) -> HookState {
        self.states
            .get(&id)
            .copied()
            .unwrap_or(HookState::Unregistered)
    }

    /// Install a hook on `view` unless its identity already carries one.
    pub fn register_for(
        &mut self,
        host: &dyn Host,
        registry: &mut ViewRegistry,
        view: ViewHandle,
        hook: impl FnOnce() -> UnloadHook,
    ) -> ViewId {
        let id = registry.assign(view);
        if self.state(id) == HookState::Registered {
            return id;
        }

        host.install_unload_hook(view, hook());
        self.states.insert(id, HookState::Registered);
        log::debug!("Installed unload hook on {view} (identity {id})");
        id
    }

    /// Remove the hook from a single view and drop its identity.
    pub fn unregister(
        &mut self,
        host: &dyn Host,
        registry: &mut ViewRegistry,
        view: ViewHandle,
    ) -> Option<ViewId> {
        let id = registry.lookup(view)?;
        if self.states.remove(&id) == Some(HookState::Registered) {
            host.uninstall_unload_hook(view);
            log::debug!("Removed unload hook from {view} (identity {id})");
        }
        registry.clear(view);
        Some(id)
    }

    /// Remove every hook from the views the host still reports.
    ///
    /// Returns how many hooks were uninstalled.
    pub fn unregister_all(&mut self, host: &dyn Host, registry: &mut ViewRegistry) -> usize {
        let mut removed = 0;
        for view in host.list_open_views() {
            let Some(id) = registry.lookup(view) else {
                continue;
            };
            if self.state(id) == HookState::Registered {
                host.uninstall_unload_hook(view);
                removed += 1;
            }
            self.states.remove(&id);
            registry.clear(view);
        }
        if !self.states.is_empty() {
            log::debug!(
                "{} hooked views were no longer reported by the host",
                self.states.len()
            );
            self.states.clear();
        }
        log::debug!("Uninstalled {removed} unload hooks");
        removed
    }

    pub fn registered_count(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state == HookState::Registered)
            .count()
    }
}
