//! The subsystem handle wiring host events to the cache.
//!
//! [`ViewportMemory`] is created once per workspace session. It hydrates the
//! remembered files before any event is handled, installs unload hooks on the
//! open views, and then reacts to one host event per method call. All state
//! sits behind a shared, single-threaded handle that the unload hooks reach
//! through a weak reference.
//!
//! # Event handling
//! - **File opened**: classify, then restore from the cache or from another pane
//! - **About to unload**: handled by [`UnloadHook`], which remembers the live state
//! - **Renamed / deleted**: forwarded to the cache
//! - **Quit / shutdown**: capture every open view, flush, and on shutdown
//!   uninstall every hook and deactivate

use crate::core::classifier::{OpenClassifier, OpenKind};
use crate::core::config::Settings;
use crate::core::error::{Result, ViewportMemoryError};
use crate::core::hooks::{HookManager, UnloadHook};
use crate::core::host::{apply_viewport, capture_viewport, Host, ViewHandle};
use crate::core::identity::ViewRegistry;
use crate::core::state::{StateCache, ViewportState};
use crate::core::storage::Storage;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

pub const UNSUPPORTED_EDITOR_NOTICE: &str = "Viewport memory needs an editor that reports scroll \
and selection state. Positions will still be recorded, but nothing will be restored until the \
editor mode is switched.";

pub(crate) struct TrackerState {
    pub(crate) cache: StateCache,
    pub(crate) registry: ViewRegistry,
    pub(crate) classifier: OpenClassifier,
    pub(crate) hooks: HookManager,
    pub(crate) settings: Settings,
    pub(crate) degraded: bool,
}

pub(crate) struct Shared {
    active: Cell<bool>,
    state: RefCell<TrackerState>,
}

impl Shared {
    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn state(&self) -> &RefCell<TrackerState> {
        &self.state
    }
}

pub struct ViewportMemory {
    shared: Rc<Shared>,
    storage: Storage,
}

impl ViewportMemory {
    /// Bring the subsystem up for one workspace.
    ///
    /// Settings and remembered files are loaded first; failures there fall back
    /// to defaults and an empty history.
    pub fn start(host: &dyn Host, storage: Storage) -> Self {
        let settings = Settings::load_or_default(&storage);
        let cache = if settings.persist_states {
            storage.hydrate(settings.remember_max_files)
        } else {
            log::debug!("Persistence disabled, starting with an empty history");
            StateCache::new(settings.remember_max_files)
        };

        let degraded = !host.supports_viewport_state();
        if degraded {
            log::warn!("{}", ViewportMemoryError::UnsupportedEditorMode);
            host.show_notice(UNSUPPORTED_EDITOR_NOTICE);
        }

        log::info!(
            "Viewport memory started with {} remembered files (limit {})",
            cache.len(),
            settings.remember_max_files
        );

        let memory = Self {
            shared: Rc::new(Shared {
                active: Cell::new(true),
                state: RefCell::new(TrackerState {
                    cache,
                    registry: ViewRegistry::new(),
                    classifier: OpenClassifier::new(),
                    hooks: HookManager::new(),
                    settings,
                    degraded,
                }),
            }),
            storage,
        };

        for view in host.list_open_views() {
            memory.register_view(host, view);
        }
        memory
    }

    fn make_hook(&self) -> UnloadHook {
        UnloadHook::new(Rc::downgrade(&self.shared))
    }

    fn register_view(&self, host: &dyn Host, view: ViewHandle) {
        let Ok(mut guard) = self.shared.state.try_borrow_mut() else {
            log::warn!("Could not register {view}: state is busy");
            return;
        };
        let inner = &mut *guard;
        inner
            .hooks
            .register_for(host, &mut inner.registry, view, || self.make_hook());
    }

    /// Handle "file opened in the active view".
    ///
    /// Returns the classification, or `None` when the event was ignored.
    pub fn on_file_open(&self, host: &dyn Host, path: &str) -> Option<OpenKind> {
        if !self.is_active() {
            return None;
        }
        let Some(view) = host.active_view() else {
            log::debug!("Open of '{path}' without an active view, ignoring");
            if let Ok(mut inner) = self.shared.state.try_borrow_mut() {
                inner.classifier.take_suppression();
            }
            return None;
        };

        let (kind, stored, degraded) = {
            let Ok(mut guard) = self.shared.state.try_borrow_mut() else {
                log::warn!("Skipped open of '{path}': state is busy");
                return None;
            };
            let inner = &mut *guard;
            let id = inner
                .hooks
                .register_for(host, &mut inner.registry, view, || self.make_hook());
            let kind = inner.classifier.classify(id, path);
            (kind, inner.cache.recall(path).cloned(), inner.degraded)
        };

        if !kind.should_restore() {
            return Some(kind);
        }
        if degraded {
            log::debug!("Editor mode unsupported, not restoring '{path}'");
            return Some(kind);
        }

        let source = match stored {
            Some(state) => Some(state),
            None => live_state_from_other_view(host, view, path),
        };
        match source {
            Some(state) => match apply_viewport(host, view, path, &state) {
                Ok(()) => log::debug!("Restored view state for '{path}'"),
                Err(e) => log::warn!("Skipping restore: {e}"),
            },
            None => log::debug!("Nothing remembered for '{path}'"),
        }
        Some(kind)
    }

    /// Called by link navigation right before it opens a file at a target location.
    pub fn suppress_next_open(&self) {
        if let Ok(mut inner) = self.shared.state.try_borrow_mut() {
            inner.classifier.suppress_next_open();
        }
    }

    pub fn on_file_renamed(&self, old_path: &str, new_path: &str) {
        if let Ok(mut inner) = self.shared.state.try_borrow_mut() {
            inner.cache.rename(old_path, new_path);
            inner.classifier.rename(old_path, new_path);
        }
    }

    pub fn on_file_deleted(&self, path: &str) {
        if let Ok(mut inner) = self.shared.state.try_borrow_mut() {
            inner.cache.delete(path);
        }
    }

    /// Handle permanent teardown of a view.
    pub fn on_view_destroyed(&self, host: &dyn Host, view: ViewHandle) {
        let Ok(mut guard) = self.shared.state.try_borrow_mut() else {
            return;
        };
        let inner = &mut *guard;
        if let Some(id) = inner.hooks.unregister(host, &mut inner.registry, view) {
            inner.classifier.forget_view(id);
        }
    }

    /// Capture the live state of every open view into the cache.
    ///
    /// Returns how many views were captured.
    pub fn remember_open_views(&self, host: &dyn Host) -> usize {
        let captured: Vec<(String, ViewportState)> = host
            .list_open_views()
            .into_iter()
            .filter_map(|view| {
                host.view_file(view)
                    .map(|path| (path, capture_viewport(host, view)))
            })
            .collect();

        let Ok(mut inner) = self.shared.state.try_borrow_mut() else {
            log::warn!("Could not capture open views: state is busy");
            return 0;
        };
        let count = captured.len();
        for (path, state) in captured {
            inner.cache.remember(&path, state);
        }
        count
    }

    /// Write the cache to storage, unless persistence is switched off.
    pub fn flush(&self) -> Result<()> {
        let inner = self.read_state()?;
        if !inner.settings.persist_states {
            log::debug!("Persistence disabled, skipping flush");
            return Ok(());
        }
        self.storage.flush(&inner.cache)
    }

    /// Handle application quit.
    ///
    /// The host waits on the returned value; every failure is reported here
    /// rather than left pending.
    pub fn on_app_quit(&self, host: &dyn Host) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.remember_open_views(host);
        self.flush().inspect_err(|e| {
            log::error!("Could not save remembered files on quit: {e}");
        })
    }

    /// Final capture and flush, then uninstall every hook and deactivate.
    ///
    /// Teardown completes even when the flush fails; the flush error is returned.
    pub fn shutdown(&self, host: &dyn Host) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.remember_open_views(host);
        let flushed = self.flush();
        if let Err(e) = &flushed {
            log::error!("Could not save remembered files on shutdown: {e}");
        }

        match self.shared.state.try_borrow_mut() {
            Ok(mut guard) => {
                let inner = &mut *guard;
                inner.hooks.unregister_all(host, &mut inner.registry);
                inner.classifier.clear();
            }
            Err(_) => log::warn!("Could not uninstall unload hooks: state is busy"),
        }
        self.shared.active.set(false);
        log::info!("Viewport memory shut down");
        flushed
    }

    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }

    pub fn is_degraded(&self) -> bool {
        self.read_state().map(|inner| inner.degraded).unwrap_or(false)
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.read_state()?.settings.clone())
    }

    /// Change the history size, evict down to it right away and save the settings.
    ///
    /// Returns the evicted paths.
    pub fn set_remember_max_files(&self, remember_max_files: i64) -> Result<Vec<String>> {
        let (evicted, settings) = {
            let mut inner = self.write_state()?;
            inner.settings.remember_max_files = remember_max_files;
            inner.cache.set_capacity_limit(remember_max_files);
            (inner.cache.evict_excess(), inner.settings.clone())
        };
        settings.save(&self.storage)?;
        Ok(evicted)
    }

    pub fn set_persist_states(&self, persist_states: bool) -> Result<()> {
        let settings = {
            let mut inner = self.write_state()?;
            inner.settings.persist_states = persist_states;
            inner.settings.clone()
        };
        settings.save(&self.storage)
    }

    pub fn recall(&self, path: &str) -> Option<ViewportState> {
        self.read_state().ok()?.cache.recall(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_state().map(|inner| inner.cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of views currently carrying an unload hook.
    pub fn hooked_views(&self) -> usize {
        self.read_state()
            .map(|inner| inner.hooks.registered_count())
            .unwrap_or(0)
    }

    fn read_state(&self) -> Result<Ref<'_, TrackerState>> {
        self.shared
            .state
            .try_borrow()
            .map_err(|_| ViewportMemoryError::StateBusy)
    }

    fn write_state(&self) -> Result<RefMut<'_, TrackerState>> {
        self.shared
            .state
            .try_borrow_mut()
            .map_err(|_| ViewportMemoryError::StateBusy)
    }
}

/// Live state of another pane already showing `path`, if there is one.
fn live_state_from_other_view(
    host: &dyn Host,
    view: ViewHandle,
    path: &str,
) -> Option<ViewportState> {
    host.list_open_views()
        .into_iter()
        .filter(|other| *other != view)
        .find(|other| host.view_file(*other).as_deref() == Some(path))
        .map(|other| {
            log::debug!("Copying live state of '{path}' from {other}");
            capture_viewport(host, other)
        })
}
