//! Scripted host editor for driving the subsystem in tests
//!
//! [`MockHost`] keeps a set of panes, each showing at most one file with a
//! scroll offset and selection. Switching a pane's file behaves like a real
//! editor: the installed unload hook fires first, then the new document is
//! loaded at the top with the cursor at offset 0, then the open is reported.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use viewport_memory::core::error::{Result, ViewportMemoryError};
use viewport_memory::core::tracker::ViewportMemory;
use viewport_memory::{Host, OpenKind, ScrollInfo, Selection, UnloadHook, ViewHandle};

#[derive(Debug, Clone, Default)]
pub struct MockView {
    pub file: Option<String>,
    pub scroll: ScrollInfo,
    pub selection: Option<Selection>,
}

pub struct MockHost {
    views: RefCell<BTreeMap<ViewHandle, MockView>>,
    active: Cell<Option<ViewHandle>>,
    hooks: RefCell<HashMap<ViewHandle, UnloadHook>>,
    notices: RefCell<Vec<String>>,
    supports_viewport: Cell<bool>,
    fail_selection_writes: Cell<bool>,
    viewport_writes: Cell<usize>,
    next_handle: Cell<u64>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            views: RefCell::new(BTreeMap::new()),
            active: Cell::new(None),
            hooks: RefCell::new(HashMap::new()),
            notices: RefCell::new(Vec::new()),
            supports_viewport: Cell::new(true),
            fail_selection_writes: Cell::new(false),
            viewport_writes: Cell::new(0),
            next_handle: Cell::new(1),
        }
    }

    /// A host whose editor mode cannot report scroll or selection.
    pub fn legacy() -> Self {
        let host = Self::new();
        host.supports_viewport.set(false);
        host
    }

    /// Create an empty pane and focus it.
    pub fn open_pane(&self) -> ViewHandle {
        let handle = ViewHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.views.borrow_mut().insert(handle, MockView::default());
        self.active.set(Some(handle));
        handle
    }

    /// Create a pane reusing a specific handle, as hosts that recycle objects do.
    pub fn open_pane_with_handle(&self, handle: ViewHandle) -> ViewHandle {
        self.views.borrow_mut().insert(handle, MockView::default());
        self.active.set(Some(handle));
        handle
    }

    pub fn focus(&self, view: ViewHandle) {
        self.active.set(Some(view));
    }

    pub fn clear_focus(&self) {
        self.active.set(None);
    }

    /// Load `path` into `view` and report the open to `memory`.
    pub fn switch_file(
        &self,
        memory: &ViewportMemory,
        view: ViewHandle,
        path: &str,
    ) -> Option<OpenKind> {
        self.fire_unload(view);
        if let Some(pane) = self.views.borrow_mut().get_mut(&view) {
            pane.file = Some(path.to_string());
            pane.scroll = ScrollInfo::default();
            pane.selection = Some(Selection::cursor(0));
        }
        self.active.set(Some(view));
        memory.on_file_open(self, path)
    }

    /// Report focus returning to `view` without any content change.
    pub fn refocus(&self, memory: &ViewportMemory, view: ViewHandle) -> Option<OpenKind> {
        self.active.set(Some(view));
        let path = self.view(view).file?;
        memory.on_file_open(self, &path)
    }

    /// Destroy a pane: unload hook first, then teardown notification.
    pub fn close_pane(&self, memory: &ViewportMemory, view: ViewHandle) {
        self.fire_unload(view);
        self.views.borrow_mut().remove(&view);
        if self.active.get() == Some(view) {
            self.active.set(None);
        }
        memory.on_view_destroyed(self, view);
    }

    pub fn fire_unload(&self, view: ViewHandle) {
        let hook = self.hooks.borrow().get(&view).cloned();
        if let Some(hook) = hook {
            hook.before_unload(self, view);
        }
    }

    pub fn scroll_to(&self, view: ViewHandle, top: f64) {
        if let Some(pane) = self.views.borrow_mut().get_mut(&view) {
            pane.scroll = ScrollInfo::new(top, 0.0);
        }
    }

    pub fn select(&self, view: ViewHandle, selection: Selection) {
        if let Some(pane) = self.views.borrow_mut().get_mut(&view) {
            pane.selection = Some(selection);
        }
    }

    pub fn view(&self, view: ViewHandle) -> MockView {
        self.views.borrow().get(&view).cloned().unwrap_or_default()
    }

    pub fn hook_for(&self, view: ViewHandle) -> Option<UnloadHook> {
        self.hooks.borrow().get(&view).cloned()
    }

    pub fn installed_hooks(&self) -> usize {
        self.hooks.borrow().len()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn viewport_writes(&self) -> usize {
        self.viewport_writes.get()
    }

    pub fn fail_selection_writes(&self, fail: bool) {
        self.fail_selection_writes.set(fail);
    }
}

impl Host for MockHost {
    fn active_view(&self) -> Option<ViewHandle> {
        self.active.get()
    }

    fn list_open_views(&self) -> Vec<ViewHandle> {
        self.views.borrow().keys().copied().collect()
    }

    fn view_file(&self, view: ViewHandle) -> Option<String> {
        self.views.borrow().get(&view).and_then(|pane| pane.file.clone())
    }

    fn scroll_position(&self, view: ViewHandle) -> ScrollInfo {
        self.view(view).scroll
    }

    fn set_scroll_position(&self, view: ViewHandle, scroll: ScrollInfo) -> Result<()> {
        self.viewport_writes.set(self.viewport_writes.get() + 1);
        if let Some(pane) = self.views.borrow_mut().get_mut(&view) {
            pane.scroll = scroll;
        }
        Ok(())
    }

    fn selection(&self, view: ViewHandle) -> Option<Selection> {
        if !self.supports_viewport.get() {
            return None;
        }
        self.view(view).selection
    }

    fn set_selection(&self, view: ViewHandle, selection: &Selection) -> Result<()> {
        if self.fail_selection_writes.get() {
            return Err(ViewportMemoryError::restore(
                self.view_file(view).unwrap_or_default(),
                "editor rejected the selection",
            ));
        }
        self.viewport_writes.set(self.viewport_writes.get() + 1);
        if let Some(pane) = self.views.borrow_mut().get_mut(&view) {
            pane.selection = Some(selection.clone());
        }
        Ok(())
    }

    fn supports_viewport_state(&self) -> bool {
        self.supports_viewport.get()
    }

    fn show_notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn install_unload_hook(&self, view: ViewHandle, hook: UnloadHook) {
        self.hooks.borrow_mut().insert(view, hook);
    }

    fn uninstall_unload_hook(&self, view: ViewHandle) {
        self.hooks.borrow_mut().remove(&view);
    }
}
