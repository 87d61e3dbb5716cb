//! Classification of file-open notifications.
//!
//! The host reports "file opened in view" for three very different situations:
//! a real switch to another file, focus returning to a pane that already shows
//! the file, and a link-follow jump that must land where the link points.
//! Only the first may restore remembered state.

use crate::core::identity::ViewId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    /// A different file than the pane last showed; restoration allowed.
    Genuine,
    /// The pane already shows this file; live cursor and scroll must stay.
    PaneRefocus,
    /// Navigation asked for this open; the target location wins.
    Suppressed,
}

impl OpenKind {
    pub fn should_restore(self) -> bool {
        matches!(self, OpenKind::Genuine)
    }
}

#[derive(Debug, Default)]
pub struct OpenClassifier {
    suppress_next_open: bool,
    last_open_path: HashMap<ViewId, String>,
}

impl OpenClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the next open as navigation-driven.
    pub fn suppress_next_open(&mut self) {
        self.suppress_next_open = true;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_next_open
    }

    /// Read and reset the suppression flag.
    pub fn take_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_next_open)
    }

    /// Classify an open of `path` in the view identified by `view`.
    ///
    /// The suppression flag is consumed and the view's last path is updated
    /// whatever the outcome.
    pub fn classify(&mut self, view: ViewId, path: &str) -> OpenKind {
        let kind = if self.take_suppression() {
            OpenKind::Suppressed
        } else if self.last_open_path.get(&view).map(String::as_str) == Some(path) {
            OpenKind::PaneRefocus
        } else {
            OpenKind::Genuine
        };

        self.last_open_path.insert(view, path.to_string());
        log::debug!("Open of '{path}' in view {view} classified as {kind:?}");
        kind
    }

    pub fn last_open_path(&self, view: ViewId) -> Option<&str> {
        self.last_open_path.get(&view).map(String::as_str)
    }

    /// Follow a rename so panes showing the moved file still count as refocus.
    pub fn rename(&mut self, old_path: &str, new_path: &str) {
        for path in self.last_open_path.values_mut() {
            if path == old_path {
                *path = new_path.to_string();
            }
        }
    }

    pub fn forget_view(&mut self, view: ViewId) {
        self.last_open_path.remove(&view);
    }

    pub fn clear(&mut self) {
        self.suppress_next_open = false;
        self.last_open_path.clear();
    }
}
