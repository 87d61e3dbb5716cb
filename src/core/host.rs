//! Collaborator interface implemented by the host editing application.
//!
//! The subsystem never owns views. It sees them through opaque [`ViewHandle`]s
//! and talks to the host only through the [`Host`] trait: reading and writing
//! viewport state, enumerating panes, and installing the per-view unload hook.
//! All calls happen on the host's single event thread.

use crate::core::error::Result;
use crate::core::hooks::UnloadHook;
use crate::core::state::{ScrollInfo, Selection, ViewportState};
use std::fmt;

/// Opaque, host-assigned key for a live view object.
///
/// Handles may be recycled by the host once a view is destroyed, which is why
/// identities are cleared on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(pub u64);

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

pub trait Host {
    /// The focused editable view, if any.
    fn active_view(&self) -> Option<ViewHandle>;

    /// Every live editable view.
    fn list_open_views(&self) -> Vec<ViewHandle>;

    /// Path of the file a view currently shows.
    fn view_file(&self, view: ViewHandle) -> Option<String>;

    fn scroll_position(&self, view: ViewHandle) -> ScrollInfo;

    fn set_scroll_position(&self, view: ViewHandle, scroll: ScrollInfo) -> Result<()>;

    /// Current selection, or `None` when the editor cannot report one.
    fn selection(&self, view: ViewHandle) -> Option<Selection>;

    fn set_selection(&self, view: ViewHandle, selection: &Selection) -> Result<()>;

    /// Whether the editor mode exposes scroll and selection state at all.
    fn supports_viewport_state(&self) -> bool {
        true
    }

    /// Show a blocking informational message to the user.
    fn show_notice(&self, message: &str);

    /// Arrange for `hook` to run immediately before `view` discards or replaces its content.
    fn install_unload_hook(&self, view: ViewHandle, hook: UnloadHook);

    fn uninstall_unload_hook(&self, view: ViewHandle);
}

/// Snapshot the live viewport state of a view.
pub fn capture_viewport(host: &dyn Host, view: ViewHandle) -> ViewportState {
    ViewportState::new(host.scroll_position(view), host.selection(view))
}

/// Push a stored viewport state into a view.
///
/// The selection is validated before anything is written, so a malformed
/// payload leaves the view untouched.
pub fn apply_viewport(
    host: &dyn Host,
    view: ViewHandle,
    path: &str,
    state: &ViewportState,
) -> Result<()> {
    if let Some(selection) = &state.selection {
        selection.validate(path)?;
        host.set_selection(view, selection)?;
    }
    host.set_scroll_position(view, state.scroll_info)
}
