//! Core functionality for viewport-memory.
//!
//! This module holds the subsystem itself (cache, view identities, open
//! classification, unload hooks, persistence) together with the small pieces
//! the maintenance CLI shares with it.

pub mod classifier;
pub mod config;
pub mod dirs;
pub mod error;
pub mod hooks;
pub mod host;
pub mod identity;
pub mod indices;
pub mod output;
pub mod state;
pub mod storage;
pub mod tracker;

// === Error handling ===
pub use error::{Result, ViewportMemoryError};

// === State cache ===
// Per-file viewport payload and the bounded recent-file history
pub use state::{FileState, ScrollInfo, Selection, SelectionRange, StateCache, ViewportState};

// === Host integration ===
// Collaborator trait the editor implements, plus view identities and hooks
pub use hooks::{HookManager, HookState, UnloadHook};
pub use host::{Host, ViewHandle};
pub use identity::{ViewId, ViewRegistry};

// === Open classification ===
pub use classifier::{OpenClassifier, OpenKind};

// === Persistence and settings ===
pub use config::Settings;
pub use storage::Storage;

// === Subsystem handle ===
pub use tracker::ViewportMemory;

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success};
