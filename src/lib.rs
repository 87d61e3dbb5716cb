//! Viewport Memory - remembers where you were in every file.
//!
//! This library tracks per-file editor viewport state (scroll position and
//! selection) across file switches inside a host editing application, keeps a
//! bounded history of recently left files, persists it per workspace, and
//! restores the state when a file is opened again.
//!
//! # Public API
//! The main entry point is [`ViewportMemory`], driven by the host through the
//! [`Host`] trait. The building blocks are re-exported from [`core`]:
//! - State cache and viewport payload types
//! - View identity registry and unload hooks
//! - Open classification
//! - Persistence and settings
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use core::{
    FileState,
    // Host integration
    Host,
    HookState,
    OpenClassifier,
    // Open classification
    OpenKind,
    Result,
    ScrollInfo,
    Selection,
    SelectionRange,
    // Persistence and settings
    Settings,
    // State cache
    StateCache,
    Storage,
    UnloadHook,
    ViewHandle,
    ViewId,
    // Subsystem handle
    ViewportMemory,
    // Error handling
    ViewportMemoryError,
    ViewportState,
    ViewRegistry,
};
