//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ViewportMemoryError`] which covers every failure the
//! subsystem can hit. Nothing here is fatal to the host: callbacks log these and
//! degrade to "state not remembered/restored", only the persistence and CLI
//! surfaces hand them back to the caller.
//!
//! # Public API
//! - [`ViewportMemoryError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ViewportMemoryError>`
//!
//! # Error Categories
//! - **Storage**: directory resolution, read, parse, serialization and write failures
//! - **Restore**: malformed stored payloads or views that refuse a restore
//! - **Editor mode**: host editor lacking viewport capabilities
//! - **Index parsing**: invalid format, out of bounds, validation errors (CLI)
//! - **Settings**: invalid values supplied through the settings surface

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for viewport-memory
#[derive(Error, Debug)]
pub enum ViewportMemoryError {
    // Storage errors
    #[error("Could not find storage directory")]
    StorageDirectoryNotFound,

    #[error("Failed to create storage directory '{path}': {source}")]
    StorageDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read state file '{path}': {source}")]
    StorageReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    StorageParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize remembered files: {source}")]
    SerializationFailed { source: serde_json::Error },

    #[error("Failed to write state file '{path}': {source}")]
    StorageWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Restore errors
    #[error("Cannot restore view state for '{path}': {reason}")]
    Restore { path: String, reason: String },

    #[error("The active editor does not support scroll and selection state")]
    UnsupportedEditorMode,

    #[error("Viewport state is busy with another host callback")]
    StateBusy,

    // Index parsing errors
    #[error("No file indices provided. Usage: forget <indices>\nExample: forget 1 3-5,8")]
    NoIndicesProvided,

    #[error("No valid indices provided. Use format like: 1, 1-3, or 1,3,5")]
    NoValidIndices,

    #[error("Invalid range format: '{range}'. Use format like '3-6'")]
    InvalidRangeFormat { range: String },

    #[error("Invalid number in range: '{number}'")]
    InvalidRangeNumber { number: String },

    #[error("Invalid range: start ({start}) must be <= end ({end})")]
    InvalidRangeOrder { start: usize, end: usize },

    #[error("Invalid number: '{number}'")]
    InvalidNumber { number: String },

    #[error("Index must be positive (got 0)")]
    ZeroIndex,

    #[error("Index {index} is out of range (1-{max} available)")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("No remembered files to operate on")]
    NoFilesAvailable,

    // Settings errors
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: String, reason: String },
}

/// Convenience type alias for Results using ViewportMemoryError
pub type Result<T> = std::result::Result<T, ViewportMemoryError>;

impl ViewportMemoryError {
    /// Create a restore error for a specific file
    pub fn restore(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Restore {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid setting error
    pub fn invalid_setting(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, max: usize) -> Self {
        Self::IndexOutOfRange { index, max }
    }

    /// Create an invalid range format error
    pub fn invalid_range_format(range: impl Into<String>) -> Self {
        Self::InvalidRangeFormat {
            range: range.into(),
        }
    }

    /// Create an invalid range number error
    pub fn invalid_range_number(number: impl Into<String>) -> Self {
        Self::InvalidRangeNumber {
            number: number.into(),
        }
    }

    /// Create an invalid range order error
    pub fn invalid_range_order(start: usize, end: usize) -> Self {
        Self::InvalidRangeOrder { start, end }
    }

    /// Create an invalid number error
    pub fn invalid_number(number: impl Into<String>) -> Self {
        Self::InvalidNumber {
            number: number.into(),
        }
    }

    /// Create a storage directory creation failed error
    pub fn storage_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::StorageDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization failed error
    pub fn serialization_failed(source: serde_json::Error) -> Self {
        Self::SerializationFailed { source }
    }

    /// Create a storage write failed error
    pub fn storage_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a storage read failed error
    pub fn storage_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a storage parse failed error
    pub fn storage_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::StorageParseFailed {
            path: path.into(),
            source,
        }
    }
}
