//! Durable storage for the remembered-files cache.
//!
//! [`Storage`] owns one private directory holding `states.json` (the cache) and
//! `settings.json` (see [`crate::core::config`]). The cache document layout is:
//!
//! ```text
//! { "rememberedFiles": { "<path>": { "path": "<path>", "lastSavedTime": <ms>,
//!     "stateData": { "scrollInfo": { "top": <num>, "left": <num> }, "selection": {...} } } } }
//! ```
//!
//! # Failure policy
//! - **Hydrate** never fails: a missing, unreadable or corrupt file yields an empty cache
//! - **Flush** surfaces write failures to the caller and leaves the in-memory cache alone
//! - Writes go to a sibling temp file that is renamed over the target, so a crash
//!   mid-write leaves the previous flush intact

use crate::core::dirs::get_workspace_directory;
use crate::core::error::{Result, ViewportMemoryError};
use crate::core::state::{FileState, StateCache};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "states.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedStates {
    #[serde(default)]
    remembered_files: BTreeMap<String, FileState>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Storage rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The default private directory for a workspace.
    pub fn for_workspace(workspace_root: &Path) -> Result<Self> {
        Ok(Self::at(get_workspace_directory(workspace_root)?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn state_file(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub(crate) fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            log::error!(
                "Failed to create storage directory '{}': {}",
                self.dir.display(),
                e
            );
            ViewportMemoryError::storage_directory_creation_failed(&self.dir, e)
        })
    }

    /// Write every entry of `cache` to the state file.
    pub fn flush(&self, cache: &StateCache) -> Result<()> {
        log::debug!("Flushing {} remembered files", cache.len());
        self.ensure_dir()?;

        let document = PersistedStates {
            remembered_files: cache
                .entries()
                .map(|file| (file.path.clone(), file.clone()))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&document).map_err(|e| {
            log::error!("Failed to serialize remembered files: {e}");
            ViewportMemoryError::serialization_failed(e)
        })?;

        let state_file = self.state_file();
        let temp_file = self.dir.join(format!("{STATE_FILE}.tmp"));
        fs::write(&temp_file, json)
            .and_then(|()| fs::rename(&temp_file, &state_file))
            .map_err(|e| {
                log::error!(
                    "Failed to write state file '{}': {}",
                    state_file.display(),
                    e
                );
                let _ = fs::remove_file(&temp_file);
                ViewportMemoryError::storage_write_failed(&state_file, e)
            })?;

        log::debug!("Flushed remembered files to {}", state_file.display());
        Ok(())
    }

    /// Strict load of the state file; a missing file is an empty cache.
    pub fn load(&self, capacity_limit: i64) -> Result<StateCache> {
        let state_file = self.state_file();
        if !state_file.exists() {
            log::debug!("State file does not exist: {}", state_file.display());
            return Ok(StateCache::new(capacity_limit));
        }

        let content = fs::read_to_string(&state_file)
            .map_err(|e| ViewportMemoryError::storage_read_failed(&state_file, e))?;

        let document: PersistedStates = serde_json::from_str(&content).map_err(|e| {
            log::debug!("Raw state file content: {content}");
            ViewportMemoryError::storage_parse_failed(&state_file, e)
        })?;

        log::debug!(
            "Loaded {} remembered files from {}",
            document.remembered_files.len(),
            state_file.display()
        );
        Ok(StateCache::from_entries(
            capacity_limit,
            document.remembered_files,
        ))
    }

    /// Load the state file, falling back to an empty cache on any failure.
    pub fn hydrate(&self, capacity_limit: i64) -> StateCache {
        match self.load(capacity_limit) {
            Ok(cache) => cache,
            Err(e) => {
                log::error!("Starting with an empty history: {e}");
                StateCache::new(capacity_limit)
            }
        }
    }
}
