//! Per-file viewport state and the bounded recent-file cache.
//!
//! This module defines the data remembered for each file and the [`StateCache`]
//! that holds it. The cache is a plain keyed map plus a save timestamp per entry;
//! least-recently-saved entries are swept out whenever a new path pushes the
//! cache past its capacity.
//!
//! # Public API
//! - [`ScrollInfo`], [`SelectionRange`], [`Selection`]: the viewport payload
//! - [`ViewportState`]: scroll offset plus selection for one view
//! - [`FileState`]: a remembered file with its last save time
//! - [`StateCache`]: capacity-bounded mapping from file path to [`FileState`]
//!
//! # Recency
//! - Only [`StateCache::remember`] touches recency; [`StateCache::recall`] is a pure lookup
//! - Save times are wall-clock milliseconds, bumped so that no two saves in one
//!   process share a stamp

use crate::core::error::{Result, ViewportMemoryError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scroll offset of a view, in host units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollInfo {
    pub top: f64,
    pub left: f64,
}

impl ScrollInfo {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }
}

/// Ordered selection ranges with the index of the primary range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub ranges: Vec<SelectionRange>,
    #[serde(default)]
    pub main: usize,
}

impl Selection {
    /// A single collapsed cursor at `offset`
    pub fn cursor(offset: usize) -> Self {
        Self {
            ranges: vec![SelectionRange::new(offset, offset)],
            main: 0,
        }
    }

    pub fn from_ranges(ranges: Vec<SelectionRange>) -> Self {
        Self { ranges, main: 0 }
    }

    /// Check that a stored selection can be handed back to an editor.
    pub fn validate(&self, path: &str) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(ViewportMemoryError::restore(path, "selection has no ranges"));
        }
        if self.main >= self.ranges.len() {
            return Err(ViewportMemoryError::restore(
                path,
                format!(
                    "main range {} out of bounds for {} ranges",
                    self.main,
                    self.ranges.len()
                ),
            ));
        }
        Ok(())
    }
}

/// Scroll and selection captured from a view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    #[serde(default)]
    pub scroll_info: ScrollInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

impl ViewportState {
    pub fn new(scroll_info: ScrollInfo, selection: Option<Selection>) -> Self {
        Self {
            scroll_info,
            selection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileState {
    pub path: String,
    pub last_saved_time: i64,
    pub state_data: ViewportState,
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Capacity-bounded mapping from file path to its last remembered viewport state.
///
/// A `capacity_limit` of zero or less disables eviction.
#[derive(Debug, Clone, Default)]
pub struct StateCache {
    entries: HashMap<String, FileState>,
    capacity_limit: i64,
    clock: i64,
}

impl StateCache {
    pub fn new(capacity_limit: i64) -> Self {
        Self {
            entries: HashMap::new(),
            capacity_limit,
            clock: 0,
        }
    }

    /// Build a cache from previously persisted entries, keeping their save times.
    ///
    /// Entries are keyed by the map key; an inner `path` that disagrees is rewritten.
    pub fn from_entries<I>(capacity_limit: i64, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, FileState)>,
    {
        let mut cache = Self::new(capacity_limit);
        for (key, mut file) in entries {
            if file.path != key {
                log::warn!(
                    "Persisted entry key '{}' does not match its path '{}', using the key",
                    key,
                    file.path
                );
                file.path = key.clone();
            }
            cache.clock = cache.clock.max(file.last_saved_time);
            cache.entries.insert(key, file);
        }
        cache
    }

    /// Upsert the state for `path`, stamped with the current time.
    pub fn remember(&mut self, path: &str, state: ViewportState) {
        self.remember_at(path, state, now_millis());
    }

    /// Upsert the state for `path` with an explicit clock reading.
    ///
    /// Stamps never repeat or go backwards within one cache, so ordering by
    /// `last_saved_time` always reflects the order of saves.
    pub fn remember_at(&mut self, path: &str, state: ViewportState, now: i64) {
        let stamp = now.max(self.clock.saturating_add(1));
        self.clock = stamp;

        if let Some(existing) = self.entries.get_mut(path) {
            existing.state_data = state;
            existing.last_saved_time = stamp;
            log::debug!("Updated remembered state for '{path}'");
            return;
        }

        self.entries.insert(
            path.to_string(),
            FileState {
                path: path.to_string(),
                last_saved_time: stamp,
                state_data: state,
            },
        );
        log::debug!("Remembered new file '{path}' ({} entries)", self.entries.len());
        self.evict_excess();
    }

    pub fn recall(&self, path: &str) -> Option<&ViewportState> {
        self.entries.get(path).map(|file| &file.state_data)
    }

    pub fn get(&self, path: &str) -> Option<&FileState> {
        self.entries.get(path)
    }

    /// Drop every entry beyond `capacity_limit`, oldest save first.
    ///
    /// Returns the removed paths. No-op when the limit is zero or negative.
    pub fn evict_excess(&mut self) -> Vec<String> {
        let limit = match usize::try_from(self.capacity_limit) {
            Ok(limit) if limit > 0 => limit,
            _ => return Vec::new(),
        };
        if self.entries.len() <= limit {
            return Vec::new();
        }

        let evicted: Vec<String> = self
            .recent_first()
            .into_iter()
            .skip(limit)
            .map(|file| file.path.clone())
            .collect();

        for path in &evicted {
            self.entries.remove(path);
        }
        log::debug!(
            "Evicted {} entries to honour limit {}: {:?}",
            evicted.len(),
            limit,
            evicted
        );
        evicted
    }

    /// Move the entry at `old_path` to `new_path`, keeping its save time.
    ///
    /// An existing entry at `new_path` is overwritten.
    pub fn rename(&mut self, old_path: &str, new_path: &str) {
        if old_path == new_path {
            return;
        }
        if let Some(mut file) = self.entries.remove(old_path) {
            file.path = new_path.to_string();
            if self.entries.insert(new_path.to_string(), file).is_some() {
                log::debug!("Rename of '{old_path}' overwrote existing state for '{new_path}'");
            } else {
                log::debug!("Moved remembered state '{old_path}' -> '{new_path}'");
            }
        }
    }

    pub fn delete(&mut self, path: &str) -> Option<FileState> {
        let removed = self.entries.remove(path);
        if removed.is_some() {
            log::debug!("Forgot remembered state for '{path}'");
        }
        removed
    }

    /// Entries ordered by save time, most recent first; ties fall back to path order.
    pub fn recent_first(&self) -> Vec<&FileState> {
        let mut files: Vec<&FileState> = self.entries.values().collect();
        files.sort_by(|a, b| {
            b.last_saved_time
                .cmp(&a.last_saved_time)
                .then_with(|| a.path.cmp(&b.path))
        });
        files
    }

    pub fn entries(&self) -> impl Iterator<Item = &FileState> {
        self.entries.values()
    }

    pub fn capacity_limit(&self) -> i64 {
        self.capacity_limit
    }

    pub fn set_capacity_limit(&mut self, capacity_limit: i64) {
        self.capacity_limit = capacity_limit;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}
