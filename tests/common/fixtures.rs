//! Storage setups shared by the integration tests

#![allow(dead_code)]

use std::fs;
use tempfile::TempDir;
use anyhow::Result;
use viewport_memory::{ScrollInfo, Selection, Settings, StateCache, Storage, ViewportState};

/// Temporary storage directory; keep the `TempDir` alive for the whole test.
pub struct TestStorage {
    pub temp_dir: TempDir,
    pub storage: Storage,
}

pub fn empty_storage() -> Result<TestStorage> {
    let temp_dir = TempDir::new()?;
    let storage = Storage::at(temp_dir.path().join("store"));
    Ok(TestStorage { temp_dir, storage })
}

pub fn storage_with_settings(settings: Settings) -> Result<TestStorage> {
    let test_storage = empty_storage()?;
    settings.save(&test_storage.storage)?;
    Ok(test_storage)
}

pub fn viewport(top: f64, cursor: usize) -> ViewportState {
    ViewportState::new(ScrollInfo::new(top, 0.0), Some(Selection::cursor(cursor)))
}

/// Storage already holding `paths`, saved in the given order (last is most recent).
pub fn storage_with_history(paths: &[&str]) -> Result<TestStorage> {
    let test_storage = empty_storage()?;
    let mut cache = StateCache::new(0);
    for (i, path) in paths.iter().enumerate() {
        cache.remember_at(path, viewport(i as f64 * 10.0, i), 1_000 + i as i64);
    }
    test_storage.storage.flush(&cache)?;
    Ok(test_storage)
}

pub fn write_raw_state_file(test_storage: &TestStorage, content: &str) -> Result<()> {
    fs::create_dir_all(test_storage.storage.dir())?;
    fs::write(test_storage.storage.state_file(), content)?;
    Ok(())
}
