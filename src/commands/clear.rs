use crate::core::{
    config::Settings, error::Result, output::print_success, state::StateCache, storage::Storage,
};

pub fn execute_clear(storage: &Storage) -> Result<()> {
    let settings = Settings::load_or_default(storage);
    let count = storage.hydrate(settings.remember_max_files).len();

    storage.flush(&StateCache::new(settings.remember_max_files))?;
    print_success(&format!(
        "Cleared {} remembered file{}",
        count,
        if count == 1 { "" } else { "s" }
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ViewportState;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clear_empties_history() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let storage = Storage::at(temp_dir.path());
        let mut cache = StateCache::new(20);
        cache.remember_at("a.md", ViewportState::default(), 1);
        storage.flush(&cache)?;

        execute_clear(&storage)?;
        assert!(storage.load(20)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_clear_recovers_corrupt_storage() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let storage = Storage::at(temp_dir.path());
        fs::write(storage.state_file(), "{ broken")?;

        execute_clear(&storage)?;
        assert!(storage.load(20)?.is_empty());
        Ok(())
    }
}
