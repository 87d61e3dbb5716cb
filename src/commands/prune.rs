use crate::core::{
    config::Settings,
    error::Result,
    output::{print_info, print_success},
    storage::Storage,
};

/// Trim the persisted history down to the configured limit.
pub fn execute_prune(storage: &Storage) -> Result<usize> {
    let settings = Settings::load_or_default(storage);
    let mut cache = storage.load(settings.remember_max_files)?;

    let evicted = cache.evict_excess();
    if evicted.is_empty() {
        print_info("Nothing to prune");
        return Ok(0);
    }

    storage.flush(&cache)?;
    print_success(&format!(
        "Pruned {} file{} beyond the limit of {}",
        evicted.len(),
        if evicted.len() == 1 { "" } else { "s" },
        settings.remember_max_files
    ));
    Ok(evicted.len())
}
