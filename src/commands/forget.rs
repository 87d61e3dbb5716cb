use crate::core::{
    config::Settings, error::Result, indices::parse_history_indices, output::print_success,
    storage::Storage,
};

/// Forget remembered files by their number in `list`.
pub fn execute_forget(storage: &Storage, indices: Vec<String>) -> Result<()> {
    let settings = Settings::load_or_default(storage);
    let mut cache = storage.load(settings.remember_max_files)?;

    let ordered: Vec<String> = cache
        .recent_first()
        .into_iter()
        .map(|file| file.path.clone())
        .collect();
    let selected = parse_history_indices(&indices, ordered.len())?;

    log::debug!("Forgetting history entries {selected:?}");
    for index in &selected {
        cache.delete(&ordered[index - 1]);
    }
    storage.flush(&cache)?;

    let count = selected.len();
    print_success(&format!(
        "Forgot {} file{}",
        count,
        if count == 1 { "" } else { "s" }
    ));
    Ok(())
}
