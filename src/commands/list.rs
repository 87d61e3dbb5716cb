use crate::core::{
    config::Settings,
    error::Result,
    output::{print_history_line, print_info, print_section_header},
    storage::Storage,
};

pub fn execute_list(storage: &Storage) -> Result<()> {
    let settings = Settings::load_or_default(storage);
    let cache = storage.load(settings.remember_max_files)?;

    if cache.is_empty() {
        print_info("No remembered files yet");
        return Ok(());
    }

    let limit = if settings.is_bounded() {
        settings.remember_max_files.to_string()
    } else {
        "unbounded".to_string()
    };
    print_section_header(&format!(
        "Remembered files ({} of {})",
        cache.len(),
        limit
    ));
    for (position, file) in cache.recent_first().into_iter().enumerate() {
        print_history_line(position + 1, file);
    }
    println!();

    Ok(())
}
