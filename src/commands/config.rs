use crate::commands::prune::execute_prune;
use crate::core::{
    config::{parse_bool_setting, Settings},
    error::Result,
    output::{print_section_header, print_success},
    storage::Storage,
};
use colored::*;

/// Show the settings, or update them when any value is given.
pub fn execute_config(
    storage: &Storage,
    max_files: Option<i64>,
    persist: Option<String>,
) -> Result<()> {
    let mut settings = Settings::load_or_default(storage);

    if max_files.is_none() && persist.is_none() {
        print_settings(&settings);
        return Ok(());
    }

    if let Some(value) = persist {
        settings.persist_states = parse_bool_setting("persist", &value)?;
    }
    let limit_changed = match max_files {
        Some(limit) if limit != settings.remember_max_files => {
            settings.remember_max_files = limit;
            true
        }
        _ => false,
    };

    settings.save(storage)?;
    print_success("Settings saved");
    print_settings(&settings);

    if limit_changed && storage.state_file().exists() {
        execute_prune(storage)?;
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    print_section_header("Settings");
    let limit = if settings.is_bounded() {
        settings.remember_max_files.to_string()
    } else {
        format!("{} (unbounded)", settings.remember_max_files)
    };
    println!("   {}  {}", "remember max files".bright_black(), limit.white());
    println!(
        "   {}  {}",
        "persist states    ".bright_black(),
        settings.persist_states.to_string().white()
    );
    println!();
}
