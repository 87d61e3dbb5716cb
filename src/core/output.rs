//! Output formatting for the maintenance CLI.
//!
//! Every command prints through these helpers so messages share one look:
//! a blank line before and after, red for errors, green for confirmations,
//! and muted grey for secondary details.

use crate::core::state::FileState;
use chrono::{Local, TimeZone};
use colored::*;

/// Prints an error message
///
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Prints a confirmation message
///
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Local, human-readable rendering of a save time in milliseconds
pub fn format_saved_time(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{millis}ms"),
    }
}

/// Scroll, selection count and save time of a remembered file
pub fn history_details(file: &FileState) -> String {
    let state = &file.state_data;
    let selections = state
        .selection
        .as_ref()
        .map(|selection| selection.ranges.len())
        .unwrap_or(0);
    format!(
        "(scroll {}/{}, {} selection{}, saved {})",
        state.scroll_info.top,
        state.scroll_info.left,
        selections,
        if selections == 1 { "" } else { "s" },
        format_saved_time(file.last_saved_time)
    )
}

pub fn print_history_line(index: usize, file: &FileState) {
    let head = format!("[{}] {}", index, file.path);
    println!(
        "   {}  {}",
        head.white(),
        history_details(file).bright_black()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{ScrollInfo, Selection, ViewportState};

    #[test]
    fn test_print_helpers_do_not_panic() {
        print_error("Test error message");
        print_success("Operation completed");
        print_info("Information message");
        print_section_header("Remembered files");
    }

    #[test]
    fn test_history_details() {
        let file = FileState {
            path: "notes/today.md".to_string(),
            last_saved_time: 0,
            state_data: ViewportState::new(
                ScrollInfo::new(120.0, 0.0),
                Some(Selection::cursor(4)),
            ),
        };
        let details = history_details(&file);
        assert!(details.contains("scroll 120/0"));
        assert!(details.contains("1 selection,"));
        print_history_line(3, &file);
    }

    #[test]
    fn test_history_details_ignore_spaces_in_path() {
        let file = FileState {
            path: "notes/two  spaces.md".to_string(),
            last_saved_time: 0,
            state_data: ViewportState::new(ScrollInfo::new(8.0, 2.0), None),
        };
        let details = history_details(&file);
        assert!(details.starts_with("(scroll 8/2, 0 selections"));
        assert!(!details.contains("two"));
    }

    #[test]
    fn test_format_saved_time_out_of_range() {
        assert_eq!(format_saved_time(i64::MAX), format!("{}ms", i64::MAX));
    }
}
