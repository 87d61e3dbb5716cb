//! Predicates for CLI output

#![allow(dead_code)]

use predicates::prelude::*;

pub fn has_history_index(index: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("[{index}]"))
}

pub fn empty_history() -> impl Predicate<str> {
    predicates::str::contains("No remembered files yet")
}

pub fn parse_failure() -> impl Predicate<str> {
    predicates::str::contains("Failed to parse state file")
}

pub fn error_prefix() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}
