//! Parsing of history numbers typed on the command line.
//!
//! `forget` accepts the numbers shown by `list` in a compact syntax:
//! - **Single numbers**: `1`, `3`
//! - **Separated by spaces or commas**: `1 3 5`, `1,3,5`
//! - **Inclusive ranges**: `3-6`
//! - **Any mix across arguments**: `1 3-5,8`
//!
//! Numbers are 1-based, deduplicated and returned in ascending order.

use crate::core::error::{Result, ViewportMemoryError};
use std::collections::BTreeSet;

/// Parse and validate history numbers against the `available` entry count.
pub fn parse_history_indices(args: &[String], available: usize) -> Result<Vec<usize>> {
    if args.is_empty() {
        return Err(ViewportMemoryError::NoIndicesProvided);
    }

    let mut indices = BTreeSet::new();
    for token in args
        .iter()
        .flat_map(|arg| arg.split([' ', ',']))
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = parse_range(token, start, end, available)?;
                indices.extend(start..=end);
            }
            None => {
                let index = token
                    .parse::<usize>()
                    .map_err(|_| ViewportMemoryError::invalid_number(token))?;
                indices.insert(index);
            }
        }
    }

    if indices.is_empty() {
        return Err(ViewportMemoryError::NoValidIndices);
    }
    validate(&indices, available)?;
    Ok(indices.into_iter().collect())
}

/// Parse `start-end` and bound it by `available` before it is ever expanded.
fn parse_range(token: &str, start: &str, end: &str, available: usize) -> Result<(usize, usize)> {
    if end.contains('-') {
        return Err(ViewportMemoryError::invalid_range_format(token));
    }
    let start: usize = start
        .parse()
        .map_err(|_| ViewportMemoryError::invalid_range_number(start))?;
    let end: usize = end
        .parse()
        .map_err(|_| ViewportMemoryError::invalid_range_number(end))?;
    if start > end {
        return Err(ViewportMemoryError::invalid_range_order(start, end));
    }
    if available == 0 {
        return Err(ViewportMemoryError::NoFilesAvailable);
    }
    if start == 0 {
        return Err(ViewportMemoryError::ZeroIndex);
    }
    if end > available {
        return Err(ViewportMemoryError::index_out_of_range(end, available));
    }
    Ok((start, end))
}

fn validate(indices: &BTreeSet<usize>, available: usize) -> Result<()> {
    if available == 0 {
        return Err(ViewportMemoryError::NoFilesAvailable);
    }
    if indices.contains(&0) {
        return Err(ViewportMemoryError::ZeroIndex);
    }
    match indices.last() {
        Some(&largest) if largest > available => {
            Err(ViewportMemoryError::index_out_of_range(largest, available))
        }
        _ => Ok(()),
    }
}
