//! Shared test utilities for viewport-memory
//!
//! Integration tests drive the subsystem through a scripted in-memory host and
//! keep every storage directory inside a temporary directory.

pub mod assertions;
pub mod fixtures;
pub mod host;
