pub mod clear;
pub mod config;
pub mod forget;
pub mod list;
pub mod prune;

pub use clear::*;
pub use config::*;
pub use forget::*;
pub use list::*;
pub use prune::*;
