//! Command-line interface module.

mod args;
pub mod browse;
pub mod categories;
pub mod export;
pub mod list;

pub use args::{Cli, Commands};
