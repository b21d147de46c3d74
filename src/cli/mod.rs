//! Command-line interface module.

mod args;
pub mod import;

pub use args::{Cli, Commands, ImportArgs};
