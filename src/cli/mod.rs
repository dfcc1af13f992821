//! CLI layer: argument parsing, command dispatch and terminal presentation

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod presenter;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
