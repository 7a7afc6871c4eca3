//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod invocation;
pub mod output;

pub use args::{Cli, Subcommand};
pub use commands::{dispatch, execute_command, USAGE};
pub use error::{CliError, CliResult};
pub use invocation::Invocation;
