//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add loader, engine and config concerns.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("cannot read script {path}")]
    ScriptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot start '{command}'")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed ({status}): {command}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("routine '{name}' exceeds the maximum call depth of {max_depth}")]
    CallDepthExceeded { name: String, max_depth: usize },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
