//! CLI-level errors (wraps application errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("script path is required: unshell run SCRIPT_PATH [ARGS...]")]
    MissingScriptPath,

    #[error("invalid SCRIPT_PATH {path}: {source}")]
    ScriptLoad {
        path: PathBuf,
        #[source]
        source: ApplicationError,
    },

    #[error("script {path} failed: {source}")]
    ScriptExecution {
        path: PathBuf,
        #[source]
        source: ApplicationError,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingScriptPath => crate::exitcode::USAGE,
            CliError::ScriptLoad { source, .. } => match source {
                ApplicationError::ScriptNotFound(_) | ApplicationError::ScriptUnreadable { .. } => {
                    crate::exitcode::NOINPUT
                }
                ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                _ => crate::exitcode::SOFTWARE,
            },
            CliError::ScriptExecution { source, .. } => match source {
                ApplicationError::CommandSpawn { .. } => crate::exitcode::OSERR,
                _ => crate::exitcode::SOFTWARE,
            },
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}
