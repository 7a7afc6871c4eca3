//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors cover the script language itself: parsing and placeholder expansion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: routine '{name}' is already defined")]
    DuplicateRoutine { name: String, line: usize },

    #[error("line {line}: routine '{name}' is never closed")]
    UnclosedRoutine { name: String, line: usize },

    #[error("line {line}: call to undefined routine '{name}'")]
    UnknownRoutine { name: String, line: usize },

    #[error("entry routine '{0}' is not defined")]
    MissingEntryRoutine(String),

    #[error("line {line}: argument {{{index}}} was not provided")]
    MissingArgument { index: usize, line: usize },
}
