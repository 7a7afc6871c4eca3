//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Format a failure marker line (red X), e.g. `✘ unshell: Invalid SCRIPT_PATH`
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("{} {}", "✘".red(), msg)
}
