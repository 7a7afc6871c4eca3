//! Script language parser
//!
//! A script is a list of routines:
//!
//! ```text
//! # comment
//! script {
//!     echo hello {1}
//!     call farewell
//! }
//!
//! farewell {
//!     return echo bye
//! }
//! ```
//!
//! Inside a routine every line is a shell command, except `}` (closes the
//! routine), `return CMD` and `call NAME`. A trailing `\` joins the next line.

use std::collections::BTreeMap;

use crate::domain::entities::{CommandTemplate, Routine, Script, Statement};
use crate::domain::error::DomainError;

const CONTINUATION: char = '\\';
const BLOCK_OPEN: char = '{';
const BLOCK_CLOSE: &str = "}";

/// Parse script source into a [`Script`].
pub fn parse_script(source: &str) -> Result<Script, DomainError> {
    let mut routines: BTreeMap<String, Routine> = BTreeMap::new();
    let mut current: Option<Routine> = None;

    for (line, text) in logical_lines(source) {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(routine) = current.as_mut() {
            if trimmed != BLOCK_CLOSE {
                routine.body.push(parse_statement(trimmed, line)?);
                continue;
            }
            if let Some(done) = current.take() {
                routines.insert(done.name.clone(), done);
            }
            continue;
        }

        if trimmed == BLOCK_CLOSE {
            return Err(DomainError::Syntax {
                line,
                message: "unexpected '}' outside of a routine".into(),
            });
        }
        let name = parse_header(trimmed).ok_or_else(|| DomainError::Syntax {
            line,
            message: format!("expected routine header 'NAME {{', found '{}'", trimmed),
        })?;
        if routines.contains_key(name) {
            return Err(DomainError::DuplicateRoutine {
                name: name.to_string(),
                line,
            });
        }
        current = Some(Routine::new(name, line));
    }

    if let Some(open) = current {
        return Err(DomainError::UnclosedRoutine {
            name: open.name,
            line: open.line,
        });
    }

    check_calls(&routines)?;
    Script::from_routines(routines)
}

/// Join `\`-continued lines and drop `#` comment lines.
/// Yields `(first line number, joined text)`.
fn logical_lines(source: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        // comments neither continue nor get continued
        if raw.trim_start().starts_with('#') {
            continue;
        }
        let (continued, text) = match raw.trim_end().strip_suffix(CONTINUATION) {
            Some(head) => (true, head.trim_end()),
            None => (false, raw),
        };

        let entry = match pending.take() {
            Some((start, mut joined)) => {
                joined.push(' ');
                joined.push_str(text.trim());
                (start, joined)
            }
            None => (line, text.to_string()),
        };

        if continued {
            pending = Some(entry);
        } else {
            lines.push(entry);
        }
    }

    // continuation on the last line
    if let Some(entry) = pending {
        lines.push(entry);
    }
    lines
}

/// `NAME {` -> `NAME`
fn parse_header(line: &str) -> Option<&str> {
    let name = line.strip_suffix(BLOCK_OPEN)?.trim_end();
    is_identifier(name).then_some(name)
}

fn parse_statement(line: &str, number: usize) -> Result<Statement, DomainError> {
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword {
        "return" => {
            if rest.is_empty() {
                return Err(DomainError::Syntax {
                    line: number,
                    message: "'return' needs a command".into(),
                });
            }
            Ok(Statement::Return(CommandTemplate::new(rest, number)))
        }
        "call" => {
            if !is_identifier(rest) {
                return Err(DomainError::Syntax {
                    line: number,
                    message: format!("'call' needs a routine name, found '{}'", rest),
                });
            }
            Ok(Statement::Call {
                name: rest.to_string(),
                line: number,
            })
        }
        _ => Ok(Statement::Command(CommandTemplate::new(line, number))),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

fn check_calls(routines: &BTreeMap<String, Routine>) -> Result<(), DomainError> {
    for routine in routines.values() {
        for statement in &routine.body {
            if let Statement::Call { name, line } = statement {
                if !routines.contains_key(name) {
                    return Err(DomainError::UnknownRoutine {
                        name: name.clone(),
                        line: *line,
                    });
                }
            }
        }
    }
    Ok(())
}
