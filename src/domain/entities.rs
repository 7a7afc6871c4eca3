//! Domain entities: the loaded script and its routines

use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::parser::parse_script;

/// Name of the routine the engine invokes after loading a script.
pub const ENTRY_ROUTINE: &str = "script";

/// A shell command line as written in the script, before placeholder expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub text: String,
    /// 1-based line in the script file
    pub line: usize,
}

impl CommandTemplate {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }
}

/// One line of a routine body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Run the command and continue
    Command(CommandTemplate),
    /// Run the command and leave the routine
    Return(CommandTemplate),
    /// Run another routine of the same script
    Call { name: String, line: usize },
}

/// Named, ordered list of statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    pub name: String,
    /// Line of the routine header
    pub line: usize,
    pub body: Vec<Statement>,
}

impl Routine {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            body: Vec::new(),
        }
    }
}

/// A parsed script. Always carries an entry routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    entry: Routine,
    routines: BTreeMap<String, Routine>,
}

impl Script {
    /// Parse script source text.
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        parse_script(source)
    }

    /// Build a script from parsed routines.
    ///
    /// Fails if no routine is named [`ENTRY_ROUTINE`].
    pub fn from_routines(mut routines: BTreeMap<String, Routine>) -> Result<Self, DomainError> {
        let entry = routines
            .remove(ENTRY_ROUTINE)
            .ok_or_else(|| DomainError::MissingEntryRoutine(ENTRY_ROUTINE.to_string()))?;
        Ok(Self { entry, routines })
    }

    pub fn entry(&self) -> &Routine {
        &self.entry
    }

    /// Look up a routine by name, the entry routine included.
    pub fn routine(&self, name: &str) -> Option<&Routine> {
        if name == self.entry.name {
            Some(&self.entry)
        } else {
            self.routines.get(name)
        }
    }

    /// All routine names, entry first.
    pub fn routine_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.entry.name.as_str()).chain(self.routines.keys().map(String::as_str))
    }
}

/// Expand environment variables and tilde in a path.
///
/// Supports `$VAR`, `${VAR}`, and `~` (from `HOME`), looked up in `env`.
/// Unknown variables are left as written.
pub fn expand_env_vars(path: &str, env: &BTreeMap<String, String>) -> String {
    shellexpand::full_with_context_no_errors(
        path,
        || env.get("HOME").map(String::as_str),
        |var| env.get(var).map(String::as_str),
    )
    .into_owned()
}
