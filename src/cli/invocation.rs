//! One process run: arguments plus environment, captured once.

use std::collections::BTreeMap;

use clap::Parser;
use tracing::debug;

use crate::cli::args::Cli;

/// Arguments and environment of one run.
///
/// Position 0 of `args` is the program name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    pub fn new<I, S>(args: I, env: BTreeMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            env,
        }
    }

    /// Capture the current process arguments and environment.
    pub fn from_process() -> Self {
        let args = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
        let env = std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();
        Self::new(args, env)
    }

    /// Parse the arguments; anything clap rejects falls back to help.
    pub fn parse(&self) -> Cli {
        Cli::try_parse_from(&self.args).unwrap_or_else(|e| {
            debug!("parse: falling back to help: {}", e);
            Cli::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Subcommand;

    #[test]
    fn given_unknown_flag_when_parsing_then_does_not_run() {
        // rejected by clap (help) or taken as an unknown word (help as well)
        let invocation = Invocation::new(["unshell", "--no-such-flag", "run"], BTreeMap::new());
        assert_ne!(invocation.parse().subcommand(), Subcommand::Run);
    }

    #[test]
    fn given_empty_args_when_parsing_then_help() {
        let invocation = Invocation::new(Vec::<String>::new(), BTreeMap::new());
        assert_eq!(invocation.parse().subcommand(), Subcommand::Help);
    }
}
