//! CLI argument definitions using clap
//!
//! The surface is positional: `unshell [-d..] COMMAND [SCRIPT_PATH] [ARGS...]`.
//! Everything from COMMAND on is captured verbatim, hyphenated words included.

use clap::{ArgAction, Parser};

/// Execute script through unshell runtime
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "unshell")]
#[command(author, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// COMMAND [SCRIPT_PATH] [ARGS...]
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

/// The behavior selected by the first positional word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    Help,
    Run,
    /// Anything else; handled like `Help`
    Unknown(String),
}

impl Subcommand {
    pub fn from_word(word: Option<&str>) -> Self {
        match word {
            None | Some("help") => Self::Help,
            Some("run") => Self::Run,
            Some(other) => Self::Unknown(other.to_string()),
        }
    }
}

impl Cli {
    pub fn subcommand(&self) -> Subcommand {
        Subcommand::from_word(self.words.first().map(String::as_str))
    }

    /// Word after the subcommand, if any.
    pub fn script_path(&self) -> Option<&str> {
        self.words.get(1).map(String::as_str)
    }

    /// Words after the script path, forwarded to the script.
    pub fn script_args(&self) -> &[String] {
        self.words.get(2..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["unshell"], Subcommand::Help)]
    #[case(&["unshell", "help"], Subcommand::Help)]
    #[case(&["unshell", "run"], Subcommand::Run)]
    #[case(&["unshell", "bogus", "foo"], Subcommand::Unknown("bogus".into()))]
    fn given_words_when_parsing_then_selects_subcommand(
        #[case] args: &[&str],
        #[case] expected: Subcommand,
    ) {
        assert_eq!(parse(args).subcommand(), expected);
    }

    #[test]
    fn given_run_with_trailing_args_when_parsing_then_keeps_them_verbatim() {
        let cli = parse(&["unshell", "-dd", "run", "deploy.unsh", "--force", "-x", "prod"]);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.script_path(), Some("deploy.unsh"));
        assert_eq!(cli.script_args(), &["--force", "-x", "prod"]);
    }

    #[test]
    fn given_run_without_path_when_parsing_then_path_is_none() {
        let cli = parse(&["unshell", "run"]);
        assert_eq!(cli.script_path(), None);
        assert!(cli.script_args().is_empty());
    }
}
