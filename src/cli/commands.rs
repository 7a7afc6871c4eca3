//! Command dispatch: `help` and `run`

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Subcommand};
use crate::cli::error::{CliError, CliResult};
use crate::cli::invocation::Invocation;
use crate::cli::output;
use crate::infrastructure::ServiceContainer;

/// Help text. Printed as one line, so the output starts with a blank line and
/// ends with an indented empty line.
pub const USAGE: &str = "
Execute script through unshell runtime

Usage:
unshell COMMAND [SCRIPT_PATH] [ARGS...]

Commands:
help      Print this help message
run       run a script through unshell runtime
    ";

/// Parse and execute one invocation.
pub fn dispatch(invocation: &Invocation, container: &ServiceContainer) -> CliResult<()> {
    execute_command(&invocation.parse(), container)
}

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match cli.subcommand() {
        Subcommand::Help => help(container),
        Subcommand::Unknown(word) => {
            debug!("unknown command '{}', showing help", word);
            help(container)
        }
        Subcommand::Run => run(cli, container),
    }
}

fn help(container: &ServiceContainer) -> CliResult<()> {
    container.console.out(USAGE);
    Ok(())
}

#[instrument(skip_all)]
fn run(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let Some(script_path) = cli.script_path() else {
        container
            .console
            .out(&output::failure("unshell: SCRIPT_PATH is required"));
        return Err(CliError::MissingScriptPath);
    };
    let target = Path::new(script_path);

    let loaded = container.loader().load(target).map_err(|source| {
        container
            .console
            .out(&output::failure("unshell: Invalid SCRIPT_PATH"));
        CliError::ScriptLoad {
            path: target.to_path_buf(),
            source,
        }
    })?;
    info!(
        "running {} with {} argument(s)",
        loaded.path.display(),
        cli.script_args().len()
    );

    container
        .engine()
        .run(&loaded, cli.script_args())
        .map_err(|source| {
            container
                .console
                .out(&output::failure("unshell: something went wrong"));
            CliError::ScriptExecution {
                path: loaded.path.clone(),
                source,
            }
        })?;
    Ok(())
}
