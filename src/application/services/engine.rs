//! Script execution service
//!
//! Runs the entry routine of a loaded script, one shell command at a time.
//! Commands run through the configured shell with the invocation
//! environment and the caller's privileges; nothing is sandboxed.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::LoadedScript;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{Settings, MAX_CALL_DEPTH_LIMIT};
use crate::domain::{
    Bindings, CommandTemplate, DomainError, Routine, Script, Statement, TemplateExpander,
};
use crate::infrastructure::traits::{CommandRunner, Console};

/// Prefix printed before each command.
pub const COMMAND_MARKER: &str = "•";
/// Prefix printed before a command's output.
pub const OUTPUT_MARKER: &str = "➜";

/// Mutable state threaded through one script run.
struct RunState<'a> {
    previous: String,
    script_path: String,
    args: &'a [String],
}

impl RunState<'_> {
    fn bindings(&self) -> Bindings<'_> {
        Bindings {
            previous: &self.previous,
            script_path: &self.script_path,
            args: self.args,
        }
    }
}

/// Service executing scripts through the host shell.
pub struct ScriptEngine {
    cmd: Arc<dyn CommandRunner>,
    console: Arc<dyn Console>,
    env: Arc<BTreeMap<String, String>>,
    shell: String,
    shell_args: Vec<String>,
    max_call_depth: usize,
    expander: TemplateExpander,
}

impl ScriptEngine {
    /// Create a new engine.
    pub fn new(
        cmd: Arc<dyn CommandRunner>,
        console: Arc<dyn Console>,
        env: Arc<BTreeMap<String, String>>,
        settings: &Settings,
    ) -> Self {
        Self {
            cmd,
            console,
            env,
            shell: settings.shell.clone(),
            shell_args: settings.shell_args.clone(),
            max_call_depth: settings.max_call_depth.min(MAX_CALL_DEPTH_LIMIT),
            expander: TemplateExpander::new(),
        }
    }

    /// Run the entry routine of `loaded` once with `args` forwarded.
    ///
    /// Returns the output of the last executed command.
    #[instrument(skip_all, fields(path = %loaded.path.display()))]
    pub fn run(&self, loaded: &LoadedScript, args: &[String]) -> ApplicationResult<String> {
        let mut state = RunState {
            previous: String::new(),
            script_path: loaded.path.display().to_string(),
            args,
        };
        self.run_routine(&loaded.script, loaded.script.entry(), &mut state, 0)?;
        Ok(state.previous)
    }

    fn run_routine(
        &self,
        script: &Script,
        routine: &Routine,
        state: &mut RunState<'_>,
        depth: usize,
    ) -> ApplicationResult<()> {
        debug!("run_routine: name={} depth={}", routine.name, depth);
        for statement in &routine.body {
            match statement {
                Statement::Command(template) => self.exec(template, state)?,
                Statement::Return(template) => {
                    self.exec(template, state)?;
                    return Ok(());
                }
                Statement::Call { name, line } => {
                    if depth >= self.max_call_depth {
                        return Err(ApplicationError::CallDepthExceeded {
                            name: name.clone(),
                            max_depth: self.max_call_depth,
                        });
                    }
                    let callee =
                        script
                            .routine(name)
                            .ok_or_else(|| DomainError::UnknownRoutine {
                                name: name.clone(),
                                line: *line,
                            })?;
                    self.run_routine(script, callee, state, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Expand and run one command; its trimmed stdout becomes `{}`.
    fn exec(&self, template: &CommandTemplate, state: &mut RunState<'_>) -> ApplicationResult<()> {
        let command = self.expander.expand(template, &state.bindings())?;
        if command.trim().is_empty() {
            debug!("exec: skipping empty command at line {}", template.line);
            return Ok(());
        }

        self.console.out(&format!("{} {}", COMMAND_MARKER, command));

        let mut args: Vec<&str> = self.shell_args.iter().map(String::as_str).collect();
        args.push(&command);
        let output = self
            .cmd
            .run(&self.shell, &args, &self.env)
            .map_err(|e| ApplicationError::CommandSpawn {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            self.console.err(&format!("{}: {}", command, stderr));
            return Err(ApplicationError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim_end();
        if !stdout.is_empty() {
            self.console.out(&format!("{} {}", OUTPUT_MARKER, stdout));
        }
        state.previous = stdout.to_string();
        Ok(())
    }
}
