//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::services::{ScriptEngine, ScriptLoader};
use crate::config::Settings;
use crate::infrastructure::traits::{
    CommandRunner, Console, FileSystem, RealCommandRunner, RealFileSystem, TerminalConsole,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Invocation environment, handed to every script command
    pub env: Arc<BTreeMap<String, String>>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Terminal output
    pub console: Arc<dyn Console>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, env: BTreeMap<String, String>) -> Self {
        Self::with_deps(
            settings,
            env,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
            Arc::new(TerminalConsole),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        env: BTreeMap<String, String>,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            env: Arc::new(env),
            fs,
            cmd,
            console,
        }
    }

    pub fn loader(&self) -> ScriptLoader {
        ScriptLoader::new(self.fs.clone(), self.settings.script_path.clone())
    }

    pub fn engine(&self) -> ScriptEngine {
        ScriptEngine::new(
            self.cmd.clone(),
            self.console.clone(),
            self.env.clone(),
            &self.settings,
        )
    }
}
