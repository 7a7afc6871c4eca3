//! Script loading service
//!
//! Resolves a script target against the working directory and the
//! configured search path, reads it and parses it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Script;
use crate::infrastructure::traits::FileSystem;

/// A parsed script together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedScript {
    pub path: PathBuf,
    pub script: Script,
}

/// Service for resolving and parsing script files.
pub struct ScriptLoader {
    fs: Arc<dyn FileSystem>,
    search_path: Vec<PathBuf>,
}

impl ScriptLoader {
    /// Create a new loader searching `search_path` for relative targets.
    pub fn new(fs: Arc<dyn FileSystem>, search_path: Vec<PathBuf>) -> Self {
        Self { fs, search_path }
    }

    /// Find the file a script target refers to.
    ///
    /// The target itself wins if it names a file; relative targets are then
    /// looked up in each search directory in order.
    pub fn resolve(&self, target: &Path) -> ApplicationResult<PathBuf> {
        debug!("resolve: target={}", target.display());
        if self.fs.is_file(target) {
            return Ok(target.to_path_buf());
        }

        if target.is_relative() {
            for dir in &self.search_path {
                let candidate = dir.join(target);
                debug!("resolve: trying {}", candidate.display());
                if self.fs.is_file(&candidate) {
                    return Ok(candidate);
                }
            }
        }

        Err(ApplicationError::ScriptNotFound(target.to_path_buf()))
    }

    /// Resolve, read and parse a script.
    pub fn load(&self, target: &Path) -> ApplicationResult<LoadedScript> {
        let path = self.resolve(target)?;
        let source = self.fs.read_to_string(&path).with_script_context(&path)?;
        let script = Script::parse(&source)?;
        debug!(
            "load: {} routines from {}: {:?}",
            script.routine_names().count(),
            path.display(),
            script.routine_names().collect::<Vec<_>>()
        );
        Ok(LoadedScript { path, script })
    }
}
