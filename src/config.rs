//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$UNSHELL_CONFIG`, else `$XDG_CONFIG_HOME/unshell/unshell.toml`
//! 3. Environment variables: `UNSHELL_*` prefix
//!
//! Environment lookups go through the invocation's environment map, never
//! through the process environment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "UNSHELL_CONFIG";

/// Highest accepted `max_call_depth`; calls nest on the native stack.
pub const MAX_CALL_DEPTH_LIMIT: usize = 256;

/// Separator for list values in `UNSHELL_*` variables (like `PATH`).
const LIST_SEPARATOR: &str = ":";

/// Unified configuration for unshell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Shell program that runs each script command
    pub shell: String,
    /// Arguments placed before the command text (default: `-c`)
    pub shell_args: Vec<String>,
    /// Directories searched for relative script paths
    pub script_path: Vec<PathBuf>,
    /// Maximum nesting of `call` statements
    pub max_call_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".into(),
            shell_args: vec!["-c".into()],
            script_path: vec![],
            max_call_depth: 32,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub shell: Option<String>,
    pub shell_args: Option<Vec<String>>,
    pub script_path: Option<Vec<PathBuf>>,
    pub max_call_depth: Option<usize>,
}

/// Get the XDG config directory for unshell.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "unshell").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
///
/// `UNSHELL_CONFIG` in `env` takes precedence over the XDG location.
pub fn global_config_path(env: &BTreeMap<String, String>) -> Option<PathBuf> {
    match env.get(CONFIG_PATH_VAR) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => global_config_dir().map(|dir| dir.join("unshell.toml")),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `env` - Invocation environment (config file location and `UNSHELL_*` overrides)
    pub fn load(env: &BTreeMap<String, String>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(path) = global_config_path(env) {
            if path.exists() {
                debug!("Loading config file: {}", path.display());
                let raw = load_raw_settings(&path)?;
                current = current.merge_with(&raw);
            } else if env.get(CONFIG_PATH_VAR).is_some_and(|p| !p.is_empty()) {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths(env);

        current.validate()?;
        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            shell: overlay.shell.clone().unwrap_or_else(|| self.shell.clone()),
            shell_args: overlay
                .shell_args
                .clone()
                .unwrap_or_else(|| self.shell_args.clone()),
            script_path: overlay
                .script_path
                .clone()
                .unwrap_or_else(|| self.script_path.clone()),
            max_call_depth: overlay.max_call_depth.unwrap_or(self.max_call_depth),
        }
    }

    /// Apply `UNSHELL_*` variables from `env` as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: &BTreeMap<String, String>,
    ) -> Result<Self, ApplicationError> {
        let source: config::Map<String, String> = env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let config = Config::builder()
            .add_source(
                Environment::with_prefix("UNSHELL")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(LIST_SEPARATOR)
                    .with_list_parse_key("script_path")
                    .try_parsing(true)
                    .source(Some(source)),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("shell") {
            settings.shell = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("script_path") {
            settings.script_path = val
                .into_iter()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        match config.get::<usize>("max_call_depth") {
            Ok(val) => settings.max_call_depth = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_call_depth > MAX_CALL_DEPTH_LIMIT {
            return Err(ApplicationError::Config {
                message: format!(
                    "max_call_depth {} exceeds the limit of {}",
                    self.max_call_depth, MAX_CALL_DEPTH_LIMIT
                ),
            });
        }
        Ok(())
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self, env: &BTreeMap<String, String>) {
        self.shell = expand_env_vars(&self.shell, env);
        self.script_path = self
            .script_path
            .iter()
            .map(|dir| PathBuf::from(expand_env_vars(&dir.to_string_lossy(), env)))
            .collect();
    }
}
