//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner, Console)
//! but are themselves concrete structs, not traits.

mod engine;
mod loader;

pub use engine::{ScriptEngine, COMMAND_MARKER, OUTPUT_MARKER};
pub use loader::{LoadedScript, ScriptLoader};
