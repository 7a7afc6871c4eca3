//! Error conversion helpers for script I/O
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attach the script path to a read failure.
    ///
    /// A `NotFound` error becomes [`ApplicationError::ScriptNotFound`], anything
    /// else [`ApplicationError::ScriptUnreadable`].
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path).with_script_context(&path)?;
    /// ```
    fn with_script_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_script_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::ScriptNotFound(path.to_path_buf()),
            _ => ApplicationError::ScriptUnreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }
}
