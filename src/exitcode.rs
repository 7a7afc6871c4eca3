//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (script does not parse)
pub const DATAERR: i32 = 65;

/// Cannot open input (script missing or unreadable)
pub const NOINPUT: i32 = 66;

/// Internal software error (script execution failed)
pub const SOFTWARE: i32 = 70;

/// System error (e.g., can't spawn the shell)
pub const OSERR: i32 = 71;

/// Configuration error
pub const CONFIG: i32 = 78;
