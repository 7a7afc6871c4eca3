//! unshell: execute scripts through the unshell runtime.
//!
//! A script is a text file of named routines; `unshell run FILE [ARGS...]`
//! runs its `script` routine, one shell command per line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
