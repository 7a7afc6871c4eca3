//! Domain layer: the script language
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod parser;
pub mod template;

pub use entities::*;
pub use error::DomainError;
pub use parser::parse_script;
pub use template::{Bindings, TemplateExpander};
