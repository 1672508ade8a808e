// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for schemagen: file discovery, parsing with source
//! diagnostics, and resolution into generation tasks.

mod config;
mod discover;
mod error;
mod file;
mod task;

pub use config::{Config, TaskConfig};
pub use discover::{CONFIG_FILE_NAMES, discover, load};
pub use error::{Error, Result};
pub use file::{ConfigFile, Format, PACKAGE_JSON_KEY};
pub use task::{DEFAULT_INPUT, DEFAULT_OUTPUT, Overrides, Task};
