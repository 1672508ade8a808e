//! Core utilities and types for the schemagen generator.
//!
//! This crate provides fundamental types and utilities used across
//! the schemagen workspace: the target dialect enum, the naming
//! convention for flattened interfaces, an indenting code builder and
//! generated-file writing.

pub mod builder;
mod file;
mod naming;
mod target;

// File operations
pub use file::{File, WriteResult, write_file};
// Naming convention
pub use naming::{FLATTENED_SEPARATOR, flattened_name, is_flattened_name, is_primary_name};
// Fundamental types
pub use target::{Target, UnknownTarget};
