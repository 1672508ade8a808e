// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Schema generation for schemagen.
//!
//! # Module Organization
//!
//! - [`dialects`] - Per-target emitters (`SchemaDialect` and the TypeBox generator)
//! - [`model`] - Intermediate declaration model read by the dialects
//! - [`fixup`] - Per-target textual fixups and the schema file header
//! - [`barrel`] - `index.ts`/`details.ts` re-export files
//! - [`imports`] - `.js` suffixes for relative import specifiers
//! - [`generation`] - A complete run over one input directory

pub mod barrel;
pub mod dialects;
mod error;
pub mod fixup;
pub mod generation;
mod generator;
pub mod imports;
pub mod model;
pub mod paths;

pub use barrel::{BarrelKind, BarrelSummary, generate_barrels};
pub use error::GeneratorError;
pub use fixup::{FixupRule, apply_fixups, render_schema_file, rules_for};
pub use generation::{GeneratedFile, GenerationOptions, GenerationSummary, run_generation};
pub use generator::{ModelGenerator, Passthrough, SchemaGenerator, generator_for};
pub use imports::{ImportFixSummary, fix_imports};
