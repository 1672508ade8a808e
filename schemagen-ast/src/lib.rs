// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! TypeScript declaration parsing and interface flattening.
//!
//! Files are parsed with the tree-sitter TypeScript grammar, but only what
//! schema generation needs is lifted into [`SourceFile`]: interface
//! declarations, type aliases and property type expressions. Everything else
//! in a file is kept as opaque text so transforms can leave it untouched.

mod error;
mod flatten;
mod parser;
mod syntax;

pub use error::{Error, Result, SourceContext};
pub use flatten::transform_source_text;
pub use parser::parse_source;
pub use syntax::*;
