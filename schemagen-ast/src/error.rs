use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Span;

/// Result type for parsing and flattening (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Keeps the source text and file name together so errors can point at
/// the offending span.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> SourceContext<'a> {
    /// Create a new source context.
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    /// Get the source content.
    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Source the TypeScript grammar rejects.
    pub fn syntax(&self, detail: impl Into<String>, span: Span) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: span.into(),
            detail: detail.into(),
        })
    }

    /// The parser could not be set up.
    pub fn grammar(&self, reason: impl std::fmt::Display) -> Box<Error> {
        Box::new(Error::Grammar {
            file: self.filename.to_string(),
            reason: reason.to_string(),
        })
    }

    /// A synthesized interface name that is already declared.
    pub fn name_collision(&self, name: impl Into<String>, span: Span) -> Box<Error> {
        Box::new(Error::NameCollision {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid TypeScript: {detail}")]
    #[diagnostic(code(schemagen::syntax_error))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        detail: String,
    },

    #[error("failed to parse '{file}': {reason}")]
    #[diagnostic(code(schemagen::parser))]
    Grammar { file: String, reason: String },

    #[error("flattened interface name '{name}' is already declared")]
    #[diagnostic(
        code(schemagen::name_collision),
        help("rename the existing declaration or the property so '{name}' is unique")
    )]
    NameCollision {
        #[source_code]
        src: NamedSource<String>,
        #[label("property would be extracted as '{name}'")]
        span: SourceSpan,
        name: String,
    },
}
