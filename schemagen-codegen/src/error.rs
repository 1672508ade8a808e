use miette::{Diagnostic, NamedSource, SourceSpan};
use schemagen_ast::Span;
use thiserror::Error;

/// Failure inside a schema generator.
#[derive(Debug, Error, Diagnostic)]
pub enum GeneratorError {
    /// The source (or the flattened source) could not be parsed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] schemagen_ast::Error),

    #[error("{what} cannot be converted to a schema")]
    #[diagnostic(
        code(schemagen::unsupported),
        help("use interfaces, type aliases, literals, arrays, tuples, unions and intersections")
    )]
    Unsupported {
        #[source_code]
        src: NamedSource<String>,
        #[label("unsupported here")]
        span: SourceSpan,
        what: String,
    },
}

impl GeneratorError {
    /// A construct at `span` of `source` that has no schema equivalent.
    pub fn unsupported(source: &str, file_name: &str, what: impl Into<String>, span: Span) -> Self {
        GeneratorError::Unsupported {
            src: NamedSource::new(file_name, source.to_string()),
            span: span.into(),
            what: what.into(),
        }
    }
}

impl From<Box<schemagen_ast::Error>> for GeneratorError {
    fn from(err: Box<schemagen_ast::Error>) -> Self {
        GeneratorError::Parse(*err)
    }
}
