use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use schemagen_core::UnknownTarget;
use thiserror::Error;

/// Result type for configuration loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the config file content and name so errors can render the
/// offending snippet.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span: source.span().map(SourceSpan::from),
            message: source.message().to_string(),
        })
    }

    /// Create a parse error from a JSON error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::new(offset.into(), 0));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: source.to_string(),
        })
    }

    /// Create an error for a config without tasks.
    pub fn empty_tasks(&self) -> Box<Error> {
        Box::new(Error::EmptyTasks {
            src: self.named_source(),
        })
    }

    /// Create an error for a task naming an unknown target.
    pub fn invalid_target(&self, source: UnknownTarget) -> Box<Error> {
        let span = find_quoted(&self.src, &source.name);
        Box::new(Error::InvalidTarget {
            src: self.named_source(),
            span,
            source,
        })
    }
}

/// Byte offset of a 1-based line and column.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

/// Span of the first `"value"` or `'value'` in `src`.
fn find_quoted(src: &str, value: &str) -> Option<SourceSpan> {
    ['"', '\''].into_iter().find_map(|quote| {
        let needle = format!("{quote}{value}{quote}");
        src.find(&needle)
            .map(|offset| SourceSpan::new(offset.into(), needle.len()))
    })
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no configuration file found")]
    #[diagnostic(
        code(schemagen::config_not_found),
        help(
            "pass a target (e.g. 'schemagen zod') or create schemagen.toml with at least one [[tasks]] entry"
        )
    )]
    NotFound {
        /// Directory the search started from.
        searched: PathBuf,
    },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {message}")]
    #[diagnostic(code(schemagen::config_parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("configuration defines no tasks")]
    #[diagnostic(
        code(schemagen::empty_tasks),
        help("add a task, e.g.\n\n[[tasks]]\ntarget = \"zod\"")
    )]
    EmptyTasks {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("{source}")]
    #[diagnostic(code(schemagen::invalid_target))]
    InvalidTarget {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown target")]
        span: Option<SourceSpan>,
        source: UnknownTarget,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": 1,\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 3), Some(4));
        assert_eq!(offset_of(src, 0, 0), None);
    }

    #[test]
    fn test_find_quoted() {
        let span = find_quoted("target = 'zodd'", "zodd").unwrap();
        assert_eq!(span.offset(), 9);
        assert_eq!(span.len(), 6);
        assert!(find_quoted("target = zodd", "zodd").is_none());
    }
}
