use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
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
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern_error(
        &self,
        pattern: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPattern {
            src: self.named_source(),
            span,
            pattern: pattern.into(),
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Create an invalid path string error.
    pub fn invalid_path_error(
        &self,
        path: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPath {
            src: self.named_source(),
            span,
            path: path.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(protoplan::io),
        help("create a protoplan.toml next to your proto sources or pass --config")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest")]
    #[diagnostic(code(protoplan::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(protoplan::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid pattern '{pattern}' in {field}")]
    #[diagnostic(
        code(protoplan::invalid_pattern),
        help(
            "{reason}. Use a qualified name such as 'com.example.Foo', a package such as 'com.example', 'com.example.*' or '*'."
        )
    )]
    InvalidPattern {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid pattern")]
        span: Option<SourceSpan>,
        pattern: String,
        field: String,
        reason: String,
    },

    #[error("Invalid path string: \"{path}\". {reason}")]
    #[diagnostic(code(protoplan::invalid_path))]
    InvalidPath {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        path: String,
        reason: String,
    },

    #[error("failed to read rules file '{path}'")]
    #[diagnostic(
        code(protoplan::rules_io),
        help("check the 'rules' entry in the manifest; relative paths resolve against the manifest directory")
    )]
    RulesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
