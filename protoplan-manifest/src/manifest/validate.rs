//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;
use protoplan_core::Pattern;

use crate::{Result, error::SourceContext};

/// URL schemes rejected in literal path strings.
const URL_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "file://"];

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest (e.g. `java.elements`), so that errors can point at
/// the offending value.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "protoplan.toml");
/// ctx.push("roots").validate_pattern("com.example")?;
/// ctx.push("java").push("elements").validate_pattern("com.example.Foo")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments (e.g., ["java", "elements"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Find the span of a quoted value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value)
    }

    /// Validate a root, prune or element pattern.
    pub fn validate_pattern(&self, pattern: &str) -> Result<Pattern> {
        Pattern::parse(pattern).map_err(|e| {
            self.source.invalid_pattern_error(
                pattern,
                self.path_string(),
                e.reason,
                self.find_span(pattern),
            )
        })
    }

    /// Validate a literal source or proto path string.
    ///
    /// Only rejects what can never resolve (empty strings and URLs); whether
    /// the path exists is checked when sources are resolved.
    pub fn validate_path_string(&self, path: &str) -> Result<()> {
        if path.trim().is_empty() {
            return Err(self.source.validation_error(
                format!("empty path string in {}", self.path_string()),
                None,
            ));
        }

        if is_url(path) {
            return Err(self.source.invalid_path_error(
                path,
                "URL dependencies are not allowed.",
                self.find_span(path),
            ));
        }

        Ok(())
    }
}

/// Check whether a path string is a URL
pub fn is_url(path: &str) -> bool {
    let lower = path.trim().to_ascii_lowercase();
    URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Find the span of a string value in the TOML source.
/// Searches for the value in double or single quotes and returns the span of
/// the text between the quotes.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            // +1 to skip the opening quote
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://www.squareup.com"));
        assert!(is_url("HTTPS://example.com/protos.jar"));
        assert!(is_url("file:///tmp/protos"));
        assert!(!is_url("src/main/proto"));
        assert!(!is_url("com.squareup.dinosaurs:dinosaurs-protos:1.0.0"));
    }

    #[test]
    fn test_find_value_span() {
        let src = r#"roots = ["com.example", "com.other"]"#;
        let span = find_value_span(src, "com.other").unwrap();
        assert_eq!(span.offset(), 25);
        assert_eq!(span.len(), 9);
    }

    #[test]
    fn test_find_value_span_single_quotes() {
        let src = "prunes = ['a.B']";
        let span = find_value_span(src, "a.B").unwrap();
        assert_eq!(span.offset(), 11);
    }

    #[test]
    fn test_find_value_span_requires_full_value() {
        // 'com' only appears as part of a longer value
        let src = r#"roots = ["com.example"]"#;
        assert!(find_value_span(src, "com").is_none());
    }

    #[test]
    fn test_parse_context_push() {
        let ctx = ParseContext::new("", "protoplan.toml");
        let nested = ctx.push("java").push("elements");
        assert_eq!(nested.path_string(), "java.elements");
        assert_eq!(ctx.path_string(), "");
        assert_eq!(ctx.filename(), "protoplan.toml");
    }

    #[test]
    fn test_validate_pattern() {
        let src = r#"roots = ["com..example"]"#;
        let ctx = ParseContext::new(src, "protoplan.toml");

        assert!(ctx.push("roots").validate_pattern("com.example").is_ok());

        let err = ctx.push("roots").validate_pattern("com..example").unwrap_err();
        assert_eq!(err.to_string(), "invalid pattern 'com..example' in roots");
    }

    #[test]
    fn test_validate_path_string() {
        let ctx = ParseContext::new("", "protoplan.toml").push("source_path");

        assert!(ctx.validate_path_string("src/main/proto").is_ok());
        assert!(ctx.validate_path_string("group:artifact:1.0").is_ok());
        assert!(ctx.validate_path_string("  ").is_err());

        let err = ctx.validate_path_string("http://www.squareup.com").unwrap_err();
        assert!(err.to_string().contains("URL dependencies are not allowed"));
    }
}
