//! Qualified-name patterns used by roots, prunes and target elements.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// A pattern over fully-qualified proto names.
///
/// A pattern matches a name when:
/// - it is `*` (everything),
/// - it equals the name (exact type match),
/// - it is a dot-prefix of the name (enclosing package or type),
/// - it ends in `.*` and the part before is a dot-prefix of the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    raw: String,
    kind: PatternKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PatternKind {
    Any,
    Prefix(String),
}

/// Why a pattern string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// The rejected pattern.
    pub pattern: String,
    /// Human-readable reason.
    pub reason: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern '{}': {}", self.pattern, self.reason)
    }
}

impl std::error::Error for PatternError {}

impl Pattern {
    /// Parse a pattern, rejecting malformed names.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let fail = |reason: &str| PatternError {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(fail("pattern is empty"));
        }
        if trimmed == "*" {
            return Ok(Self {
                raw: trimmed.to_string(),
                kind: PatternKind::Any,
            });
        }

        let name = trimmed.strip_suffix(".*").unwrap_or(trimmed);
        for segment in name.split('.') {
            if segment.is_empty() {
                return Err(fail("empty name segment"));
            }
            if segment.contains('*') {
                return Err(fail("'*' is only allowed alone or as a trailing '.*'"));
            }
            let mut chars = segment.chars();
            let first = chars.next().unwrap_or('_');
            if !(first.is_ascii_alphabetic() || first == '_') {
                return Err(fail("name segments must start with a letter or underscore"));
            }
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(fail(
                    "name segments may only contain letters, digits and underscores",
                ));
            }
        }

        Ok(Self {
            raw: trimmed.to_string(),
            kind: PatternKind::Prefix(name.to_string()),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern selects everything.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, PatternKind::Any)
    }

    /// Check whether the pattern matches a fully-qualified name.
    pub fn matches(&self, name: &str) -> bool {
        match &self.kind {
            PatternKind::Any => true,
            PatternKind::Prefix(prefix) => {
                name == prefix
                    || (name.len() > prefix.len()
                        && name.starts_with(prefix.as_str())
                        && name.as_bytes()[prefix.len()] == b'.')
            }
        }
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
