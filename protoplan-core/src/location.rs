//! Source locations: where proto files are discovered.

use std::{fmt, path::PathBuf};

use serde::Serialize;

/// Suffix of files considered proto sources.
pub const PROTO_SUFFIX: &str = ".proto";

/// The include filter applied to trees that do not declare one.
pub fn default_include() -> Vec<String> {
    vec![format!("**/*{}", PROTO_SUFFIX)]
}

/// A single configured place to look for proto files.
///
/// Locations are immutable once added to a path set. Literal strings are
/// classified only when resolved (directory, archive, file, or dependency
/// coordinate).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceLocation {
    /// A literal path string as written in the configuration.
    Path { path: String },
    /// An archive (jar or zip) whose entries are proto files.
    Archive { path: PathBuf },
    /// A filtered directory tree.
    Tree(SourceTree),
}

impl SourceLocation {
    /// Create a literal path location.
    pub fn path(path: impl Into<String>) -> Self {
        SourceLocation::Path { path: path.into() }
    }

    /// Create an archive location.
    pub fn archive(path: impl Into<PathBuf>) -> Self {
        SourceLocation::Archive { path: path.into() }
    }

    /// Short name of the location kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceLocation::Path { .. } => "path",
            SourceLocation::Archive { .. } => "archive",
            SourceLocation::Tree(_) => "tree",
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Path { path } => write!(f, "{}", path),
            SourceLocation::Archive { path } => write!(f, "{}", path.display()),
            SourceLocation::Tree(tree) => write!(f, "{}", tree),
        }
    }
}

/// A directory tree with include/exclude glob filters.
///
/// Globs match against paths relative to each source directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceTree {
    /// Root directories to walk.
    pub src_dirs: Vec<PathBuf>,
    /// Globs a file must match (any of).
    pub include: Vec<String>,
    /// Globs that remove a file (any of).
    pub exclude: Vec<String>,
}

impl SourceTree {
    /// Create a tree over the given directories with the default proto include.
    pub fn new(src_dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            src_dirs: src_dirs.into_iter().map(Into::into).collect(),
            include: default_include(),
            exclude: Vec::new(),
        }
    }

    /// Replace the include filter.
    pub fn include(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclude filter.
    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dirs: Vec<String> = self
            .src_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect();
        write!(f, "tree[{}]", dirs.join(", "))?;
        if !self.include.is_empty() && self.include != default_include() {
            write!(f, " include {}", self.include.join(","))?;
        }
        if !self.exclude.is_empty() {
            write!(f, " exclude {}", self.exclude.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_defaults_to_proto_include() {
        let tree = SourceTree::new(["src/main/proto"]);
        assert_eq!(tree.include, vec!["**/*.proto".to_string()]);
        assert!(tree.exclude.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceLocation::path("src/main/proto").to_string(), "src/main/proto");

        let tree = SourceTree::new(["a", "b"]).exclude(["**/internal/**"]);
        assert_eq!(
            SourceLocation::Tree(tree).to_string(),
            "tree[a, b] exclude **/internal/**"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(SourceLocation::path("x").kind(), "path");
        assert_eq!(SourceLocation::archive("x.jar").kind(), "archive");
        assert_eq!(SourceLocation::Tree(SourceTree::new(["x"])).kind(), "tree");
    }
}
