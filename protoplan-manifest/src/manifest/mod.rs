//! Manifest types and parsing for protoplan.toml files.

mod file;
mod parse;
mod target;
mod validate;

use std::path::PathBuf;

pub use file::ManifestFile;
pub use parse::{MANIFEST_FILENAME, parse_manifest};
use protoplan_core::{Pattern, PatternError, SourceLocation, SourceTree, default_include};
use serde::Deserialize;
pub use target::{DEFAULT_OUT_DIRECTORY, JavaConfig, KotlinConfig};
pub use validate::{ParseContext, is_url};

/// Source location used when the manifest declares none.
pub const DEFAULT_SOURCE_PATH: &str = "src/main/proto";

/// Root manifest for protoplan.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Literal source paths: directories, archives, single files or
    /// dependency coordinates
    #[serde(default)]
    pub source_path: Vec<String>,

    /// Literal proto paths (import-only)
    #[serde(default)]
    pub proto_path: Vec<String>,

    /// Filtered source trees
    #[serde(default)]
    pub source_tree: Vec<TreeConfig>,

    /// Filtered proto path trees (import-only)
    #[serde(default)]
    pub proto_tree: Vec<TreeConfig>,

    /// Inclusion patterns
    #[serde(default)]
    pub roots: Vec<String>,

    /// Exclusion patterns
    #[serde(default)]
    pub prunes: Vec<String>,

    /// Rules file with additional prune patterns
    pub rules: Option<PathBuf>,

    /// Java (primary) target
    pub java: Option<JavaConfig>,

    /// Kotlin (secondary) target
    pub kotlin: Option<KotlinConfig>,
}

/// A `[[source_tree]]` or `[[proto_tree]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// Directories to walk
    #[serde(default)]
    pub src_dirs: Vec<PathBuf>,

    /// Globs a file must match
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Globs that exclude a file
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl From<&TreeConfig> for SourceTree {
    fn from(config: &TreeConfig) -> Self {
        SourceTree::new(config.src_dirs.iter().cloned())
            .include(config.include.iter().cloned())
            .exclude(config.exclude.iter().cloned())
    }
}

impl Manifest {
    /// Whether no source location is declared and the default applies.
    pub fn uses_default_source_path(&self) -> bool {
        self.source_path.is_empty() && self.source_tree.is_empty()
    }

    /// Source locations in processing order: trees first, then literal paths.
    ///
    /// Falls back to [`DEFAULT_SOURCE_PATH`] when nothing is declared.
    pub fn source_locations(&self) -> Vec<SourceLocation> {
        if self.uses_default_source_path() {
            return vec![SourceLocation::path(DEFAULT_SOURCE_PATH)];
        }
        locations(&self.source_tree, &self.source_path)
    }

    /// Proto path locations in processing order: trees first, then literal paths.
    ///
    /// Empty when the proto path is not configured; the sources then act as
    /// their own proto path.
    pub fn proto_locations(&self) -> Vec<SourceLocation> {
        locations(&self.proto_tree, &self.proto_path)
    }

    /// Parsed root patterns.
    pub fn root_patterns(&self) -> Result<Vec<Pattern>, PatternError> {
        self.roots.iter().map(|r| Pattern::parse(r)).collect()
    }

    /// Parsed prune patterns (without the rules file).
    pub fn prune_patterns(&self) -> Result<Vec<Pattern>, PatternError> {
        self.prunes.iter().map(|p| Pattern::parse(p)).collect()
    }

    /// Whether any target table is declared.
    pub fn has_targets(&self) -> bool {
        self.java.is_some() || self.kotlin.is_some()
    }
}

fn locations(trees: &[TreeConfig], paths: &[String]) -> Vec<SourceLocation> {
    trees
        .iter()
        .map(|t| SourceLocation::Tree(t.into()))
        .chain(paths.iter().map(SourceLocation::path))
        .collect()
}
