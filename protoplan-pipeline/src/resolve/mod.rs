//! Expanding source locations into proto files.
//!
//! Each location is expanded independently (on the rayon pool), then the
//! results are re-joined in insertion order before collision detection, so
//! which location an error is attributed to never depends on thread timing.

mod archive;
mod artifact;
mod walk;

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

pub use artifact::{ArtifactResolver, is_coordinate};
use indexmap::{IndexMap, map::Entry};
use protoplan_core::{
    Origin, PROTO_SUFFIX, ProtoFile, SourceLocation, SourceTree, is_archive_path, normalize_path,
};
use protoplan_manifest::is_url;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, debug_span};
use walk::TreeFilter;

use crate::{Error, PathSet, Result};

/// Resolved sources and import-only proto path files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resolved {
    /// Files eligible for generation, in resolution order.
    pub sources: Vec<ProtoFile>,
    /// Import-only files not already provided by `sources`.
    pub proto_path: Vec<ProtoFile>,
}

/// Expands a [`PathSet`] into [`ProtoFile`]s.
///
/// Relative paths resolve against the base directory (normally the
/// directory holding the manifest). Resolution only reads from disk.
#[derive(Clone)]
pub struct SourceResolver {
    base_dir: PathBuf,
    artifacts: Option<Arc<dyn ArtifactResolver>>,
}

impl SourceResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            artifacts: None,
        }
    }

    /// Attach a resolver for dependency coordinates.
    pub fn with_artifacts(mut self, artifacts: Arc<dyn ArtifactResolver>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve every location in the set.
    ///
    /// A logical path produced twice by the same origin with the same
    /// contents is kept once. Any other repeat fails with
    /// [`Error::DuplicateSource`] naming both origins. The first failing
    /// location in insertion order is the one reported.
    pub fn resolve(&self, paths: &PathSet) -> Result<Vec<ProtoFile>> {
        let expanded: Vec<Result<Vec<ProtoFile>>> = paths
            .locations()
            .par_iter()
            .map(|location| self.expand(location))
            .collect();

        let mut files: IndexMap<String, ProtoFile> = IndexMap::new();
        for (location, result) in paths.iter().zip(expanded) {
            let discovered = result?;
            debug!(%location, files = discovered.len(), "expanded location");

            for file in discovered {
                match files.entry(file.logical_path.clone()) {
                    Entry::Occupied(existing) if existing.get().same_source(&file) => {
                        debug!(path = %file.logical_path, origin = %file.origin, "dropping repeated source");
                    }
                    Entry::Occupied(existing) => {
                        return Err(Error::DuplicateSource {
                            path: file.logical_path,
                            first: existing.get().origin.to_string(),
                            second: file.origin.to_string(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(file);
                    }
                }
            }
        }

        Ok(files.into_values().collect())
    }

    /// Resolve sources and the proto path together.
    ///
    /// Proto path files whose logical path is provided by the sources are
    /// dropped; the sources take precedence.
    pub fn resolve_all(&self, sources: &PathSet, proto_path: &PathSet) -> Result<Resolved> {
        let sources = self.resolve(sources)?;
        let provided: HashSet<&str> = sources.iter().map(|s| s.logical_path.as_str()).collect();
        let proto_path = self
            .resolve(proto_path)?
            .into_iter()
            .filter(|file| {
                let shadowed = provided.contains(file.logical_path.as_str());
                if shadowed {
                    debug!(path = %file.logical_path, "proto path file shadowed by a source");
                }
                !shadowed
            })
            .collect();

        Ok(Resolved {
            sources,
            proto_path,
        })
    }

    /// Expand a single location.
    pub fn expand(&self, location: &SourceLocation) -> Result<Vec<ProtoFile>> {
        let _span = debug_span!("expand", kind = location.kind(), %location).entered();

        match location {
            SourceLocation::Path { path } => self.expand_path(path),
            SourceLocation::Archive { path } => {
                let location = location.to_string();
                let path = self.absolute(path);
                if !path.is_file() {
                    return Err(Error::resolution(location, "Path does not exist."));
                }
                archive::read_archive(&path, &location)
            }
            SourceLocation::Tree(tree) => self.expand_tree(tree, &location.to_string()),
        }
    }

    fn expand_path(&self, raw: &str) -> Result<Vec<ProtoFile>> {
        let path = self.absolute(Path::new(raw.trim()));

        if path.is_dir() {
            return walk::walk(&path, &TreeFilter::protos(raw)?, raw);
        }
        if path.is_file() {
            return self.expand_file(&path, raw);
        }
        if is_url(raw) {
            return Err(Error::resolution(raw, "URL dependencies are not allowed."));
        }
        if is_coordinate(raw.trim()) {
            return self.expand_artifact(raw.trim());
        }

        Err(Error::resolution(raw, "Path does not exist."))
    }

    fn expand_file(&self, path: &Path, location: &str) -> Result<Vec<ProtoFile>> {
        if is_archive_path(path) {
            return archive::read_archive(path, location);
        }

        let is_proto = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(PROTO_SUFFIX));
        if !is_proto {
            return Err(Error::resolution(
                location,
                "not a directory, a .jar/.zip archive or a .proto file",
            ));
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Unreadable {
            location: location.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        let logical_path = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let origin = Origin::File {
            path: path.to_path_buf(),
        };

        Ok(vec![ProtoFile::new(logical_path, origin, content)])
    }

    fn expand_tree(&self, tree: &SourceTree, location: &str) -> Result<Vec<ProtoFile>> {
        let filter = TreeFilter::compile(location, &tree.include, &tree.exclude)?;

        let mut files = Vec::new();
        for dir in &tree.src_dirs {
            let root = self.absolute(dir);
            if !root.is_dir() {
                return Err(Error::resolution(
                    location,
                    format!("source directory '{}' does not exist", dir.display()),
                ));
            }
            files.extend(walk::walk(&root, &filter, location)?);
        }
        Ok(files)
    }

    fn expand_artifact(&self, coordinate: &str) -> Result<Vec<ProtoFile>> {
        let Some(artifacts) = &self.artifacts else {
            return Err(Error::resolution(
                coordinate,
                "dependency coordinates need an artifact resolver and none is configured",
            ));
        };
        let Some(path) = artifacts.resolve(coordinate) else {
            return Err(Error::resolution(
                coordinate,
                format!("artifact resolver '{}' does not know it", artifacts.name()),
            ));
        };
        debug!(coordinate, path = %path.display(), resolver = artifacts.name(), "resolved artifact");

        let path = self.absolute(&path);
        if path.is_dir() {
            walk::walk(&path, &TreeFilter::protos(coordinate)?, coordinate)
        } else if path.is_file() {
            self.expand_file(&path, coordinate)
        } else {
            Err(Error::resolution(
                coordinate,
                format!("resolved to '{}', which does not exist", path.display()),
            ))
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.base_dir.join(path))
        }
    }
}

impl std::fmt::Debug for SourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceResolver")
            .field("base_dir", &self.base_dir)
            .field("artifacts", &self.artifacts.as_ref().map(|a| a.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_single_proto_file_uses_file_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "loose/period.proto", "enum Period { JURASSIC = 1; }");

        let mut set = PathSet::new();
        set.add_path("loose/period.proto");
        let files = SourceResolver::new(temp.path()).resolve(&set).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].logical_path, "period.proto");
        assert!(matches!(files[0].origin, Origin::File { .. }));
    }

    #[test]
    fn test_missing_path() {
        let temp = TempDir::new().unwrap();
        let mut set = PathSet::new();
        set.add_path("does/not/exist");

        let err = SourceResolver::new(temp.path()).resolve(&set).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot resolve 'does/not/exist': Path does not exist."
        );
    }

    #[test]
    fn test_non_proto_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "README.md", "# protos");
        let mut set = PathSet::new();
        set.add_path("README.md");

        let err = SourceResolver::new(temp.path()).resolve(&set).unwrap_err();
        assert!(err.is_resolution());
    }

    #[test]
    fn test_coordinate_without_resolver() {
        let temp = TempDir::new().unwrap();
        let mut set = PathSet::new();
        set.add_path("com.squareup.dinosaurs:dinosaurs-protos:1.0.0");

        let err = SourceResolver::new(temp.path()).resolve(&set).unwrap_err();
        assert!(err.to_string().contains("artifact resolver"));
    }

    #[test]
    fn test_repeated_tree_is_deduplicated() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "proto/a/b.proto", "message B {}");

        let mut set = PathSet::new();
        set.add_tree(SourceTree::new(["proto"]));
        set.add_tree(SourceTree::new(["./proto"]));
        set.add_path("proto");

        let files = SourceResolver::new(temp.path()).resolve(&set).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].logical_path, "a/b.proto");
    }

    #[test]
    fn test_missing_tree_directory() {
        let temp = TempDir::new().unwrap();
        let mut set = PathSet::new();
        set.add_tree(SourceTree::new(["nowhere"]));

        let err = SourceResolver::new(temp.path()).resolve(&set).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot resolve 'tree[nowhere]': source directory 'nowhere' does not exist"
        );
    }

    #[test]
    fn test_proto_path_is_shadowed_by_sources() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.proto", "message A {}");
        write(temp.path(), "shared/a.proto", "message A { string other = 1; }");
        write(temp.path(), "shared/b.proto", "message B {}");

        let mut sources = PathSet::new();
        sources.add_path("src");
        let mut proto_path = PathSet::new();
        proto_path.add_path("shared");

        let resolved = SourceResolver::new(temp.path())
            .resolve_all(&sources, &proto_path)
            .unwrap();

        assert_eq!(resolved.sources.len(), 1);
        let imports: Vec<&str> = resolved
            .proto_path
            .iter()
            .map(|f| f.logical_path.as_str())
            .collect();
        assert_eq!(imports, vec!["b.proto"]);
    }
}
