//! Directory walking with include/exclude globs.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use protoplan_core::{Origin, PROTO_SUFFIX, ProtoFile, default_include, to_slash};
use tracing::trace;

use crate::{Error, Result};

/// Compiled include/exclude filter for one tree.
///
/// Globs match against `/`-separated paths relative to the walked root;
/// `*` does not cross directory boundaries, `**` does.
#[derive(Debug, Clone)]
pub(crate) struct TreeFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl TreeFilter {
    pub(crate) fn compile(location: &str, include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: build_set(location, include)?,
            exclude: build_set(location, exclude)?,
        })
    }

    /// The filter applied to literal directories: every `.proto` file.
    pub(crate) fn protos(location: &str) -> Result<Self> {
        Self::compile(location, &default_include(), &[])
    }

    /// Whether a relative path is selected. Non-proto files never are.
    pub(crate) fn matches(&self, relative: &str) -> bool {
        relative.ends_with(PROTO_SUFFIX)
            && self.include.is_match(relative)
            && !self.exclude.is_match(relative)
    }
}

fn build_set(location: &str, patterns: &[String]) -> Result<GlobSet> {
    let invalid = |pattern: &str, source| Error::InvalidGlob {
        location: location.to_string(),
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(pattern, e))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| invalid(&patterns.join(","), e))
}

/// Walk `root` and read every file the filter selects.
///
/// Entries are visited in file-name order so the result is stable across
/// runs and platforms. Logical paths are relative to `root`.
pub(crate) fn walk(root: &Path, filter: &TreeFilter, location: &str) -> Result<Vec<ProtoFile>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            location: location.to_string(),
            source,
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = to_slash(path.strip_prefix(root).unwrap_or(path));
        if !filter.matches(&relative) {
            trace!(path = %relative, "skipping unselected file");
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Unreadable {
            location: location.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        let origin = Origin::Directory {
            root: root.to_path_buf(),
            file: path.to_path_buf(),
        };
        files.push(ProtoFile::new(relative, origin, content));
    }

    Ok(files)
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
    fn test_filter_requires_proto_suffix() {
        let filter = TreeFilter::compile("tree", &["squareup/**".to_string()], &[]).unwrap();
        assert!(filter.matches("squareup/geology/period.proto"));
        assert!(!filter.matches("squareup/geology/README.md"));
        assert!(!filter.matches("other/period.proto"));
    }

    #[test]
    fn test_filter_exclude_wins() {
        let filter = TreeFilter::compile(
            "tree",
            &default_include(),
            &["**/internal/**".to_string()],
        )
        .unwrap();
        assert!(filter.matches("a/b.proto"));
        assert!(filter.matches("b.proto"));
        assert!(!filter.matches("a/internal/c.proto"));
    }

    #[test]
    fn test_single_star_stays_in_directory() {
        let filter = TreeFilter::compile("tree", &["*.proto".to_string()], &[]).unwrap();
        assert!(filter.matches("top.proto"));
        assert!(!filter.matches("nested/deep.proto"));
    }

    #[test]
    fn test_invalid_glob() {
        let err = TreeFilter::compile("tree[proto]", &["a/[b".to_string()], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidGlob { ref pattern, .. } if pattern == "a/[b"));
    }

    #[test]
    fn test_walk_is_sorted_and_relative() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "squareup/geology/period.proto", "package squareup.geology;\n");
        write(temp.path(), "squareup/dinosaurs/dinosaur.proto", "package squareup.dinosaurs;\n");
        write(temp.path(), "squareup/dinosaurs/notes.txt", "not a proto");

        let files = walk(temp.path(), &TreeFilter::protos("proto").unwrap(), "proto").unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.logical_path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "squareup/dinosaurs/dinosaur.proto",
                "squareup/geology/period.proto"
            ]
        );
        assert!(matches!(files[0].origin, Origin::Directory { .. }));
    }
}
