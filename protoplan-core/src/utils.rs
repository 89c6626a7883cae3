//! Shared path utilities.

use std::path::{Component, Path, PathBuf};

/// File extensions recognised as proto archives.
const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip"];

/// Render a relative path with `/` separators (e.g., "squareup/geology/period.proto")
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
///
/// Does not touch the file system, so the path does not need to exist.
/// A path that normalises to nothing becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Check whether a path names a proto archive (`.jar` or `.zip`)
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
