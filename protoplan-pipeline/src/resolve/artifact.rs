//! Dependency coordinates (`group:artifact:version`).

use std::path::PathBuf;

/// Maps dependency coordinates to local archives or directories.
///
/// Fetching from a package repository is the build tool's job; an
/// implementation only reports where an already-available artifact lives.
pub trait ArtifactResolver: Send + Sync {
    /// The name of this resolver (for error messages and logging).
    fn name(&self) -> &'static str;

    /// Locate the artifact for `coordinate`, or `None` if it is unknown.
    fn resolve(&self, coordinate: &str) -> Option<PathBuf>;
}

/// Whether a path string looks like a `group:artifact:version[:classifier]`
/// coordinate rather than a file-system path.
pub fn is_coordinate(value: &str) -> bool {
    let parts: Vec<&str> = value.split(':').collect();
    (3..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            !part.is_empty() && !part.contains(['/', '\\']) && !part.contains(char::is_whitespace)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_coordinate() {
        assert!(is_coordinate("com.squareup.dinosaurs:dinosaurs-protos:1.0.0"));
        assert!(is_coordinate("com.squareup:protos:1.0.0:sources"));
        assert!(!is_coordinate("src/main/proto"));
        assert!(!is_coordinate("C:/protos/dinosaurs"));
        assert!(!is_coordinate("group::1.0"));
        assert!(!is_coordinate("group:artifact"));
    }
}
