use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// Represents a protoplan.toml file with both raw content and parsed manifest.
///
/// Relative paths inside the manifest resolve against [`ManifestFile::base_dir`].
pub struct ManifestFile {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ManifestFile {
    /// Open and parse a protoplan.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative manifest paths resolve against.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_and_base_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("protoplan.toml");
        std::fs::write(&path, "roots = [\"squareup.dinosaurs\"]\n").unwrap();

        let file = ManifestFile::open(&path).unwrap();

        assert_eq!(file.base_dir(), temp.path());
        assert_eq!(file.manifest().roots, vec!["squareup.dinosaurs".to_string()]);
        assert!(file.content().contains("squareup.dinosaurs"));
    }

    #[test]
    fn test_bare_filename_resolves_to_current_dir() {
        let file = ManifestFile {
            path: PathBuf::from("protoplan.toml"),
            content: String::new(),
            manifest: Manifest::default(),
        };
        assert_eq!(file.base_dir(), PathBuf::from("."));
    }
}
