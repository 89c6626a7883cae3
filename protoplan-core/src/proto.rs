//! Discovered proto files and their provenance.

use std::{fmt, path::PathBuf, sync::Arc};

use serde::{Serialize, Serializer};
use xxhash_rust::xxh64::xxh64;

use crate::Declarations;

/// Content fingerprint (xxh64 with a fixed seed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprint raw file contents.
    pub fn of(content: &[u8]) -> Self {
        Self(xxh64(content, 0))
    }

    /// The raw hash value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a proto file physically came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// A file found by walking a directory.
    Directory { root: PathBuf, file: PathBuf },
    /// An entry inside a jar or zip archive.
    Archive { archive: PathBuf, entry: String },
    /// A single file named directly.
    File { path: PathBuf },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Directory { file, .. } => write!(f, "{}", file.display()),
            Origin::Archive { archive, entry } => write!(f, "{}!/{}", archive.display(), entry),
            Origin::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// A discovered proto file.
///
/// The logical path is the package-relative identity of the file
/// (e.g., `squareup/geology/period.proto`) and is unique across a
/// resolved set.
#[derive(Debug, Clone, Serialize)]
pub struct ProtoFile {
    /// Package-relative path with `/` separators.
    pub logical_path: String,
    /// Physical provenance.
    pub origin: Origin,
    /// Content fingerprint.
    pub fingerprint: Fingerprint,
    /// Declared package, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Fully-qualified declared types.
    pub types: Vec<String>,
    /// File contents, held in memory (archive entries are never extracted).
    #[serde(skip)]
    pub content: Arc<str>,
}

impl ProtoFile {
    /// Build a proto file record from its contents, scanning its declarations.
    pub fn new(logical_path: impl Into<String>, origin: Origin, content: impl Into<Arc<str>>) -> Self {
        let content: Arc<str> = content.into();
        let decls = Declarations::scan(&content);
        Self {
            logical_path: logical_path.into(),
            origin,
            fingerprint: Fingerprint::of(content.as_bytes()),
            package: decls.package,
            types: decls.types,
            content,
        }
    }

    /// Whether two records are the same physical file with identical contents.
    pub fn same_source(&self, other: &ProtoFile) -> bool {
        self.origin == other.origin && self.fingerprint == other.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: &str = "package squareup.geology;\nenum Period { JURASSIC = 1; }\n";

    #[test]
    fn test_new_scans_declarations() {
        let file = ProtoFile::new(
            "squareup/geology/period.proto",
            Origin::File {
                path: "period.proto".into(),
            },
            PERIOD,
        );

        assert_eq!(file.package.as_deref(), Some("squareup.geology"));
        assert_eq!(file.types, vec!["squareup.geology.Period"]);
        assert_eq!(file.fingerprint, Fingerprint::of(PERIOD.as_bytes()));
    }

    #[test]
    fn test_same_source() {
        let origin = Origin::Directory {
            root: "proto".into(),
            file: "proto/period.proto".into(),
        };
        let a = ProtoFile::new("period.proto", origin.clone(), PERIOD);
        let b = ProtoFile::new("period.proto", origin, PERIOD);
        let c = ProtoFile::new(
            "period.proto",
            Origin::File {
                path: "other/period.proto".into(),
            },
            PERIOD,
        );

        assert!(a.same_source(&b));
        assert!(!a.same_source(&c));
    }

    #[test]
    fn test_origin_display() {
        let origin = Origin::Archive {
            archive: "libs/geology.jar".into(),
            entry: "squareup/geology/period.proto".into(),
        };
        assert_eq!(origin.to_string(), "libs/geology.jar!/squareup/geology/period.proto");
    }

    #[test]
    fn test_serialize_skips_content() {
        let file = ProtoFile::new("period.proto", Origin::File { path: "period.proto".into() }, PERIOD);
        let json = serde_json::to_value(&file).unwrap();

        assert!(json.get("content").is_none());
        assert_eq!(json["origin"]["kind"], "file");
        assert_eq!(json["fingerprint"].as_str().unwrap().len(), 16);
    }
}
