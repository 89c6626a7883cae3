//! Ordered, deduplicated collection of source locations.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use protoplan_core::{SourceLocation, SourceTree, normalize_path};
use serde::{Serialize, Serializer};

/// An insertion-ordered set of [`SourceLocation`]s.
///
/// Literal paths and archives are deduplicated on insertion (after lexical
/// normalisation, so `proto` and `./proto` are the same entry). Trees are
/// always appended; overlapping trees are reconciled by content during
/// resolution. Nothing is checked against the file system here.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    locations: Vec<SourceLocation>,
    seen: HashSet<PathBuf>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add literal path strings. Returns how many were new.
    pub fn add_paths<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .map(|p| self.add_path(p))
            .filter(|added| *added)
            .count()
    }

    /// Add a literal path string. Returns `false` if it was already present.
    pub fn add_path(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if !self.seen.insert(normalize_path(Path::new(path.trim()))) {
            return false;
        }
        self.locations.push(SourceLocation::path(path));
        true
    }

    /// Add an archive. Returns `false` if the same archive was already added.
    pub fn add_archive(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !self.seen.insert(normalize_path(&path)) {
            return false;
        }
        self.locations.push(SourceLocation::archive(path));
        true
    }

    /// Add a filtered tree.
    pub fn add_tree(&mut self, tree: SourceTree) {
        self.locations.push(SourceLocation::Tree(tree));
    }

    /// Add any location, applying the dedup rule for its kind.
    pub fn add(&mut self, location: SourceLocation) -> bool {
        match location {
            SourceLocation::Path { path } => self.add_path(path),
            SourceLocation::Archive { path } => self.add_archive(path),
            SourceLocation::Tree(tree) => {
                self.add_tree(tree);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations in insertion order.
    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceLocation> {
        self.locations.iter()
    }
}

impl Serialize for PathSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.locations)
    }
}

impl Extend<SourceLocation> for PathSet {
    fn extend<T: IntoIterator<Item = SourceLocation>>(&mut self, iter: T) {
        for location in iter {
            self.add(location);
        }
    }
}

impl FromIterator<SourceLocation> for PathSet {
    fn from_iter<T: IntoIterator<Item = SourceLocation>>(iter: T) -> Self {
        let mut set = PathSet::new();
        set.extend(iter);
        set
    }
}
