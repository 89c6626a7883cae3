//! Generation jobs handed to a generator backend.

use std::path::PathBuf;

use serde::Serialize;

use crate::{ProtoFile, TargetFlags, TargetKind};

/// A proto file selected for generation, with the types to emit.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    #[serde(flatten)]
    pub file: ProtoFile,
    /// Fully-qualified types that survived filtering and element selection.
    pub included: Vec<String>,
}

impl PlannedFile {
    /// Logical path of the underlying file.
    pub fn logical_path(&self) -> &str {
        &self.file.logical_path
    }
}

/// A fully resolved, validated instruction set for one output target.
///
/// Jobs are built by the planner and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationJob {
    /// Target kind.
    pub target: TargetKind,
    /// Directory generated sources are written to.
    pub out_directory: PathBuf,
    /// Files to generate, in resolution order.
    pub files: Vec<PlannedFile>,
    /// Import-only files available for resolving references.
    pub proto_path: Vec<ProtoFile>,
    /// Resolved fully-qualified types to generate.
    pub elements: Vec<String>,
    /// Kind-specific feature switches.
    pub flags: TargetFlags,
}

impl GenerationJob {
    /// Number of types this job will emit.
    pub fn type_count(&self) -> usize {
        self.elements.len()
    }
}
