//! Pipeline snapshot plugin for debugging.
//!
//! Captures the context after each phase as JSON, so the inputs, resolved
//! files, filter outcome and jobs can be inspected stage by stage.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use protoplan_core::GenerationJob;
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin, PlanInputs};
use crate::{Error, FilterOutcome, Resolved, Result};

/// A snapshot of the context at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<PlanInputs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Resolved>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered: Option<FilterOutcome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<GenerationJob>>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| Error::Snapshot {
            phase: self.phase.clone(),
            source,
        })
    }
}

/// A plugin that captures the context after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".protoplan/debug"));
/// let ctx = pipeline.run(manifest, base_dir)?;
/// // .protoplan/debug/{lower,resolve,filter,plan}.json
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin that keeps snapshots in memory.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that also writes each snapshot to `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir` as `<phase>.json`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.snapshots() {
            write_snapshot(dir.as_ref(), &snapshot)?;
        }
        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            inputs: ctx.inputs.clone(),
            resolved: ctx.resolved.clone(),
            filtered: ctx.filtered.clone(),
            jobs: ctx.jobs.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
        snapshot
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    fs::write(&path, snapshot.to_json()?).map_err(|source| Error::Io { path, source })
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx);

        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}
