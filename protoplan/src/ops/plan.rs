//! Plan operation - compute generation jobs.

use std::path::Path;

use protoplan_core::{File, WriteResult};
use protoplan_manifest::ManifestFile;
use protoplan_pipeline::{Pipeline, Result, SnapshotPlugin};
use tracing::info;

use super::describe;
use crate::reports::{PlanReport, WriteReport};

/// Options for the plan operation.
#[derive(Default)]
pub struct PlanOptions<'a> {
    /// Directory receiving a JSON snapshot after each phase.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the plan operation.
pub fn plan(file: &ManifestFile, opts: PlanOptions) -> Result<PlanReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = opts.snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let ctx = pipeline.run(file.manifest().clone(), file.base_dir())?;

    let warnings = ctx.warnings().map(describe).collect();
    Ok(PlanReport {
        warnings,
        jobs: ctx.into_jobs(),
    })
}

/// Write the JSON plan to `path`, leaving an identical file untouched.
pub fn write_plan(report: &PlanReport, path: &Path) -> eyre::Result<WriteReport> {
    let mut json = report.to_json()?;
    json.push('\n');

    let result = File::new(path, json).write()?;
    match result {
        WriteResult::Written => info!(path = %path.display(), "wrote plan"),
        WriteResult::Unchanged => info!(path = %path.display(), "plan unchanged"),
    }

    Ok(WriteReport {
        path: path.to_path_buf(),
        result,
        warnings: report.warnings.clone(),
    })
}
