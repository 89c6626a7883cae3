//! Check operation - manifest validation.

use protoplan_manifest::ManifestFile;
use protoplan_pipeline::{Pipeline, Result, Severity};

use super::describe;
use crate::reports::{CheckReport, TargetSummary};

/// Execute the check operation.
///
/// Runs the full pipeline and summarizes diagnostics and planned jobs.
/// Fatal planning errors are returned as-is.
pub fn check(file: &ManifestFile) -> Result<CheckReport> {
    let ctx = Pipeline::new().run(file.manifest().clone(), file.base_dir())?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in &ctx.diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let resolved = ctx.resolved()?;
    let (sources, proto_path) = (resolved.sources.len(), resolved.proto_path.len());
    let selected = ctx.filtered()?.types().count();

    let targets = ctx
        .jobs()
        .iter()
        .map(|job| TargetSummary {
            target: job.target,
            out_directory: job.out_directory.clone(),
            files: job.files.len(),
            types: job.type_count(),
        })
        .collect();

    Ok(CheckReport {
        config_path: file.path().to_path_buf(),
        errors,
        warnings,
        infos,
        sources,
        proto_path,
        selected,
        targets,
    })
}
