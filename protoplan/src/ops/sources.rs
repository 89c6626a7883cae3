//! Sources operation - list resolved proto files.

use protoplan_core::ProtoFile;
use protoplan_manifest::ManifestFile;
use protoplan_pipeline::{
    CompilationContext, Phase, Result,
    pipeline::phases::{LowerPhase, ResolvePhase},
};

use crate::reports::{SourceEntry, SourcesReport};

/// Execute the sources operation.
///
/// Only lowers and resolves, so target misconfiguration does not hide
/// the file listing.
pub fn sources(file: &ManifestFile) -> Result<SourcesReport> {
    let mut ctx = CompilationContext::new(file.manifest().clone(), file.base_dir());
    LowerPhase.run(&mut ctx)?;
    ResolvePhase::default().run(&mut ctx)?;

    let notes = ctx
        .diagnostics
        .iter()
        .filter(|d| d.phase == "lower")
        .map(|d| d.message.clone())
        .collect();

    let resolved = ctx.resolved()?;
    Ok(SourcesReport {
        notes,
        sources: entries(&resolved.sources),
        proto_path: entries(&resolved.proto_path),
    })
}

fn entries(files: &[ProtoFile]) -> Vec<SourceEntry> {
    files
        .iter()
        .map(|f| SourceEntry {
            logical_path: f.logical_path.clone(),
            origin: f.origin.to_string(),
            types: f.types.len(),
        })
        .collect()
}
