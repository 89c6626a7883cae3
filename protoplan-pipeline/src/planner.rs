//! Turning filtered files and configured targets into generation jobs.

use std::path::PathBuf;

use protoplan_core::{
    GenerationJob, GenerationTarget, Pattern, PlannedFile, ProtoFile, TargetKind, normalize_path,
};
use tracing::{debug, debug_span};

use crate::{Error, Result};

/// Builds one [`GenerationJob`] per configured target.
///
/// All targets are validated before any job is assembled, so a failing
/// configuration never yields a partial job list. Planning does not touch
/// the file system.
#[derive(Debug, Clone, Default)]
pub struct TargetPlanner {
    proto_path: Vec<ProtoFile>,
}

impl TargetPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import-only files handed to every job.
    pub fn with_proto_path(mut self, proto_path: Vec<ProtoFile>) -> Self {
        self.proto_path = proto_path;
        self
    }

    /// Plan jobs for `targets` over the filtered `files`.
    pub fn plan(
        &self,
        files: &[PlannedFile],
        targets: &[GenerationTarget],
    ) -> Result<Vec<GenerationJob>> {
        validate_targets(targets)?;

        targets
            .iter()
            .map(|target| self.plan_target(files, target))
            .collect()
    }

    fn plan_target(&self, files: &[PlannedFile], target: &GenerationTarget) -> Result<GenerationJob> {
        let kind = target.kind();
        let _span = debug_span!("plan_target", target = %kind).entered();

        let selectors = parse_elements(kind, target.elements())?;

        // Every named element must select something that survived filtering.
        for (raw, pattern) in target.elements().iter().zip(&selectors) {
            if pattern.is_wildcard() {
                continue;
            }
            let known = files
                .iter()
                .flat_map(|f| f.included.iter())
                .any(|t| pattern.matches(t));
            if !known {
                return Err(Error::UnknownElement {
                    element: raw.clone(),
                    target: kind,
                });
            }
        }

        let select_all = selectors.is_empty() || selectors.iter().any(Pattern::is_wildcard);
        let job_files: Vec<PlannedFile> = files
            .iter()
            .filter_map(|planned| {
                let included: Vec<String> = planned
                    .included
                    .iter()
                    .filter(|t| select_all || selectors.iter().any(|s| s.matches(t)))
                    .cloned()
                    .collect();
                (!included.is_empty()).then(|| PlannedFile {
                    file: planned.file.clone(),
                    included,
                })
            })
            .collect();

        let elements: Vec<String> = job_files
            .iter()
            .flat_map(|f| f.included.iter().cloned())
            .collect();

        debug!(
            files = job_files.len(),
            elements = elements.len(),
            out = %target.out_directory().display(),
            "planned target"
        );

        Ok(GenerationJob {
            target: kind,
            out_directory: target.out_directory().clone(),
            files: job_files,
            proto_path: self.proto_path.clone(),
            elements,
            flags: target.flags(),
        })
    }
}

fn parse_elements(kind: TargetKind, elements: &[String]) -> Result<Vec<Pattern>> {
    elements
        .iter()
        .map(|raw| {
            Pattern::parse(raw).map_err(|e| Error::InvalidElement {
                element: raw.clone(),
                target: kind,
                reason: e.reason,
            })
        })
        .collect()
}

/// Check kinds and output directories across all targets.
fn validate_targets(targets: &[GenerationTarget]) -> Result<()> {
    let mut seen: Vec<(TargetKind, PathBuf)> = Vec::with_capacity(targets.len());

    for target in targets {
        let kind = target.kind();
        if seen.iter().any(|(k, _)| *k == kind) {
            return Err(Error::DuplicateTarget { target: kind });
        }

        let out = target.out_directory();
        if out.as_os_str().is_empty() {
            return Err(Error::MissingOutputDirectory { target: kind });
        }

        let normalized = normalize_path(out);
        if let Some((first, _)) = seen.iter().find(|(_, dir)| *dir == normalized) {
            return Err(Error::OutputCollision {
                directory: out.clone(),
                first: *first,
                second: kind,
            });
        }
        seen.push((kind, normalized));
    }

    Ok(())
}
