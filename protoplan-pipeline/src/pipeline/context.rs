//! State carried through the pipeline phases.

use std::path::PathBuf;

use protoplan_core::{GenerationJob, GenerationTarget};
use protoplan_manifest::Manifest;
use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::{Error, FilterOutcome, FilterRules, PathSet, Resolved, Result};

/// Planning inputs derived from the manifest (populated by the lower phase).
///
/// Relative paths in targets are already rebased onto the base directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanInputs {
    pub sources: PathSet,
    pub proto_path: PathSet,
    pub rules: FilterRules,
    pub targets: Vec<GenerationTarget>,
}

/// Context passed through all pipeline phases.
///
/// Each built-in phase fills in one stage; diagnostics accumulate across
/// the whole run.
#[derive(Debug)]
pub struct CompilationContext {
    /// The manifest being planned.
    pub manifest: Manifest,
    /// Directory relative manifest paths resolve against.
    pub base_dir: PathBuf,
    /// Populated by the lower phase.
    pub inputs: Option<PlanInputs>,
    /// Populated by the resolve phase.
    pub resolved: Option<Resolved>,
    /// Populated by the filter phase.
    pub filtered: Option<FilterOutcome>,
    /// Populated by the plan phase.
    pub jobs: Option<Vec<GenerationJob>>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(manifest: Manifest, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            base_dir: base_dir.into(),
            inputs: None,
            resolved: None,
            filtered: None,
            jobs: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Add an error diagnostic.
    ///
    /// Built-in phases return fatal problems as [`Error`] instead. This is
    /// for user phases and plugins that want to fail a `check` while still
    /// letting the run finish.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Lowered inputs, or an error if the lower phase has not run.
    pub fn inputs(&self) -> Result<&PlanInputs> {
        self.inputs.as_ref().ok_or(Error::PhaseOutput { phase: "lower" })
    }

    /// Resolved files, or an error if the resolve phase has not run.
    pub fn resolved(&self) -> Result<&Resolved> {
        self.resolved
            .as_ref()
            .ok_or(Error::PhaseOutput { phase: "resolve" })
    }

    /// Filtered files, or an error if the filter phase has not run.
    pub fn filtered(&self) -> Result<&FilterOutcome> {
        self.filtered
            .as_ref()
            .ok_or(Error::PhaseOutput { phase: "filter" })
    }

    /// Planned jobs (empty until the plan phase has run).
    pub fn jobs(&self) -> &[GenerationJob] {
        self.jobs.as_deref().unwrap_or_default()
    }

    /// Consume the context, returning the planned jobs.
    pub fn into_jobs(self) -> Vec<GenerationJob> {
        self.jobs.unwrap_or_default()
    }
}
