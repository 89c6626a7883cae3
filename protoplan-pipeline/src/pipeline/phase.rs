//! Pipeline phase trait.

use super::CompilationContext;
use crate::Result;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the planning pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads the
/// output of the previous ones from the context and stores its own.
///
/// Built-in phases:
/// - `LowerPhase` - derives path sets, filter rules and targets from the manifest
/// - `ResolvePhase` - expands source locations into proto files
/// - `FilterPhase` - applies roots and prunes
/// - `PlanPhase` - builds one generation job per target
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
