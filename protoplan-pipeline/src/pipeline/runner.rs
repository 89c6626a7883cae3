//! Pipeline orchestrator.

use std::{path::PathBuf, sync::Arc};

use protoplan_manifest::Manifest;
use tracing::{debug, info_span};

use super::{
    CompilationContext, Phase, Plugin,
    phases::{FilterPhase, LowerPhase, PlanPhase, ResolvePhase},
};
use crate::{ArtifactResolver, Result};

/// The planning pipeline orchestrator.
///
/// Runs the built-in phases (lower, resolve, filter, plan) followed by any
/// user phases, calling plugin hooks before and after each phase. The first
/// fatal error stops the run; no jobs are returned in that case.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::new())
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(manifest, "path/to/project")?;
/// for job in ctx.jobs() {
///     backend.generate(job)?;
/// }
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
    artifacts: Option<Arc<dyn ArtifactResolver>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases only.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
            artifacts: None,
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Add a shared plugin, keeping a handle to inspect it after the run.
    pub fn shared_plugin<P: Plugin + 'static>(mut self, plugin: Arc<P>) -> Self {
        self.plugins.push(Box::new(SharedPlugin(plugin)));
        self
    }

    /// Resolve dependency coordinates through `artifacts`.
    pub fn artifacts(mut self, artifacts: Arc<dyn ArtifactResolver>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Run the pipeline on a manifest.
    ///
    /// Relative paths in the manifest resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error raised by a phase or plugin.
    pub fn run(&self, manifest: Manifest, base_dir: impl Into<PathBuf>) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest, base_dir);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(LowerPhase),
            Box::new(ResolvePhase::new(self.artifacts.clone())),
            Box::new(FilterPhase),
            Box::new(PlanPhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        let _span = info_span!("phase", name = phase_name).entered();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        debug!(description = phase.description(), "running phase");
        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

struct SharedPlugin<P>(Arc<P>);

impl<P: Plugin> Plugin for SharedPlugin<P> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        self.0.on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        self.0.on_after_phase(phase, ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct AbortingPlugin;

    impl Plugin for AbortingPlugin {
        fn name(&self) -> &'static str {
            "aborting"
        }

        fn on_before_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            if phase == "filter" {
                return Err(Error::Plugin {
                    plugin: self.name(),
                    phase: phase.to_string(),
                    message: "stop".into(),
                });
            }
            Ok(())
        }
    }

    struct CountJobs(Arc<AtomicUsize>);

    impl Phase for CountJobs {
        fn name(&self) -> &'static str {
            "count-jobs"
        }

        fn description(&self) -> &'static str {
            "Count planned jobs"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            self.0.store(ctx.jobs().len(), Ordering::SeqCst);
            Ok(())
        }
    }

    struct RequireJavaTarget;

    impl Phase for RequireJavaTarget {
        fn name(&self) -> &'static str {
            "require-java"
        }

        fn description(&self) -> &'static str {
            "Flag manifests without a Java target"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            if ctx.manifest.java.is_none() {
                ctx.add_error(self.name(), "a [java] target is required");
            }
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let temp = TempDir::new().unwrap();
        let ctx = Pipeline::new()
            .run(Manifest::default(), temp.path())
            .expect("pipeline should succeed");

        assert!(ctx.inputs.is_some());
        assert!(ctx.resolved.is_some());
        assert!(ctx.filtered.is_some());
        // Default Java target with no sources still yields one (empty) job
        assert_eq!(ctx.jobs().len(), 1);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let temp = TempDir::new().unwrap();
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(Manifest::default(), temp.path())
            .expect("pipeline should succeed");

        // 4 built-in phases = 4 before + 4 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 4);
        assert_eq!(after_count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_plugin_can_abort() {
        let temp = TempDir::new().unwrap();
        let err = Pipeline::new()
            .plugin(AbortingPlugin)
            .run(Manifest::default(), temp.path())
            .unwrap_err();

        assert!(matches!(err, Error::Plugin { plugin: "aborting", .. }));
    }

    #[test]
    fn test_user_phase_runs_after_plan() {
        let temp = TempDir::new().unwrap();
        let seen = Arc::new(AtomicUsize::new(usize::MAX));

        Pipeline::new()
            .phase(CountJobs(seen.clone()))
            .run(Manifest::default(), temp.path())
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_user_phase_error_diagnostic_does_not_abort() {
        let temp = TempDir::new().unwrap();
        let ctx = Pipeline::new()
            .phase(RequireJavaTarget)
            .run(Manifest::default(), temp.path())
            .unwrap();

        assert!(ctx.has_errors());
        let errors: Vec<&str> = ctx.errors().map(|d| d.message.as_str()).collect();
        assert_eq!(errors, vec!["a [java] target is required"]);
        assert_eq!(ctx.jobs().len(), 1);
    }
}
