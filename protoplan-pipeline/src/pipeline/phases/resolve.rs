//! Resolve phase - expands source locations into proto files.

use std::sync::Arc;

use tracing::info;

use crate::{
    ArtifactResolver, Result, SourceResolver,
    pipeline::{CompilationContext, Phase},
};

/// Phase that resolves the lowered path sets.
#[derive(Default)]
pub struct ResolvePhase {
    artifacts: Option<Arc<dyn ArtifactResolver>>,
}

impl ResolvePhase {
    pub fn new(artifacts: Option<Arc<dyn ArtifactResolver>>) -> Self {
        Self { artifacts }
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Expand directories, archives and trees into proto files"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let inputs = ctx.inputs()?;

        let mut resolver = SourceResolver::new(&ctx.base_dir);
        if let Some(artifacts) = &self.artifacts {
            resolver = resolver.with_artifacts(Arc::clone(artifacts));
        }
        let resolved = resolver.resolve_all(&inputs.sources, &inputs.proto_path)?;

        info!(
            sources = resolved.sources.len(),
            proto_path = resolved.proto_path.len(),
            "resolved proto files"
        );
        ctx.add_info(
            "resolve",
            format!(
                "resolved {} source file(s) and {} proto path file(s)",
                resolved.sources.len(),
                resolved.proto_path.len()
            ),
        );
        ctx.resolved = Some(resolved);
        Ok(())
    }
}
