//! Plan phase - builds one generation job per configured target.

use tracing::info;

use crate::{
    Result, TargetPlanner,
    pipeline::{CompilationContext, Phase},
};

/// Phase that assembles generation jobs.
pub struct PlanPhase;

impl Phase for PlanPhase {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn description(&self) -> &'static str {
        "Validate targets and assemble generation jobs"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let targets = &ctx.inputs()?.targets;
        let proto_path = ctx.resolved()?.proto_path.clone();
        let filtered = ctx.filtered()?;

        let jobs = TargetPlanner::new()
            .with_proto_path(proto_path)
            .plan(&filtered.files, targets)?;

        let summaries: Vec<String> = jobs
            .iter()
            .map(|job| {
                info!(
                    target = %job.target,
                    files = job.files.len(),
                    types = job.type_count(),
                    out = %job.out_directory.display(),
                    "planned job"
                );
                format!(
                    "{} target: {} file(s), {} type(s) into {}",
                    job.target,
                    job.files.len(),
                    job.type_count(),
                    job.out_directory.display()
                )
            })
            .collect();

        for summary in summaries {
            ctx.add_info("plan", summary);
        }
        ctx.jobs = Some(jobs);
        Ok(())
    }
}
