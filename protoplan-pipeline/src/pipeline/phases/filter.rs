//! Filter phase - applies roots and prunes to the resolved sources.

use tracing::debug;

use crate::{
    FilterEngine, Result,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that filters resolved sources by declared type names.
pub struct FilterPhase;

impl Phase for FilterPhase {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn description(&self) -> &'static str {
        "Apply root and prune patterns to declared types"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let rules = ctx.inputs()?.rules.clone();
        let resolved = ctx.resolved()?;
        let outcome = FilterEngine::new(rules).apply(&resolved.sources);

        let mut diagnostics = Vec::new();
        for root in &outcome.unmatched_roots {
            debug!(root = %root, "unmatched root");
            diagnostics.push(
                Diagnostic::warning(
                    "filter",
                    format!("root '{}' matches no declared type", root),
                )
                .at("roots"),
            );
        }
        for prune in &outcome.unmatched_prunes {
            debug!(prune = %prune, "unmatched prune");
            let location = if ctx.manifest.prunes.iter().any(|p| p.trim() == prune.as_str()) {
                "prunes"
            } else {
                "rules"
            };
            diagnostics.push(
                Diagnostic::warning(
                    "filter",
                    format!("prune '{}' matches no declared type", prune),
                )
                .at(location),
            );
        }
        if outcome.files.is_empty() && !resolved.sources.is_empty() {
            diagnostics.push(Diagnostic::warning(
                "filter",
                "roots and prunes exclude every declared type",
            ));
        }

        ctx.diagnostics.extend(diagnostics);
        ctx.filtered = Some(outcome);
        Ok(())
    }
}
