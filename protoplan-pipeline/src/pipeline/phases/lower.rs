//! Lower phase - derives planning inputs from the manifest.
//!
//! Builds the source and proto path sets, merges the rules file into the
//! prune set, and rebases target output directories onto the manifest
//! directory.

use std::path::Path;

use protoplan_core::{GenerationTarget, normalize_path};
use protoplan_manifest::{DEFAULT_SOURCE_PATH, Manifest, Rules};
use tracing::debug;

use crate::{
    Error, FilterRules, PathSet, Result,
    pipeline::{CompilationContext, Diagnostic, Phase, PlanInputs},
};

/// Phase that turns the manifest into [`PlanInputs`].
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Derive path sets, filter rules and targets from the manifest"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let base_dir = ctx.base_dir.clone();
        let manifest = &ctx.manifest;

        let mut diagnostics = Vec::new();
        let sources = lower_sources(manifest, &base_dir, &mut diagnostics);
        let proto_path = lower_locations(manifest.proto_locations());
        let rules = lower_rules(manifest, &base_dir)?;
        let targets = lower_targets(manifest, &base_dir);

        debug!(
            sources = sources.len(),
            proto_path = proto_path.len(),
            roots = rules.roots.len(),
            prunes = rules.prunes.len(),
            targets = targets.len(),
            "lowered manifest"
        );

        ctx.diagnostics.extend(diagnostics);
        ctx.inputs = Some(PlanInputs {
            sources,
            proto_path,
            rules,
            targets,
        });
        Ok(())
    }
}

fn lower_sources(manifest: &Manifest, base_dir: &Path, diagnostics: &mut Vec<Diagnostic>) -> PathSet {
    if manifest.uses_default_source_path() && !base_dir.join(DEFAULT_SOURCE_PATH).is_dir() {
        diagnostics.push(
            Diagnostic::info(
                "lower",
                format!("no sources configured and '{}' does not exist", DEFAULT_SOURCE_PATH),
            )
            .at("source_path"),
        );
        return PathSet::new();
    }
    lower_locations(manifest.source_locations())
}

fn lower_locations(locations: Vec<protoplan_core::SourceLocation>) -> PathSet {
    let mut set = PathSet::new();
    for location in locations {
        let shown = location.to_string();
        if !set.add(location) {
            debug!(location = %shown, "ignoring duplicate path");
        }
    }
    set
}

fn lower_rules(manifest: &Manifest, base_dir: &Path) -> Result<FilterRules> {
    let roots = manifest
        .root_patterns()
        .map_err(|source| Error::InvalidPattern {
            field: "roots",
            source,
        })?;
    let mut prunes = manifest
        .prune_patterns()
        .map_err(|source| Error::InvalidPattern {
            field: "prunes",
            source,
        })?;

    if let Some(rules_path) = &manifest.rules {
        let rules = Rules::from_file(base_dir.join(rules_path))?;
        debug!(path = %rules_path.display(), prunes = rules.prunes().len(), "read rules file");
        prunes.extend(rules.into_prunes());
    }

    Ok(FilterRules::new(roots, prunes))
}

fn lower_targets(manifest: &Manifest, base_dir: &Path) -> Vec<GenerationTarget> {
    manifest
        .targets()
        .into_iter()
        .map(|mut target| {
            let out = target.out_directory_mut();
            // An empty directory stays empty so planning can reject it.
            if !out.as_os_str().is_empty() && out.is_relative() {
                *out = normalize_path(&base_dir.join(&*out));
            }
            target
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use protoplan_core::SourceLocation;
    use tempfile::TempDir;

    use super::*;

    fn run(manifest: &str, base_dir: &Path) -> Result<CompilationContext> {
        let manifest: Manifest = toml::from_str(manifest).expect("Failed to parse test manifest");
        let mut ctx = CompilationContext::new(manifest, base_dir);
        LowerPhase.run(&mut ctx)?;
        Ok(ctx)
    }

    #[test]
    fn test_missing_default_source_path_is_info() {
        let temp = TempDir::new().unwrap();
        let ctx = run("", temp.path()).unwrap();

        let inputs = ctx.inputs().unwrap();
        assert!(inputs.sources.is_empty());
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].location.as_deref(), Some("source_path"));
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_existing_default_source_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/main/proto")).unwrap();

        let ctx = run("", temp.path()).unwrap();
        assert_eq!(
            ctx.inputs().unwrap().sources.locations(),
            &[SourceLocation::path("src/main/proto")]
        );
    }

    #[test]
    fn test_duplicate_paths_are_lowered_once() {
        let temp = TempDir::new().unwrap();
        let ctx = run(
            r#"source_path = ["proto", "./proto", "proto/", "libs/geology.jar"]"#,
            temp.path(),
        )
        .unwrap();

        assert_eq!(
            ctx.inputs().unwrap().sources.locations(),
            &[
                SourceLocation::path("proto"),
                SourceLocation::path("libs/geology.jar"),
            ]
        );
    }

    #[test]
    fn test_rules_file_is_merged_after_prunes() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("protoplan.rules"),
            "# extra\nsquareup.geology.internal\n",
        )
        .unwrap();

        let ctx = run(
            r#"
            source_path = ["proto"]
            prunes = ["squareup.dinosaurs.Fossil"]
            rules = "protoplan.rules"
            "#,
            temp.path(),
        )
        .unwrap();

        let prunes: Vec<&str> = ctx
            .inputs()
            .unwrap()
            .rules
            .prunes
            .iter()
            .map(|p| p.as_str())
            .collect();
        assert_eq!(prunes, vec!["squareup.dinosaurs.Fossil", "squareup.geology.internal"]);
    }

    #[test]
    fn test_missing_rules_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = run(r#"rules = "missing.rules""#, temp.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Manifest(protoplan_manifest::Error::RulesIo { .. })
        ));
    }

    #[test]
    fn test_output_directories_are_rebased() {
        let ctx = run(
            r#"
            [java]
            out_directory = "build/./java"

            [kotlin]
            out_directory = ""
            "#,
            Path::new("/work/app"),
        )
        .unwrap();

        let targets = &ctx.inputs().unwrap().targets;
        assert_eq!(targets[0].out_directory(), &PathBuf::from("/work/app/build/java"));
        assert_eq!(targets[1].out_directory(), &PathBuf::new());
    }
}
