//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, TreeConfig, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

/// Default manifest filename.
pub const MANIFEST_FILENAME: &str = "protoplan.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILENAME)
    }
}

impl Manifest {
    /// Parse a protoplan.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a protoplan.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let source_path = ctx.push("source_path");
    for path in &manifest.source_path {
        source_path.validate_path_string(path)?;
    }
    let proto_path = ctx.push("proto_path");
    for path in &manifest.proto_path {
        proto_path.validate_path_string(path)?;
    }

    validate_trees(&ctx.push("source_tree"), &manifest.source_tree)?;
    validate_trees(&ctx.push("proto_tree"), &manifest.proto_tree)?;

    let roots = ctx.push("roots");
    for root in &manifest.roots {
        roots.validate_pattern(root)?;
    }
    let prunes = ctx.push("prunes");
    for prune in &manifest.prunes {
        prunes.validate_pattern(prune)?;
    }

    if let Some(java) = &manifest.java {
        let elements = ctx.push("java").push("elements");
        for element in &java.elements {
            elements.validate_pattern(element)?;
        }
    }
    if let Some(kotlin) = &manifest.kotlin {
        let elements = ctx.push("kotlin").push("elements");
        for element in &kotlin.elements {
            elements.validate_pattern(element)?;
        }
    }

    Ok(())
}

fn validate_trees(ctx: &ParseContext<'_>, trees: &[TreeConfig]) -> Result<()> {
    for (index, tree) in trees.iter().enumerate() {
        if tree.src_dirs.is_empty() {
            return Err(ctx.source_context().validation_error(
                format!(
                    "{} #{} must declare at least one entry in src_dirs",
                    ctx.path_string(),
                    index + 1
                ),
                None,
            ));
        }
        if tree.include.is_empty() {
            return Err(ctx.source_context().validation_error(
                format!(
                    "{} #{} has an empty include filter; omit it to include all .proto files",
                    ctx.path_string(),
                    index + 1
                ),
                None,
            ));
        }
    }
    Ok(())
}
