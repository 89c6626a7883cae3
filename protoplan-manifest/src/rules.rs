//! Rules files: extra prune patterns kept outside the manifest.
//!
//! One pattern per line. `#` starts a comment and blank lines are ignored.
//! A leading `-` is accepted for readability (`- squareup.dinosaurs.Fossil`).

use std::path::Path;

use miette::SourceSpan;
use protoplan_core::Pattern;

use crate::{Error, Result, error::SourceContext};

/// Parsed rules file.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    prunes: Vec<Pattern>,
}

impl Rules {
    /// Read and parse a rules file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::RulesIo {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse rules from a string, using `filename` for error reporting.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let mut prunes = Vec::new();
        let mut offset = 0;

        for (index, line) in content.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += line.len();

            let text = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            let trimmed = text.trim();
            let pattern = trimmed.strip_prefix('-').map(str::trim).unwrap_or(trimmed);
            if pattern.is_empty() {
                continue;
            }

            match Pattern::parse(pattern) {
                Ok(p) => prunes.push(p),
                Err(e) => {
                    let start = line_start + line.find(pattern).unwrap_or(0);
                    return Err(ctx.invalid_pattern_error(
                        pattern,
                        format!("rules line {}", index + 1),
                        e.reason,
                        Some(SourceSpan::from((start, pattern.len()))),
                    ));
                }
            }
        }

        Ok(Self { prunes })
    }

    /// Prune patterns in file order.
    pub fn prunes(&self) -> &[Pattern] {
        &self.prunes
    }

    /// Consume the rules, returning the prune patterns.
    pub fn into_prunes(self) -> Vec<Pattern> {
        self.prunes
    }
}
