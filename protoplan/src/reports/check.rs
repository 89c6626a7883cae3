//! Check command report data structures.

use std::path::PathBuf;

use protoplan_core::TargetKind;

use super::{
    output::{Output, Report},
    plural,
};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
    /// Number of resolved source files.
    pub sources: usize,
    /// Number of resolved proto path files.
    pub proto_path: usize,
    /// Number of types surviving roots and prunes.
    pub selected: usize,
    /// One entry per planned job.
    pub targets: Vec<TargetSummary>,
}

/// Summary of one planned job.
#[derive(Debug)]
pub struct TargetSummary {
    pub target: TargetKind,
    pub out_directory: PathBuf,
    pub files: usize,
    pub types: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.preformatted(&format!(
            "  {}, {}, {} selected",
            plural(self.sources, "source file"),
            plural(self.proto_path, "proto path file"),
            plural(self.selected, "type"),
        ));
        for target in &self.targets {
            out.list_item(&format!(
                "{} -> {} ({}, {})",
                target.target,
                target.out_directory.display(),
                plural(target.files, "file"),
                plural(target.types, "type"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("protoplan.toml"),
            errors: Vec::new(),
            warnings: vec!["root 'squareup.missing' matches no declared type\n  --> roots".into()],
            infos: vec!["resolved 2 source file(s) and 0 proto path file(s)".into()],
            sources: 2,
            proto_path: 0,
            selected: 3,
            targets: vec![
                TargetSummary {
                    target: TargetKind::Java,
                    out_directory: PathBuf::from("build/java"),
                    files: 2,
                    types: 3,
                },
                TargetSummary {
                    target: TargetKind::Kotlin,
                    out_directory: PathBuf::from("build/kotlin"),
                    files: 1,
                    types: 1,
                },
            ],
        }
    }

    #[test]
    fn test_render_valid() {
        insta::assert_snapshot!(BufferOutput::render(&report()), @r"
        warning: root 'squareup.missing' matches no declared type
          --> roots
        info: resolved 2 source file(s) and 0 proto path file(s)

        ✓ protoplan.toml is valid
          2 source files, 0 proto path files, 3 types selected
          - java -> build/java (2 files, 3 types)
          - kotlin -> build/kotlin (1 file, 1 type)
        ");
    }

    #[test]
    fn test_render_errors_skip_summary() {
        let mut report = report();
        report.warnings.clear();
        report.infos.clear();
        report.errors.push("plugin 'lint' rejected the plan".into());

        assert!(!report.is_valid());
        insta::assert_snapshot!(BufferOutput::render(&report), @"error: plugin 'lint' rejected the plan");
    }
}
