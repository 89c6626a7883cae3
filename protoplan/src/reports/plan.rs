//! Plan command report data structures.

use std::path::PathBuf;

use protoplan_core::{GenerationJob, TargetFlags, WriteResult};

use super::{
    output::{Output, Report},
    plural,
};

/// Report data from planning.
#[derive(Debug)]
pub struct PlanReport {
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Planned jobs, in target order.
    pub jobs: Vec<GenerationJob>,
}

impl PlanReport {
    /// The jobs as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.jobs)
    }
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for (i, job) in self.jobs.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(job.target.as_str());
            out.key_value_indented("out_directory", &job.out_directory.display().to_string());
            out.key_value_indented("flags", &enabled_flags(&job.flags));
            if !job.proto_path.is_empty() {
                out.key_value_indented("proto_path", &plural(job.proto_path.len(), "file"));
            }

            if job.files.is_empty() {
                out.preformatted("  (no files selected)");
            }
            for file in &job.files {
                out.list_item(&format!(
                    "{} ({})",
                    file.logical_path(),
                    plural(file.included.len(), "type")
                ));
            }
        }
    }
}

fn enabled_flags(flags: &TargetFlags) -> String {
    let enabled: Vec<&str> = match flags {
        TargetFlags::Java(f) => [
            ("android", f.android),
            ("android_annotations", f.android_annotations),
            ("compact", f.compact),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect(),
        TargetFlags::Kotlin(f) => [("android", f.android), ("java_interop", f.java_interop)]
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect(),
    };

    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(", ")
    }
}

/// Report data from writing the JSON plan to a file.
#[derive(Debug)]
pub struct WriteReport {
    pub path: PathBuf,
    pub result: WriteResult,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
}

impl Report for WriteReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        match self.result {
            WriteResult::Written => {
                out.preformatted(&format!("Wrote plan to {}", self.path.display()))
            }
            WriteResult::Unchanged => {
                out.preformatted(&format!("Plan at {} is up to date", self.path.display()))
            }
        }
    }
}
