//! Sources command report data structures.

use super::{
    output::{Output, Report},
    plural,
};

/// Resolved files, grouped by role.
#[derive(Debug)]
pub struct SourcesReport {
    /// Notes from lowering the manifest (e.g., missing default source path).
    pub notes: Vec<String>,
    pub sources: Vec<SourceEntry>,
    pub proto_path: Vec<SourceEntry>,
}

/// One resolved file and where it came from.
#[derive(Debug)]
pub struct SourceEntry {
    pub logical_path: String,
    /// Physical location (`dir/a.proto`, `lib.jar!/a.proto`).
    pub origin: String,
    /// Number of declared types.
    pub types: usize,
}

impl Report for SourcesReport {
    fn render(&self, out: &mut dyn Output) {
        for note in &self.notes {
            out.preformatted(&format!("note: {}", note));
        }

        if self.sources.is_empty() && self.proto_path.is_empty() {
            out.preformatted("No proto files found.");
            return;
        }

        let groups = [("Sources", &self.sources), ("Proto path", &self.proto_path)];
        let mut first = true;
        for (name, entries) in groups {
            if entries.is_empty() {
                continue;
            }
            if !first {
                out.newline();
            }
            first = false;

            out.section(&format!("{} ({})", name, plural(entries.len(), "file")));
            for entry in entries.iter() {
                out.list_item(&format!(
                    "{} <- {} ({})",
                    entry.logical_path,
                    entry.origin,
                    plural(entry.types, "type")
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn entry(logical_path: &str, origin: &str, types: usize) -> SourceEntry {
        SourceEntry {
            logical_path: logical_path.into(),
            origin: origin.into(),
            types,
        }
    }

    #[test]
    fn test_render_sources_and_proto_path() {
        let report = SourcesReport {
            notes: Vec::new(),
            sources: vec![
                entry(
                    "squareup/dinosaurs/dinosaur.proto",
                    "proto/squareup/dinosaurs/dinosaur.proto",
                    1,
                ),
                entry(
                    "squareup/geology/period.proto",
                    "libs/geology.jar!/squareup/geology/period.proto",
                    2,
                ),
            ],
            proto_path: vec![entry(
                "google/protobuf/descriptor.proto",
                "shared/google/protobuf/descriptor.proto",
                0,
            )],
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        Sources (2 files):
          - squareup/dinosaurs/dinosaur.proto <- proto/squareup/dinosaurs/dinosaur.proto (1 type)
          - squareup/geology/period.proto <- libs/geology.jar!/squareup/geology/period.proto (2 types)

        Proto path (1 file):
          - google/protobuf/descriptor.proto <- shared/google/protobuf/descriptor.proto (0 types)
        ");
    }

    #[test]
    fn test_render_empty() {
        let report = SourcesReport {
            notes: vec!["no sources configured and 'src/main/proto' does not exist".into()],
            sources: Vec::new(),
            proto_path: Vec::new(),
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        note: no sources configured and 'src/main/proto' does not exist
        No proto files found.
        ");
    }
}
