//! Root/prune filtering over declared type names.

use protoplan_core::{Pattern, PlannedFile, ProtoFile};
use serde::Serialize;
use tracing::debug;

/// Inclusion and exclusion patterns.
///
/// Empty `roots` includes everything. `prunes` always wins over `roots`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterRules {
    pub roots: Vec<Pattern>,
    pub prunes: Vec<Pattern>,
}

impl FilterRules {
    pub fn new(roots: Vec<Pattern>, prunes: Vec<Pattern>) -> Self {
        Self { roots, prunes }
    }

    /// Whether a fully-qualified type survives the rules.
    pub fn includes(&self, qualified: &str) -> bool {
        let rooted = self.roots.is_empty() || self.roots.iter().any(|r| r.matches(qualified));
        rooted && !self.prunes.iter().any(|p| p.matches(qualified))
    }
}

/// Result of filtering a resolved set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOutcome {
    /// Files with at least one surviving type; `included` lists those types.
    pub files: Vec<PlannedFile>,
    /// Root patterns that matched no declared type.
    pub unmatched_roots: Vec<Pattern>,
    /// Prune patterns that matched no declared type.
    pub unmatched_prunes: Vec<Pattern>,
}

impl FilterOutcome {
    /// All surviving types, in file order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .flat_map(|f| f.included.iter().map(String::as_str))
    }
}

/// Applies [`FilterRules`] to resolved proto files.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    rules: FilterRules,
}

impl FilterEngine {
    pub fn new(rules: FilterRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &FilterRules {
        &self.rules
    }

    /// Filter `files`, keeping their order.
    ///
    /// Files left without any type are dropped. Patterns that match nothing
    /// in the whole set are reported in the outcome rather than failing.
    pub fn apply(&self, files: &[ProtoFile]) -> FilterOutcome {
        let mut kept = Vec::new();
        for file in files {
            let included: Vec<String> = file
                .types
                .iter()
                .filter(|t| self.rules.includes(t))
                .cloned()
                .collect();

            if included.is_empty() {
                debug!(path = %file.logical_path, declared = file.types.len(), "dropping file without included types");
                continue;
            }
            kept.push(PlannedFile {
                file: file.clone(),
                included,
            });
        }

        let declared = || files.iter().flat_map(|f| f.types.iter());
        let unmatched = |patterns: &[Pattern]| -> Vec<Pattern> {
            patterns
                .iter()
                .filter(|p| !declared().any(|t| p.matches(t)))
                .cloned()
                .collect()
        };

        FilterOutcome {
            unmatched_roots: unmatched(&self.rules.roots),
            unmatched_prunes: unmatched(&self.rules.prunes),
            files: kept,
        }
    }
}
