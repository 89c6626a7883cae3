//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod output;
mod plan;
mod sources;

pub use check::{CheckReport, TargetSummary};
pub use output::{Report, TerminalOutput};
pub use plan::{PlanReport, WriteReport};
pub use sources::{SourceEntry, SourcesReport};

/// `1 file`, `2 files`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
