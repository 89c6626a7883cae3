//! Core operations.
//!
//! This module contains the business logic for protoplan commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod plan;
pub mod sources;

pub use check::check;
pub use plan::{PlanOptions, plan, write_plan};
pub use sources::sources;

use protoplan_pipeline::Diagnostic;

/// Render a diagnostic message with its configuration key, if any.
fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
