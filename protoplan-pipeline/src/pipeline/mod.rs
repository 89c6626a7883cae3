//! Planning pipeline.
//!
//! A [`Pipeline`] runs the planning phases in order and collects their
//! results in a [`CompilationContext`]:
//!
//! - Explicit phase boundaries (lower → resolve → filter → plan)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use protoplan_pipeline::{Pipeline, Severity};
//!
//! let file = ManifestFile::open("protoplan.toml")?;
//! let ctx = Pipeline::new().run(file.manifest().clone(), file.base_dir())?;
//!
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("warning: {}", diag.message);
//!     }
//! }
//!
//! let jobs = ctx.into_jobs();
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{CompilationContext, PlanInputs};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
