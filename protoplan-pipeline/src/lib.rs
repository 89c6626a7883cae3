//! Generation planning for protoplan.
//!
//! Turns configured source locations, filter rules and targets into a
//! deterministic list of generation jobs:
//!
//! - [`PathSet`] - ordered, deduplicated source locations
//! - [`SourceResolver`] - expands locations into proto files, detecting collisions
//! - [`FilterEngine`] - applies root and prune patterns to declared types
//! - [`TargetPlanner`] - validates targets and assembles [`GenerationJob`]s
//! - [`pipeline`] - the phase pipeline tying these together
//!
//! [`GenerationJob`]: protoplan_core::GenerationJob

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod filter;
mod path_set;
pub mod pipeline;
mod planner;
mod resolve;

pub use error::{Error, Result};
pub use filter::{FilterEngine, FilterOutcome, FilterRules};
pub use path_set::PathSet;
pub use pipeline::{
    CompilationContext, Diagnostic, Phase, PhaseSnapshot, Pipeline, PlanInputs, Plugin, Severity,
    SnapshotPlugin,
};
pub use planner::TargetPlanner;
pub use resolve::{ArtifactResolver, Resolved, SourceResolver, is_coordinate};
