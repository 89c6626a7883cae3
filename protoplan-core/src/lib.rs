//! Core types for the protoplan generation planner.
//!
//! This crate provides the domain types shared by the manifest, the
//! planning pipeline and the command-line tool: where proto sources come
//! from, what a discovered proto file looks like, which targets can be
//! generated, and the jobs handed to a generator backend.

mod declarations;
mod file;
mod job;
mod location;
mod pattern;
mod proto;
mod target;
mod utils;

pub use declarations::Declarations;
// File operations
pub use file::{File, WriteResult};
pub use job::{GenerationJob, PlannedFile};
pub use location::{PROTO_SUFFIX, SourceLocation, SourceTree, default_include};
pub use pattern::{Pattern, PatternError};
pub use proto::{Fingerprint, Origin, ProtoFile};
pub use target::{
    GenerationTarget, JavaFlags, JavaTarget, KotlinFlags, KotlinTarget, TargetFlags, TargetKind,
};
// Path utilities
pub use utils::{is_archive_path, normalize_path, to_slash};
