//! Configuration surface for protoplan.
//!
//! Parses and validates `protoplan.toml`: source and proto path sets,
//! root/prune filters, the rules file reference, and the per-target
//! generation tables. Errors carry source spans for miette reports.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod rules;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;
pub use rules::Rules;
