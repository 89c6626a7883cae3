//! Built-in pipeline phases.
//!
//! - [`LowerPhase`] - derives planning inputs from the manifest
//! - [`ResolvePhase`] - expands source locations into proto files
//! - [`FilterPhase`] - applies roots and prunes
//! - [`PlanPhase`] - builds generation jobs

mod filter;
mod lower;
mod plan;
mod resolve;

pub use filter::FilterPhase;
pub use lower::LowerPhase;
pub use plan::PlanPhase;
pub use resolve::ResolvePhase;
