//! Stage plans and their timed execution.
//!
//! This module provides:
//! - Stage and stage-plan specifications with ordering validation
//! - A strictly sequential, cancellable executor

mod executor;
mod spec;

pub use executor::{PipelineOutcome, StagePipeline};
pub use spec::{Stage, StagePlan};
