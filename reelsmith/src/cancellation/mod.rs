//! Cooperative cancellation for running jobs.
//!
//! A cancelled job stops scheduling stages but never interrupts a stage
//! delay that is already in progress.

mod token;

pub use token::{CancelCallback, CancellationToken};
