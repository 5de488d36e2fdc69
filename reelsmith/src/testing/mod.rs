//! Testing utilities for reelsmith jobs.
//!
//! This module provides:
//! - Mock drawing surfaces and providers
//! - Assertions over job snapshots and logs

mod assertions;
mod mocks;

pub use assertions::{
    assert_log_messages, assert_progress_strictly_increasing, assert_terminal_state,
};
pub use mocks::{
    FailingExportProvider, RecordingSurface, RecordingSurfaceProvider, UnavailableSurfaceProvider,
};
