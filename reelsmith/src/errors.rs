//! Error types for the reelsmith agent.
//!
//! Only prompt validation and stage-plan validation surface to callers.
//! Rendering failures are recovered inside the renderer and cancellation is
//! a terminal job state rather than an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for reelsmith operations.
#[derive(Debug, Error)]
pub enum ReelsmithError {
    /// The submitted prompt was rejected.
    #[error("{0}")]
    Validation(#[from] PromptValidationError),

    /// A stage plan violated its ordering invariants.
    #[error("{0}")]
    Plan(#[from] PlanValidationError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The task running a job was torn down by the runtime.
    #[error("Job task failed: {0}")]
    Runtime(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised when a prompt is empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct PromptValidationError {
    /// The user-facing message recorded in the job log.
    pub message: String,
}

impl PromptValidationError {
    /// Message used when the prompt is blank.
    pub const EMPTY_PROMPT: &'static str = "Error: Please enter a video description";

    /// Creates a new prompt validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates the error for an empty or whitespace-only prompt.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Self::EMPTY_PROMPT)
    }
}

/// Error raised when a stage plan is malformed.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PlanValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
}

impl PlanValidationError {
    /// Creates a new plan validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }
}

/// Errors raised by a drawing surface.
///
/// The renderer never lets these escape a job; they are logged and the
/// artifact falls back to a blank payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No drawing surface could be acquired.
    #[error("Drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The bitmap could not be encoded.
    #[error("Bitmap encoding failed: {0}")]
    Encode(String),
}

impl RenderError {
    /// Creates a surface unavailable error.
    #[must_use]
    pub fn surface_unavailable(width: u32, height: u32) -> Self {
        Self::SurfaceUnavailable { width, height }
    }

    /// Creates an encoding error.
    #[must_use]
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode(reason.into())
    }
}
