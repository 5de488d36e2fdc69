//! Agent configuration.

use crate::errors::ReelsmithError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a job runner.
///
/// Stage pacing is a presentation concern; tests typically run with a zero
/// delay, interactive callers with the one-second default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Delay before each stage advance, in milliseconds.
    #[serde(default = "default_stage_delay_ms")]
    pub stage_delay_ms: u64,
    /// Artifact canvas width in pixels.
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    /// Artifact canvas height in pixels.
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    /// Maximum number of prompt characters drawn on the artifact.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    /// Title line drawn above the prompt.
    #[serde(default = "default_title")]
    pub title: String,
    /// Caption line drawn below the prompt.
    #[serde(default = "default_caption")]
    pub caption: String,
}

fn default_stage_delay_ms() -> u64 {
    1000
}

fn default_canvas_width() -> u32 {
    1280
}

fn default_canvas_height() -> u32 {
    720
}

fn default_excerpt_chars() -> usize {
    50
}

fn default_title() -> String {
    "AI Generated Video".to_string()
}

fn default_caption() -> String {
    "(Demo Preview)".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            stage_delay_ms: default_stage_delay_ms(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            excerpt_chars: default_excerpt_chars(),
            title: default_title(),
            caption: default_caption(),
        }
    }
}

impl AgentConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ReelsmithError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReelsmithError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Sets the per-stage delay.
    #[must_use]
    pub fn with_stage_delay(mut self, delay: Duration) -> Self {
        self.stage_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the canvas size.
    #[must_use]
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Sets the excerpt bound.
    #[must_use]
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Gets the stage delay as a Duration.
    #[must_use]
    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }

    /// Checks that the canvas has a drawable area.
    pub fn validate(&self) -> Result<(), ReelsmithError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ReelsmithError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        Ok(())
    }
}
