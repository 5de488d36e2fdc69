//! Stage and stage-plan specifications.

use crate::errors::PlanValidationError;
use serde::{Deserialize, Serialize};

/// One named step of a stage plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// The stage name.
    pub name: String,
    /// Cumulative progress once this stage has advanced, in (0, 100].
    pub progress: u8,
    /// Position in the plan; assigned by [`StagePlan::new`].
    #[serde(default)]
    pub ordinal: usize,
    /// Log message recorded when the stage advances.
    pub message: String,
}

impl Stage {
    /// Creates a stage; its ordinal is assigned when placed in a plan.
    #[must_use]
    pub fn new(name: impl Into<String>, progress: u8, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progress,
            ordinal: 0,
            message: message.into(),
        }
    }
}

/// The stages of the video-generation simulation, in order.
const VIDEO_GENERATION_STAGES: [(&str, u8, &str); 8] = [
    ("analyze_prompt", 10, "Analyzing prompt and extracting key concepts..."),
    ("plan_structure", 25, "Planning video structure and scenes..."),
    ("generate_assets", 40, "Generating visual elements and assets..."),
    ("compose_transitions", 55, "Creating scene transitions and effects..."),
    ("render_frames", 70, "Rendering video frames..."),
    ("sync_audio", 85, "Adding audio and synchronization..."),
    ("finalize_output", 95, "Finalizing video output..."),
    ("complete", 100, "Video generation complete!"),
];

/// A validated, ordered sequence of stages.
///
/// Progress is strictly increasing across the plan and the last stage
/// reaches exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Stage>", into = "Vec<Stage>")]
pub struct StagePlan {
    stages: Vec<Stage>,
}

impl StagePlan {
    /// Validates `stages` and assigns ordinals by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is empty, a progress value is outside
    /// (0, 100], progress does not strictly increase, or the final stage
    /// does not reach 100.
    pub fn new(stages: Vec<Stage>) -> Result<Self, PlanValidationError> {
        let Some(last) = stages.last() else {
            return Err(PlanValidationError::new("Stage plan must contain at least one stage"));
        };
        if last.progress != 100 {
            return Err(PlanValidationError::new(format!(
                "Final stage '{}' must reach 100, got {}",
                last.name, last.progress
            ))
            .with_stages(vec![last.name.clone()]));
        }
        if let Some(stage) = stages.iter().find(|s| s.progress == 0 || s.progress > 100) {
            return Err(PlanValidationError::new(format!(
                "Stage '{}' has progress {} outside (0, 100]",
                stage.name, stage.progress
            ))
            .with_stages(vec![stage.name.clone()]));
        }
        if let Some(pair) = stages.windows(2).find(|w| w[0].progress >= w[1].progress) {
            return Err(PlanValidationError::new(format!(
                "Progress must strictly increase: '{}' ({}) is followed by '{}' ({})",
                pair[0].name, pair[0].progress, pair[1].name, pair[1].progress
            ))
            .with_stages(vec![pair[0].name.clone(), pair[1].name.clone()]));
        }

        let stages = stages
            .into_iter()
            .enumerate()
            .map(|(ordinal, stage)| Stage { ordinal, ..stage })
            .collect();
        Ok(Self { stages })
    }

    /// The eight-stage video-generation plan.
    #[must_use]
    pub fn video_generation() -> Self {
        let stages = VIDEO_GENERATION_STAGES
            .iter()
            .enumerate()
            .map(|(ordinal, (name, progress, message))| Stage {
                ordinal,
                ..Stage::new(*name, *progress, *message)
            })
            .collect();
        Self { stages }
    }

    /// Returns the stages in order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; a plan has at least one stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterates over the stages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }
}

impl Default for StagePlan {
    fn default() -> Self {
        Self::video_generation()
    }
}

impl TryFrom<Vec<Stage>> for StagePlan {
    type Error = PlanValidationError;

    fn try_from(stages: Vec<Stage>) -> Result<Self, Self::Error> {
        Self::new(stages)
    }
}

impl From<StagePlan> for Vec<Stage> {
    fn from(plan: StagePlan) -> Self {
        plan.stages
    }
}

impl<'a> IntoIterator for &'a StagePlan {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}
