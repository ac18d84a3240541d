use serde::{Deserialize, Serialize};

use crate::records::Electrode;

/// Outer margins of the scene, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 20.0,
            bottom: 40.0,
            right: 10.0,
        }
    }
}

/// Shared configuration for scene construction and redraws.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub circle_radius: f64,
    pub circle_padding: f64,
    pub model_transition_ms: u64,
    pub pipeline_interval_ms: u64,
    pub pipeline_steps: Vec<String>,
    pub electrode: Electrode,
    pub animation_width: f64,
    pub animation_height: f64,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 520.0,
            margin: Margin::default(),
            circle_radius: 2.0,
            circle_padding: 22.0,
            model_transition_ms: 500,
            pipeline_interval_ms: 3000,
            pipeline_steps: [
                "1. COLLECT",
                "2. CLEAN",
                "3. TRANSFORM",
                "4. CLASSIFY",
                "5. EVALUATE",
                "6. CONTROL",
            ]
            .iter()
            .map(|step| step.to_string())
            .collect(),
            electrode: Electrode::Tp9,
            animation_width: 960.0,
            animation_height: 120.0,
        }
    }
}

impl VisConfig {
    /// Footprint of one segment marker in the grid layout.
    pub fn segment_footprint(&self) -> f64 {
        self.circle_radius + self.circle_padding
    }
}

/// Common error type for shaping, scoring and controller operations.
#[derive(thiserror::Error, Debug)]
pub enum VisError {
    #[error("row {row}: field `{field}` has malformed value {value:?}")]
    DataParse {
        field: String,
        row: usize,
        value: String,
    },
    #[error("row {row}: field `{field}` is missing")]
    MissingField { field: String, row: usize },
    #[error("{axis} index {index} out of range")]
    IndexOutOfRange { axis: &'static str, index: usize },
    #[error("confusion matrix for model {model} has all-zero counts")]
    DegenerateMatrix { model: usize },
    #[error("rate sequences differ in length: fpr {fpr}, tpr {tpr}")]
    RateLengthMismatch { fpr: usize, tpr: usize },
    #[error("malformed ROC document: {0}")]
    RocJson(#[from] serde_json::Error),
    #[error("scene has not been rendered yet")]
    NotRendered,
}

pub type VisResult<T> = Result<T, VisError>;
