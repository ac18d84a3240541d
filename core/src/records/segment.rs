use serde::{Deserialize, Serialize};

/// Binary class of a segment, or a model's prediction of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Label::Negative)
        } else if value == 1.0 {
            Some(Label::Positive)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predictions {
    pub random_forest: Label,
    pub neural_net: Label,
    pub logistic_regression: Label,
    pub ensemble: Label,
}

/// Placement of a segment marker in the all-segments grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
}

/// One classified EEG segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub index: usize,
    pub feature1: f64,
    pub feature2: f64,
    pub label: Label,
    pub predictions: Predictions,
    pub layout: GridPosition,
    pub fill_color: String,
}

impl SegmentRecord {
    /// True when the ensemble disagrees with the ground-truth label.
    pub fn is_misclassified(&self) -> bool {
        self.label != self.predictions.ensemble
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_accepts_only_binary_values() {
        assert_eq!(Label::from_value(1.0), Some(Label::Positive));
        assert_eq!(Label::from_value(0.0), Some(Label::Negative));
        assert_eq!(Label::from_value(0.5), None);
    }
}
