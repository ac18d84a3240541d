use serde::{Deserialize, Serialize};

/// Raw counts of one model's confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub model_index: usize,
    pub true_positive: u64,
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn max_count(&self) -> u64 {
        self.true_positive
            .max(self.true_negative)
            .max(self.false_positive)
            .max(self.false_negative)
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }
}
