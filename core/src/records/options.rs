use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalp electrodes recorded by the headset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Electrode {
    #[default]
    #[serde(rename = "TP9")]
    Tp9,
    #[serde(rename = "AF7")]
    Af7,
    #[serde(rename = "AF8")]
    Af8,
    #[serde(rename = "TP10")]
    Tp10,
}

impl Electrode {
    pub const ALL: [Electrode; 4] = [Electrode::Tp9, Electrode::Af7, Electrode::Af8, Electrode::Tp10];

    pub fn as_str(&self) -> &'static str {
        match self {
            Electrode::Tp9 => "TP9",
            Electrode::Af7 => "AF7",
            Electrode::Af8 => "AF8",
            Electrode::Tp10 => "TP10",
        }
    }

    pub fn raw_column(&self) -> String {
        format!("RAW_{}", self.as_str())
    }

    pub fn clean_column(&self) -> String {
        format!("CLEAN_{}", self.as_str())
    }
}

impl fmt::Display for Electrode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Electrode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Electrode::ALL
            .iter()
            .copied()
            .find(|electrode| electrode.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown electrode `{}`", value))
    }
}

/// Classifiers offered in the model dropdown. The discriminant is the
/// model key in the ROC table and the row position in the confusion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    LogisticRegression = 0,
    NeuralNetwork = 1,
    RandomForest = 2,
    BoostingMethod = 3,
}

impl Model {
    pub const ALL: [Model; 4] = [
        Model::LogisticRegression,
        Model::NeuralNetwork,
        Model::RandomForest,
        Model::BoostingMethod,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Model::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Model::LogisticRegression => "Logistic Regression",
            Model::NeuralNetwork => "Neural Network",
            Model::RandomForest => "Random Forest",
            Model::BoostingMethod => "Boosting Method",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electrode_columns_follow_wide_format() {
        assert_eq!(Electrode::Af8.raw_column(), "RAW_AF8");
        assert_eq!(Electrode::Tp10.clean_column(), "CLEAN_TP10");
    }

    #[test]
    fn electrode_parses_case_insensitively() {
        assert_eq!("tp10".parse::<Electrode>().unwrap(), Electrode::Tp10);
        assert!("FZ".parse::<Electrode>().is_err());
    }

    #[test]
    fn model_index_matches_dropdown_order() {
        assert_eq!(Model::from_index(2), Some(Model::RandomForest));
        assert_eq!(Model::BoostingMethod.index(), 3);
        assert_eq!(Model::from_index(4), None);
    }
}
