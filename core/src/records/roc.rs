use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::prelude::VisResult;

/// One leaf of the ROC table: co-sorted rate sequences plus the precomputed AUC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub auc: f64,
}

/// A single operating point on a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// Nested ROC lookup keyed by resolution, then model index.
///
/// The JSON document uses string keys (`{"1": {"0": {...}}}`); they are
/// read as integers so resolutions order numerically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RocTable(BTreeMap<usize, BTreeMap<usize, RocCurve>>);

impl RocTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(document: &str) -> VisResult<Self> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn insert(&mut self, resolution: usize, model: usize, curve: RocCurve) {
        self.0.entry(resolution).or_default().insert(model, curve);
    }

    pub fn curve(&self, resolution: usize, model: usize) -> Option<&RocCurve> {
        self.0.get(&resolution)?.get(&model)
    }

    pub fn has_resolution(&self, resolution: usize) -> bool {
        self.0.contains_key(&resolution)
    }

    /// Resolution keys in ascending order.
    pub fn resolutions(&self) -> Vec<usize> {
        self.0.keys().copied().collect()
    }

    pub fn first_resolution(&self) -> Option<usize> {
        self.0.keys().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_reads_string_keys_as_indices() {
        let table = RocTable::from_json(
            r#"{"10": {"0": {"fpr": [0.0], "tpr": [0.0], "auc": 0.4}},
                "2": {"1": {"fpr": [0.0, 1.0], "tpr": [0.0, 1.0], "auc": 0.5}}}"#,
        )
        .unwrap();
        assert_eq!(table.resolutions(), vec![2, 10]);
        assert_eq!(table.first_resolution(), Some(2));
        assert_eq!(table.curve(2, 1).unwrap().auc, 0.5);
        assert!(table.curve(2, 0).is_none());
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(RocTable::from_json(r#"{"a": {}}"#).is_err());
        assert!(RocTable::from_json("[1, 2]").is_err());
    }
}
