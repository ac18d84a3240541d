//! Selection of ROC points and AUC values, and confusion-matrix normalization.

use ndarray::{arr2, Array2};
use serde::Serialize;

use crate::prelude::{VisError, VisResult};
use crate::records::{ConfusionMatrix, RocCurve, RocPoint, RocTable};

fn lookup(table: &RocTable, resolution: usize, model: usize) -> VisResult<&RocCurve> {
    if !table.has_resolution(resolution) {
        return Err(VisError::IndexOutOfRange {
            axis: "resolution",
            index: resolution,
        });
    }
    table.curve(resolution, model).ok_or(VisError::IndexOutOfRange {
        axis: "model",
        index: model,
    })
}

/// Pairs the false/true positive rates of one curve by position.
/// Sequences of unequal length are rejected rather than truncated.
pub fn select_roc(table: &RocTable, resolution: usize, model: usize) -> VisResult<Vec<RocPoint>> {
    let curve = lookup(table, resolution, model)?;
    if curve.fpr.len() != curve.tpr.len() {
        return Err(VisError::RateLengthMismatch {
            fpr: curve.fpr.len(),
            tpr: curve.tpr.len(),
        });
    }
    Ok(curve
        .fpr
        .iter()
        .zip(&curve.tpr)
        .map(|(&fpr, &tpr)| RocPoint { fpr, tpr })
        .collect())
}

pub fn select_auc(table: &RocTable, resolution: usize, model: usize) -> VisResult<f64> {
    Ok(lookup(table, resolution, model)?.auc)
}

/// Confusion counts scaled by their maximum, laid out as
/// `[[tp, fn], [fp, tn]]` (row = predicted, column = actual).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMatrix {
    pub model_index: usize,
    pub max: u64,
    pub grid: Array2<f64>,
    pub counts: [[u64; 2]; 2],
}

impl NormalizedMatrix {
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.grid[[row, col]]
    }

    pub fn count(&self, row: usize, col: usize) -> u64 {
        self.counts[row][col]
    }
}

pub fn normalize_confusion(matrix: &ConfusionMatrix) -> VisResult<NormalizedMatrix> {
    let max = matrix.max_count();
    if max == 0 {
        return Err(VisError::DegenerateMatrix {
            model: matrix.model_index,
        });
    }
    let counts = [
        [matrix.true_positive, matrix.false_negative],
        [matrix.false_positive, matrix.true_negative],
    ];
    let scale = |count: u64| count as f64 / max as f64;
    let grid = arr2(&[
        [scale(counts[0][0]), scale(counts[0][1])],
        [scale(counts[1][0]), scale(counts[1][1])],
    ]);
    Ok(NormalizedMatrix {
        model_index: matrix.model_index,
        max,
        grid,
        counts,
    })
}
