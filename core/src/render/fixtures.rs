//! Small shaped bundle shared by the render and section tests.

use crate::math::color::PALETTE;
use crate::prelude::VisConfig;
use crate::records::{
    ConfusionMatrix, Electrode, GridPosition, Label, Model, Predictions, RocPoint, SegmentRecord,
    TimeSeriesPoint,
};
use crate::render::build::{ModelView, SceneData};
use crate::scoring::normalize_confusion;

pub fn fixture() -> (VisConfig, SceneData) {
    let series = (0..5)
        .map(|i| TimeSeriesPoint {
            index: i,
            raw: i as f64 * 10.0,
            clean: i as f64 * 5.0,
        })
        .collect();
    let segments = (0..3)
        .map(|i| SegmentRecord {
            index: i,
            feature1: i as f64,
            feature2: -(i as f64),
            label: if i == 0 { Label::Positive } else { Label::Negative },
            predictions: Predictions {
                random_forest: Label::Positive,
                neural_net: Label::Positive,
                logistic_regression: Label::Negative,
                ensemble: Label::Positive,
            },
            layout: GridPosition {
                row: 0,
                col: i,
                x: i as f64 * 24.0,
                y: 0.0,
            },
            fill_color: PALETTE[10].to_string(),
        })
        .collect();
    let matrix = normalize_confusion(&ConfusionMatrix {
        model_index: 0,
        true_positive: 80,
        true_negative: 70,
        false_positive: 10,
        false_negative: 20,
    })
    .unwrap();
    let data = SceneData {
        electrode: Electrode::Tp9,
        series,
        segments,
        model: ModelView {
            model: Model::LogisticRegression,
            roc: vec![RocPoint { fpr: 0.0, tpr: 0.0 }, RocPoint { fpr: 1.0, tpr: 1.0 }],
            auc: 0.874,
            matrix,
        },
    };
    (VisConfig::default(), data)
}
