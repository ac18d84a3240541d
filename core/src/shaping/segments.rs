use crate::math::color::{LABEL_NEGATIVE_FILL, LABEL_POSITIVE_FILL};
use crate::prelude::{VisConfig, VisResult};
use crate::records::{GridPosition, Label, Predictions, Row, SegmentRecord};
use crate::shaping::fields::{parse_float, parse_label};

/// Fixed-width grid used to lay out every segment as a marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub row_width: f64,
    pub footprint: f64,
}

impl GridLayout {
    pub fn new(row_width: f64, footprint: f64) -> Self {
        Self {
            row_width,
            footprint,
        }
    }

    pub fn from_config(config: &VisConfig) -> Self {
        Self::new(config.width, config.segment_footprint())
    }

    /// `floor(W / F)`, never less than one so a narrow row still advances.
    pub fn items_per_row(&self) -> usize {
        if self.footprint <= 0.0 {
            return 1;
        }
        ((self.row_width / self.footprint).floor() as usize).max(1)
    }

    pub fn position(&self, index: usize) -> GridPosition {
        let per_row = self.items_per_row();
        let col = index % per_row;
        let row = index / per_row;
        GridPosition {
            row,
            col,
            x: col as f64 * self.footprint,
            y: row as f64 * self.footprint,
        }
    }
}

fn fill_for(label: Label) -> &'static str {
    match label {
        Label::Positive => LABEL_POSITIVE_FILL,
        Label::Negative => LABEL_NEGATIVE_FILL,
    }
}

/// Parses the segment table and attaches fill color and grid placement.
pub fn build_segments(rows: &[Row], layout: GridLayout) -> VisResult<Vec<SegmentRecord>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let label = parse_label(row, "label", index)?;
            let predictions = Predictions {
                random_forest: parse_label(row, "rf", index)?,
                neural_net: parse_label(row, "nn", index)?,
                logistic_regression: parse_label(row, "logreg", index)?,
                ensemble: parse_label(row, "ensemble", index)?,
            };
            Ok(SegmentRecord {
                index,
                feature1: parse_float(row, "feature1", index)?,
                feature2: parse_float(row, "feature2", index)?,
                label,
                predictions,
                layout: layout.position(index),
                fill_color: fill_for(label).to_string(),
            })
        })
        .collect()
}
