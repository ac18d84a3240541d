pub mod confusion;
pub mod options;
pub mod roc;
pub mod segment;
pub mod series;

pub use confusion::ConfusionMatrix;
pub use options::{Electrode, Model};
pub use roc::{RocCurve, RocPoint, RocTable};
pub use segment::{GridPosition, Label, Predictions, SegmentRecord};
pub use series::TimeSeriesPoint;

use std::collections::BTreeMap;

/// One tabular input row, keyed by column name.
pub type Row = BTreeMap<String, String>;
