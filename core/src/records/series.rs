use serde::{Deserialize, Serialize};

/// One sample of the selected electrode. `index` is the ordinal position, not wall time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub index: usize,
    pub raw: f64,
    pub clean: f64,
}
