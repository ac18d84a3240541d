use crate::prelude::VisResult;
use crate::records::{Electrode, Row, TimeSeriesPoint};
use crate::shaping::fields::parse_float;

/// Extracts the raw/clean pair of `electrode` from every wide-format row.
pub fn build_time_series(rows: &[Row], electrode: Electrode) -> VisResult<Vec<TimeSeriesPoint>> {
    let raw_column = electrode.raw_column();
    let clean_column = electrode.clean_column();

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            Ok(TimeSeriesPoint {
                index,
                raw: parse_float(row, &raw_column, index)?,
                clean: parse_float(row, &clean_column, index)?,
            })
        })
        .collect()
}
