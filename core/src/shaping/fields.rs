use crate::prelude::{VisError, VisResult};
use crate::records::{Label, Row};

fn raw_field<'a>(row: &'a Row, field: &str, index: usize) -> VisResult<&'a str> {
    row.get(field)
        .map(|value| value.trim())
        .ok_or_else(|| VisError::MissingField {
            field: field.to_string(),
            row: index,
        })
}

fn malformed(field: &str, index: usize, value: &str) -> VisError {
    VisError::DataParse {
        field: field.to_string(),
        row: index,
        value: value.to_string(),
    }
}

/// Reads a finite float from `row[field]`.
pub fn parse_float(row: &Row, field: &str, index: usize) -> VisResult<f64> {
    let value = raw_field(row, field, index)?;
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(malformed(field, index, value)),
    }
}

/// Largest count accepted; every count up to it is exact as `f64` and
/// four of them sum without overflow.
pub const MAX_COUNT: u64 = 1 << 53;

/// Reads a non-negative integer count; integral floats such as `"80.0"` are accepted.
pub fn parse_count(row: &Row, field: &str, index: usize) -> VisResult<u64> {
    let value = raw_field(row, field, index)?;
    if let Ok(count) = value.parse::<u64>() {
        return if count <= MAX_COUNT {
            Ok(count)
        } else {
            Err(malformed(field, index, value))
        };
    }
    match value.parse::<f64>() {
        Ok(parsed)
            if parsed.is_finite()
                && parsed >= 0.0
                && parsed.fract() == 0.0
                && parsed <= MAX_COUNT as f64 =>
        {
            Ok(parsed as u64)
        }
        _ => Err(malformed(field, index, value)),
    }
}

/// Reads a binary class label (`0` or `1`).
pub fn parse_label(row: &Row, field: &str, index: usize) -> VisResult<Label> {
    let value = raw_field(row, field, index)?;
    value
        .parse::<f64>()
        .ok()
        .and_then(Label::from_value)
        .ok_or_else(|| malformed(field, index, value))
}
