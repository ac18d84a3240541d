//! Number formatting for attribute values and labels.

/// Compact attribute formatting: integers print without a fraction,
/// everything else keeps at most six decimals.
pub fn fmt_number(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats `value` to `precision` significant digits, switching to
/// exponent notation for very large or very small magnitudes.
pub fn to_precision(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };
    if exponent < -6 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}

/// AUC caption, e.g. `0.874` -> `87%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// Axis tick label with as many decimals as the tick step needs.
pub fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step.abs() >= 1.0 || step == 0.0 || !step.is_finite() {
        0
    } else {
        (-step.abs().log10() - 1e-9).ceil().max(0.0) as usize
    };
    let label = format!("{:.*}", decimals, value);
    if label.starts_with('-') && label.trim_start_matches(['-', '0', '.']).is_empty() {
        label.trim_start_matches('-').to_string()
    } else {
        label
    }
}
