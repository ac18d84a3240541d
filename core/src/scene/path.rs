//! SVG path-data builders.

use std::fmt::Write;

use crate::math::format::fmt_number;

/// Straight polyline through `points`: `M x,y L x,y ...`.
pub fn line_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{},{}", command, fmt_number(*x), fmt_number(*y));
    }
    d
}

pub fn polyline_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            (x1 - x0).hypot(y1 - y0)
        })
        .sum()
}

/// Uniform cubic B-spline through `points`, clamped at both ends.
pub fn basis_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    let Some(&(first_x, first_y)) = points.first() else {
        return d;
    };
    let _ = write!(d, "M{},{}", fmt_number(first_x), fmt_number(first_y));
    if points.len() == 1 {
        return d;
    }
    if points.len() == 2 {
        let (x, y) = points[1];
        let _ = write!(d, "L{},{}", fmt_number(x), fmt_number(y));
        return d;
    }

    let (mut x0, mut y0) = points[0];
    let (mut x1, mut y1) = points[1];
    line_to(&mut d, (5.0 * x0 + x1) / 6.0, (5.0 * y0 + y1) / 6.0);
    for &(x, y) in &points[2..] {
        bezier(&mut d, (x0, y0), (x1, y1), (x, y));
        x0 = x1;
        y0 = y1;
        x1 = x;
        y1 = y;
    }
    bezier(&mut d, (x0, y0), (x1, y1), (x1, y1));
    line_to(&mut d, x1, y1);
    d
}

fn line_to(d: &mut String, x: f64, y: f64) {
    let _ = write!(d, "L{},{}", fmt_number(x), fmt_number(y));
}

fn bezier(d: &mut String, p0: (f64, f64), p1: (f64, f64), p: (f64, f64)) {
    let coords = [
        (2.0 * p0.0 + p1.0) / 3.0,
        (2.0 * p0.1 + p1.1) / 3.0,
        (p0.0 + 2.0 * p1.0) / 3.0,
        (p0.1 + 2.0 * p1.1) / 3.0,
        (p0.0 + 4.0 * p1.0 + p.0) / 6.0,
        (p0.1 + 4.0 * p1.1 + p.1) / 6.0,
    ];
    let joined: Vec<String> = coords.iter().map(|c| fmt_number(*c)).collect();
    let _ = write!(d, "C{}", joined.join(","));
}
