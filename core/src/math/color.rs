use std::fmt;

/// Diverging eleven-step palette shared by every chart.
pub const PALETTE: [&str; 11] = [
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9",
    "#74add1", "#4575b4", "#313695",
];

pub const LABEL_POSITIVE_FILL: &str = PALETTE[0];
pub const LABEL_NEGATIVE_FILL: &str = PALETTE[10];
pub const MISCLASSIFIED_STROKE: &str = PALETTE[4];
pub const MUTED: &str = "#767678";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#rrggbb`, `#rgb`, `rgb(r, g, b)` and a few named colors.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(body) = value.strip_prefix("rgb(").and_then(|v| v.strip_suffix(')')) {
            let channels: Vec<u8> = body
                .split(',')
                .map(|c| c.trim().parse::<f64>().ok().map(|v| v.round().clamp(0.0, 255.0) as u8))
                .collect::<Option<Vec<_>>>()?;
            if let [r, g, b] = channels.as_slice() {
                return Some(Self { r: *r, g: *g, b: *b });
            }
            return None;
        }
        match value {
            "black" => Some(Self { r: 0, g: 0, b: 0 }),
            "white" => Some(Self { r: 255, g: 255, b: 255 }),
            "grey" | "gray" => Some(Self { r: 128, g: 128, b: 128 }),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Interpolates two colors in RGB space; unparseable endpoints fall back to `to`.
pub fn interpolate_rgb(from: &str, to: &str, t: f64) -> String {
    match (Rgb::parse(from), Rgb::parse(to)) {
        (Some(a), Some(b)) => a.lerp(&b, t.clamp(0.0, 1.0)).to_string(),
        _ => to.to_string(),
    }
}

/// Confusion-cell color ramp from light blue to deep blue.
pub fn cell_fill(normalized: f64) -> String {
    interpolate_rgb(PALETTE[6], PALETTE[10], normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_rgb_forms_agree() {
        assert_eq!(Rgb::parse("#313695"), Rgb::parse("rgb(49, 54, 149)"));
        assert_eq!(Rgb::parse("#fff"), Rgb::parse("white"));
        assert_eq!(Rgb::parse("tomato"), None);
    }

    #[test]
    fn cell_ramp_hits_both_ends() {
        assert_eq!(cell_fill(0.0), "rgb(224, 243, 248)");
        assert_eq!(cell_fill(1.0), "rgb(49, 54, 149)");
    }

    #[test]
    fn midpoint_is_rounded_per_channel() {
        assert_eq!(interpolate_rgb("#000000", "#ffffff", 0.5), "rgb(128, 128, 128)");
    }
}
