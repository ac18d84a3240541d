/// Continuous linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain from an optional extent, falling back to `[0, 1]` for empty data.
    pub fn from_extent(extent: Option<(f64, f64)>, range: (f64, f64)) -> Self {
        Self::new(extent.unwrap_or((0.0, 1.0)), range)
    }

    /// A collapsed domain maps everything onto the middle of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round-number ticks spanning the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    pub fn tick_step(&self, count: usize) -> f64 {
        let (lo, hi) = ordered(self.domain.0, self.domain.1);
        let increment = tick_increment(lo, hi, count);
        if increment < 0.0 {
            -1.0 / increment
        } else {
            increment
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Nice tick values between `start` and `stop`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = ordered(start, stop);
    let step = tick_increment(lo, hi, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let mut values: Vec<f64> = if step > 0.0 {
        let first = (lo / step).ceil();
        let last = (hi / step).floor();
        let n = (last - first + 1.0).ceil().max(0.0) as usize;
        (0..n).map(|i| (first + i as f64) * step).collect()
    } else {
        let inverse = -step;
        let first = (lo * inverse).ceil();
        let last = (hi * inverse).floor();
        let n = (last - first + 1.0).ceil().max(0.0) as usize;
        (0..n).map(|i| (first + i as f64) / inverse).collect()
    };
    if reverse {
        values.reverse();
    }
    values
}

/// Ordinal scale dividing a range into equal bands with padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    padding: f64,
    step: f64,
    start: f64,
}

impl BandScale {
    /// `padding` applies to both inner and outer gaps; bands are centered.
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (lo, hi) = ordered(range.0, range.1);
        let n = count as f64;
        let step = (hi - lo) / (n - padding + padding * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding)) * 0.5;
        Self {
            count,
            padding,
            step,
            start,
        }
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        if index < self.count {
            Some(self.start + self.step * index as f64)
        } else {
            None
        }
    }

    pub fn bandwidth(&self) -> f64 {
        self.step * (1.0 - self.padding)
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}
