use std::collections::BTreeMap;

use crate::math::color::Rgb;
use crate::math::format::fmt_number;
use crate::scene::element::{AttrValue, ElementId};

/// One attribute interpolation in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub element: ElementId,
    pub attr: String,
    pub from: AttrValue,
    pub to: AttrValue,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Tween {
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn sample(&self, now_ms: u64) -> AttrValue {
        if now_ms >= self.end_ms() || self.duration_ms == 0 {
            return self.to.clone();
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        let t = self.ease.apply(elapsed / self.duration_ms as f64);
        interpolate(&self.from, &self.to, t)
    }
}

/// Attribute writes and element removals produced by one clock step.
#[derive(Debug, Default)]
pub struct Frame {
    pub updates: Vec<(ElementId, String, AttrValue)>,
    pub removals: Vec<ElementId>,
}

/// Clock plus the tweens and deferred removals it drives.
/// One tween per (element, attribute): the latest scheduled wins.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    now_ms: u64,
    tweens: BTreeMap<(ElementId, String), Tween>,
    removals: BTreeMap<ElementId, u64>,
}

impl Timeline {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.tweens.len() + self.removals.len()
    }

    pub fn schedule(&mut self, tween: Tween) {
        self.tweens
            .insert((tween.element, tween.attr.clone()), tween);
    }

    pub fn cancel(&mut self, element: ElementId, attr: &str) {
        self.tweens.remove(&(element, attr.to_string()));
    }

    pub fn cancel_element(&mut self, element: ElementId) {
        self.tweens.retain(|(id, _), _| *id != element);
        self.removals.remove(&element);
    }

    pub fn schedule_removal(&mut self, element: ElementId, due_ms: u64) {
        self.removals.insert(element, due_ms);
    }

    pub fn is_removal_pending(&self, element: ElementId) -> bool {
        self.removals.contains_key(&element)
    }

    pub fn advance(&mut self, delta_ms: u64) -> Frame {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        self.collect()
    }

    /// Jumps the clock to the end of the last pending tween or removal.
    pub fn finish(&mut self) -> Frame {
        let tween_end = self.tweens.values().map(Tween::end_ms).max();
        let removal_end = self.removals.values().copied().max();
        if let Some(end) = tween_end.into_iter().chain(removal_end).max() {
            self.now_ms = self.now_ms.max(end);
        }
        self.collect()
    }

    fn collect(&mut self) -> Frame {
        let now = self.now_ms;
        let mut frame = Frame::default();
        for tween in self.tweens.values() {
            if now >= tween.start_ms {
                frame
                    .updates
                    .push((tween.element, tween.attr.clone(), tween.sample(now)));
            }
        }
        self.tweens.retain(|_, tween| now < tween.end_ms());
        frame.removals = self
            .removals
            .iter()
            .filter(|(_, due)| now >= **due)
            .map(|(id, _)| *id)
            .collect();
        self.removals.retain(|_, due| now < *due);
        frame
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    CubicInOut,
    Linear,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Ease::CubicInOut => ease_cubic_in_out(t),
            Ease::Linear => t.clamp(0.0, 1.0),
        }
    }
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Interpolates numbers directly, colors in RGB and other strings by
/// tweening every number embedded in them.
pub fn interpolate(from: &AttrValue, to: &AttrValue, t: f64) -> AttrValue {
    if t >= 1.0 {
        return to.clone();
    }
    match (from, to) {
        (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(a + (b - a) * t),
        _ => {
            let a = from.render();
            let b = to.render();
            if let (Some(ca), Some(cb)) = (Rgb::parse(&a), Rgb::parse(&b)) {
                return AttrValue::Text(ca.lerp(&cb, t).to_string());
            }
            AttrValue::Text(interpolate_string(&a, &b, t))
        }
    }
}

#[derive(Debug, PartialEq)]
enum Piece<'a> {
    Literal(&'a str),
    Number(f64),
}

fn number_end(bytes: &[u8], start: usize) -> Option<usize> {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut i = start;
    if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
        i += 1;
    }
    let int_end = digits_from(i);
    let has_int = int_end > i;
    i = int_end;
    let mut has_frac = false;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_end = digits_from(i + 1);
        if frac_end > i + 1 {
            has_frac = true;
            i = frac_end;
        } else if has_int {
            i += 1;
        }
    }
    if !has_int && !has_frac {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'-' || bytes[j] == b'+') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    Some(i)
}

fn split_numbers(text: &str) -> Vec<Piece<'_>> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match number_end(bytes, i) {
            Some(end) => match text[i..end].parse::<f64>() {
                Ok(value) => {
                    if literal_start < i {
                        pieces.push(Piece::Literal(&text[literal_start..i]));
                    }
                    pieces.push(Piece::Number(value));
                    i = end;
                    literal_start = end;
                }
                Err(_) => i += 1,
            },
            None => i += 1,
        }
    }
    if literal_start < bytes.len() {
        pieces.push(Piece::Literal(&text[literal_start..]));
    }
    pieces
}

/// Pairs the numbers of `from` and `to` by position; the literal text of
/// `to` is kept and unmatched numbers of `to` are emitted as-is.
fn interpolate_string(from: &str, to: &str, t: f64) -> String {
    let start: Vec<f64> = split_numbers(from)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Number(value) => Some(value),
            Piece::Literal(_) => None,
        })
        .collect();
    let target = split_numbers(to);
    if start.is_empty() || !target.iter().any(|p| matches!(p, Piece::Number(_))) {
        return if t < 0.5 { from.to_string() } else { to.to_string() };
    }

    let mut out = String::with_capacity(to.len());
    let mut number_index = 0;
    for piece in target {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Number(value) => {
                let blended = match start.get(number_index) {
                    Some(a) => a + (value - a) * t,
                    None => value,
                };
                out.push_str(&fmt_number(blended));
                number_index += 1;
            }
        }
    }
    out
}
