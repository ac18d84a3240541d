use std::f64::consts::PI;

/// Alpha-dominated EEG-like waveform in microvolts: a 10 Hz carrier with a
/// weaker 22 Hz beta component, sampled at `rate_hz`.
pub fn eeg_wave(length: usize, rate_hz: f64, phase: f64) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let t = i as f64 / rate_hz;
            30.0 * (2.0 * PI * 10.0 * t + phase).sin() + 12.0 * (2.0 * PI * 22.0 * t + 2.0 * phase).sin()
        })
        .collect()
}

pub fn sigmoid(value: f64) -> f64 {
    1.0 / (1.0 + (-value).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_stays_within_component_amplitudes() {
        let wave = eeg_wave(512, 256.0, 0.3);
        assert_eq!(wave.len(), 512);
        assert!(wave.iter().all(|v| v.abs() <= 42.0));
    }

    #[test]
    fn sigmoid_is_centered_at_zero() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(6.0) > 0.99);
    }
}
