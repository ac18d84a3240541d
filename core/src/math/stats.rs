pub struct StatsHelper;

impl StatsHelper {
    /// Mean of the finite values; `None` when there are none.
    pub fn mean(samples: &[f64]) -> Option<f64> {
        let (sum, count) = samples
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Minimum and maximum of the finite values.
    pub fn extent(samples: &[f64]) -> Option<(f64, f64)> {
        samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_sequence_is_none() {
        assert_eq!(StatsHelper::mean(&[]), None);
        assert_eq!(StatsHelper::mean(&[f64::NAN]), None);
    }

    #[test]
    fn mean_skips_non_finite_values() {
        assert_eq!(StatsHelper::mean(&[2.0, f64::NAN, 4.0]), Some(3.0));
    }

    #[test]
    fn extent_tracks_both_ends() {
        assert_eq!(StatsHelper::extent(&[3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(StatsHelper::extent(&[4.0]), Some((4.0, 4.0)));
        assert_eq!(StatsHelper::extent(&[]), None);
    }
}
