pub struct StatsHelper;

impl StatsHelper {
    /// Rounds half-to-even at `decimals` places, as numpy's `round` does.
    pub fn round_dp(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round_ties_even() / factor
    }

    /// Scales non-negative weights so they sum to one.
    pub fn normalize(weights: &[f64]) -> Option<Vec<f64>> {
        let total: f64 = weights.iter().sum();
        if total.is_nan() || total <= 0.0 || weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return None;
        }
        Some(weights.iter().map(|w| w / total).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_dp_uses_bankers_rounding() {
        assert_eq!(StatsHelper::round_dp(0.125, 2), 0.12);
        assert_eq!(StatsHelper::round_dp(0.675, 1), 0.7);
        assert_eq!(StatsHelper::round_dp(0.3349, 2), 0.33);
    }

    #[test]
    fn normalize_rejects_empty_mass() {
        assert_eq!(StatsHelper::normalize(&[3.0, 1.0]), Some(vec![0.75, 0.25]));
        assert_eq!(StatsHelper::normalize(&[0.0, 0.0]), None);
        assert_eq!(StatsHelper::normalize(&[-1.0, 2.0]), None);
    }
}
