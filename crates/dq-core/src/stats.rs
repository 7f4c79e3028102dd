//! Order statistics shared by the outlier detector and the clipping
//! transformation, so both always agree on the same bounds.

/// Minimum numeric sample size for IQR-based bounds; below this the
/// computation is skipped rather than producing degenerate fences.
pub const MIN_IQR_SAMPLE: usize = 5;

/// Nearest-rank quantile: the value at zero-based index `floor(p * n)` of
/// the sorted slice, with no interpolation.
pub fn quantile_nearest_rank(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = (p * sorted.len() as f64).floor() as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

/// Arithmetic mean, None for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Nearest-rank median: the sorted value at index `floor(n / 2)`.
pub fn median_nearest_rank(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[sorted.len() / 2])
}

/// Tukey fences computed from nearest-rank quartiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute fences `[Q1 - k*iqr, Q3 + k*iqr]` over `values`.
    /// Returns None when fewer than [`MIN_IQR_SAMPLE`] values are given.
    pub fn compute(values: &[f64], k: f64) -> Option<Self> {
        if values.len() < MIN_IQR_SAMPLE {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile_nearest_rank(&sorted, 0.25)?;
        let q3 = quantile_nearest_rank(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - k * iqr,
            upper: q3 + k * iqr,
        })
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    /// Cap a value to the nearer fence.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rank_quartiles_for_one_to_ten() {
        // floor(0.25 * 10) = 2 -> 3, floor(0.75 * 10) = 7 -> 8 (zero-based).
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(quantile_nearest_rank(&sorted, 0.25), Some(3.0));
        assert_eq!(quantile_nearest_rank(&sorted, 0.75), Some(8.0));
    }

    #[test]
    fn upper_fence_uses_plus_form() {
        // For [1,2,3,4,5,100] with k=1.5 the value 100 must sit above the
        // upper fence.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let bounds = IqrBounds::compute(&values, 1.5).expect("enough values");
        assert!(bounds.upper > bounds.q3);
        assert!(bounds.is_outlier(100.0));
        assert!(!bounds.is_outlier(3.0));
    }

    #[test]
    fn too_few_values_yield_no_bounds() {
        assert!(IqrBounds::compute(&[1.0, 2.0, 3.0, 4.0], 1.5).is_none());
    }

    #[test]
    fn median_is_floor_n_over_two() {
        // n=4 -> index 2 of the sorted values.
        assert_eq!(median_nearest_rank(&[4.0, 1.0, 2.0, 3.0]), Some(3.0));
        assert_eq!(median_nearest_rank(&[5.0]), Some(5.0));
        assert_eq!(median_nearest_rank(&[]), None);
    }

    #[test]
    fn mean_of_mixed_values() {
        let m = mean(&[1.0, 2.0, 4.0]).expect("non-empty");
        assert!((m - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn clamp_caps_to_nearer_fence() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let bounds = IqrBounds::compute(&values, 1.5).expect("enough values");
        assert_eq!(bounds.clamp(100.0), bounds.upper);
        assert_eq!(bounds.clamp(bounds.lower - 10.0), bounds.lower);
        assert_eq!(bounds.clamp(3.0), 3.0);
    }
}
