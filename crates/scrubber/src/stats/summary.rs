//! Descriptive statistics over the non-missing values of a numeric column.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Deviation sums below this are treated as floating-point noise.
const FP_NOISE: f64 = 1e-14;

/// Statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator). `None` below two values.
    pub std: Option<f64>,
    pub median: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Adjusted Fisher-Pearson skewness. `None` below three values.
    pub skewness: Option<f64>,
}

impl NumericSummary {
    /// Summarize a slice of values. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;

        let (m2, m3) = sorted.iter().fold((0.0, 0.0), |(m2, m3), &x| {
            let d = x - mean;
            (m2 + d * d, m3 + d * d * d)
        });

        let std = (count >= 2).then(|| (m2 / (n - 1.0)).sqrt());
        let skewness = (count >= 3).then(|| adjusted_skewness(n, m2, m3));

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            std,
            median: quantile(&sorted, 0.5),
            q1: quantile(&sorted, 0.25),
            q3: quantile(&sorted, 0.75),
            skewness,
        })
    }

    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Inclusive fences `[q1 - k*iqr, q3 + k*iqr]`.
    pub fn iqr_bounds(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }

    /// Check if a value is an outlier using the IQR method.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.iqr_bounds(multiplier);
        value < lower || value > upper
    }

    /// Calculate the z-score for a value.
    ///
    /// `None` when the standard deviation is zero or undefined.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        match self.std {
            Some(std) if std > 0.0 => Some((value - self.mean) / std),
            _ => None,
        }
    }
}

/// G1 = n * sqrt(n-1) / (n-2) * m3 / m2^1.5, where `m2` and `m3` are the
/// sums of squared and cubed deviations from the mean.
fn adjusted_skewness(n: f64, m2: f64, m3: f64) -> f64 {
    if m2.abs() < FP_NOISE {
        return 0.0;
    }
    let m3 = if m3.abs() < FP_NOISE { 0.0 } else { m3 };
    n * (n - 1.0).sqrt() / (n - 2.0) * m3 / m2.powf(1.5)
}

/// Linearly interpolated quantile of sorted data, `h = (n - 1) * p`.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let h = (len - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quartiles_match_linear_interpolation() {
        let s = NumericSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 1000.0]).unwrap();
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.iqr(), 2.0);
        assert_eq!(s.iqr_bounds(1.5), (-1.0, 7.0));
        assert!(s.is_outlier_iqr(1000.0, 1.5));
        assert!(!s.is_outlier_iqr(7.0, 1.5));
    }

    #[test]
    fn test_interpolated_quantile() {
        assert!(approx(quantile(&[1.0, 2.0, 3.0, 4.0], 0.25), 1.75));
        assert!(approx(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), 2.5));
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_sample_std() {
        let s = NumericSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(approx(s.mean, 5.0));
        assert!(approx(s.std.unwrap(), (32.0_f64 / 7.0).sqrt()));
        assert!(NumericSummary::from_values(&[1.0]).unwrap().std.is_none());
    }

    #[test]
    fn test_skewness() {
        // Symmetric data has zero skew.
        let s = NumericSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(approx(s.skewness.unwrap(), 0.0));

        // Reference value for [1, 2, 3, 4, 1000]: 2.23603...
        let s = NumericSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 1000.0]).unwrap();
        assert!((s.skewness.unwrap() - 2.236_032_9).abs() < 1e-6);

        // Constant column: zero variance, zero skew.
        let s = NumericSummary::from_values(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(s.skewness, Some(0.0));

        // Too few values.
        let s = NumericSummary::from_values(&[1.0, 5.0]).unwrap();
        assert!(s.skewness.is_none());
    }

    #[test]
    fn test_noise_cutoff_applies_to_sums() {
        // Sum of squares is 9e-10, its mean 9e-15: only the sum clears the cutoff.
        let mut values = vec![0.0; 99_999];
        values.push(3e-5);
        let s = NumericSummary::from_values(&values).unwrap();
        assert!((s.skewness.unwrap() - 316.227_766).abs() < 1e-3);
    }

    #[test]
    fn test_z_score() {
        let s = NumericSummary::from_values(&[1.0, 2.0, 3.0]).unwrap();
        assert!(approx(s.z_score(3.0).unwrap(), 1.0));

        let flat = NumericSummary::from_values(&[4.0, 4.0]).unwrap();
        assert!(flat.z_score(4.0).is_none());
    }

    #[test]
    fn test_empty() {
        assert!(NumericSummary::from_values(&[]).is_none());
    }
}
