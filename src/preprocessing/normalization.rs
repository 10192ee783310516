//! Series normalization utilities

/// Min-max normalize a series into `[0, 1)`
///
/// `epsilon` is added to the range so a constant series maps to all zeros
/// instead of dividing by zero. An empty input yields an empty output.
///
/// # Example
///
/// ```
/// use vidproof::preprocessing::normalization::min_max_normalize;
///
/// let out = min_max_normalize(&[2.0, 4.0, 6.0], 1e-6);
/// assert_eq!(out[0], 0.0);
/// assert!((out[2] - 1.0).abs() < 1e-5);
/// ```
pub fn min_max_normalize(values: &[f64], epsilon: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min + epsilon;

    values.iter().map(|&v| (v - min) / range).collect()
}
