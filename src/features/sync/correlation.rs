//! Pearson correlation

use crate::error::ScorerError;

/// Pearson correlation coefficient of two equally long series
///
/// # Errors
///
/// - `ScorerError::InvalidInput` if the lengths differ or fewer than two
///   points are given
/// - `ScorerError::NumericalError` if either series has zero variance or the
///   result is not finite
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64, ScorerError> {
    if a.len() != b.len() {
        return Err(ScorerError::InvalidInput(format!(
            "Series lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.len() < 2 {
        return Err(ScorerError::InvalidInput(format!(
            "Need at least 2 points for correlation, got {}",
            a.len()
        )));
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Err(ScorerError::NumericalError(
            "Correlation undefined for a zero-variance series".to_string(),
        ));
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    if !r.is_finite() {
        return Err(ScorerError::NumericalError(format!(
            "Correlation is not finite: {}",
            r
        )));
    }

    // Rounding can push |r| a hair past 1
    Ok(r.clamp(-1.0, 1.0))
}
