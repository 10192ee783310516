//! Descriptive statistics shared by the analyzers

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`), `None` for an empty slice
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// `1 - std_dev / mean`, the dispersion-to-mean consistency used by the
/// facial and spectral analyzers
///
/// Returns `None` when the slice is empty or the mean is not strictly
/// positive and finite.
pub fn consistency(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if !m.is_finite() || m <= 0.0 {
        return None;
    }
    let sd = std_dev(values)?;
    Some(1.0 - sd / m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert_eq!(std_dev(&v), Some(2.0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(consistency(&[]), None);
    }

    #[test]
    fn test_consistency() {
        assert_eq!(consistency(&[1000.0, 1000.0]), Some(1.0));
        // mean 5, std 2
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((consistency(&v).unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(consistency(&[0.0, 0.0]), None);
        assert_eq!(consistency(&[-1.0, -3.0]), None);
    }
}
