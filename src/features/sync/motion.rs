//! Frame-to-frame visual motion

use crate::error::ScorerError;
use crate::io::media::{Frame, FrameSequence};

/// Mean absolute difference over every channel of two equally sized frames
pub fn mean_abs_difference(a: &Frame, b: &Frame) -> Result<f64, ScorerError> {
    if a.dimensions() != b.dimensions() {
        return Err(ScorerError::InvalidInput(format!(
            "Cannot diff {}x{} against {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }

    let (pa, pb) = (a.as_raw(), b.as_raw());
    if pa.is_empty() {
        return Ok(0.0);
    }

    let total: u64 = pa
        .iter()
        .zip(pb.iter())
        .map(|(&x, &y)| x.abs_diff(y) as u64)
        .sum();
    Ok(total as f64 / pa.len() as f64)
}

/// Motion series over the full, unsampled sequence
///
/// One value per consecutive frame pair, so `len() - 1` values.
pub fn motion_series(frames: &FrameSequence) -> Result<Vec<f64>, ScorerError> {
    frames
        .frames()
        .windows(2)
        .map(|pair| mean_abs_difference(&pair[0], &pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_abs_difference_does_not_wrap() {
        let a = RgbImage::from_pixel(2, 2, Rgb([10, 10, 10]));
        let b = RgbImage::from_pixel(2, 2, Rgb([250, 10, 10]));
        // 240 on one channel of three
        assert!((mean_abs_difference(&a, &b).unwrap() - 80.0).abs() < 1e-12);
        assert_eq!(mean_abs_difference(&a, &b), mean_abs_difference(&b, &a));
    }

    #[test]
    fn test_series_length() {
        let frames: Vec<RgbImage> = (0..5)
            .map(|i| RgbImage::from_pixel(3, 3, Rgb([i * 10, 0, 0])))
            .collect();
        let seq = FrameSequence::new(frames).unwrap();
        let series = motion_series(&seq).unwrap();
        assert_eq!(series.len(), 4);
        assert!(series.iter().all(|&m| (m - 10.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_short_sequences() {
        assert!(motion_series(&FrameSequence::default()).unwrap().is_empty());
        let one = FrameSequence::new(vec![RgbImage::new(2, 2)]).unwrap();
        assert!(motion_series(&one).unwrap().is_empty());
    }
}
