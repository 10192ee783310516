//! Spectral regularity analyzer
//!
//! Synthetic and heavily re-encoded imagery tends to have an unusual spread of
//! spectral energy (missing high-frequency detail, periodic upsampling
//! artifacts). The dispersion-to-mean ratio of the log-magnitude spectrum is a
//! cheap global proxy for that spread.
//!
//! Algorithm, per sampled frame:
//! 1. Grayscale, 2D FFT, shift DC to the centre
//! 2. `spectrum = ln(|F| + 1)`
//! 3. `score = 1 - std(spectrum) / mean(spectrum)`
//!
//! Frames whose log-spectrum mean is not strictly positive (a uniform black
//! frame has an all-zero spectrum) are skipped rather than producing an
//! undefined ratio. The result is the mean over the remaining frames.

use super::fft2d::Fft2d;
use crate::error::ScorerError;
use crate::features::stats;
use crate::io::media::FrameSequence;
use crate::preprocessing::grayscale::to_grayscale;

/// Regularity score of a single grayscale frame
///
/// Returns `Ok(None)` when the spectrum mean is not strictly positive.
pub fn frame_regularity(fft: &Fft2d, gray: &image::GrayImage) -> Result<Option<f64>, ScorerError> {
    let spectrum = fft.log_magnitude_spectrum(gray)?;
    Ok(stats::consistency(&spectrum))
}

/// Compute the spectral regularity score
///
/// # Errors
///
/// - `ScorerError::ProcessingError` if the sequence is empty or every sampled
///   frame had a degenerate spectrum
pub fn measure_spectral_regularity(
    frames: &FrameSequence,
    stride: usize,
) -> Result<f64, ScorerError> {
    let (width, height) = frames
        .dimensions()
        .ok_or_else(|| ScorerError::ProcessingError("No frames to analyze".to_string()))?;
    let fft = Fft2d::new(width as usize, height as usize)?;

    let mut frame_scores = Vec::new();
    let mut skipped = 0usize;

    for (index, frame) in frames.sampled(stride) {
        let gray = to_grayscale(frame);
        match frame_regularity(&fft, &gray)? {
            Some(score) => {
                log::debug!("Frame {}: spectral regularity {:.4}", index, score);
                frame_scores.push(score);
            }
            None => {
                skipped += 1;
                log::debug!("Frame {}: non-positive log-spectrum mean, skipped", index);
            }
        }
    }

    log::debug!(
        "Spectral regularity: {} frames scored, {} skipped",
        frame_scores.len(),
        skipped
    );

    stats::mean(&frame_scores).ok_or_else(|| {
        ScorerError::ProcessingError(format!(
            "All {} sampled frames had a degenerate spectrum",
            skipped
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn textured(width: u32, height: u32, seed: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 31 + y * 17 + seed * 7) % 251) as u8;
            Rgb([v, v.wrapping_mul(3), v / 2])
        })
    }

    #[test]
    fn test_black_frames_have_no_measurement() {
        let frames = FrameSequence::new(vec![RgbImage::new(16, 16); 20]).unwrap();
        assert!(measure_spectral_regularity(&frames, 10).is_err());
    }

    #[test]
    fn test_empty_sequence() {
        let frames = FrameSequence::default();
        assert!(matches!(
            measure_spectral_regularity(&frames, 10),
            Err(ScorerError::ProcessingError(_))
        ));
    }

    #[test]
    fn test_flat_gray_frame_value() {
        // Only the DC bin is non-zero: spectrum = [ln(N*v + 1), 0, 0, ...]
        let fft = Fft2d::new(4, 4).unwrap();
        let gray = GrayImage::from_pixel(4, 4, Luma([10]));
        let score = frame_regularity(&fft, &gray).unwrap().unwrap();

        let dc = (160.0f64 + 1.0).ln();
        let mut spectrum = vec![0.0; 16];
        spectrum[0] = dc;
        let expected = 1.0 - stats::std_dev(&spectrum).unwrap() / stats::mean(&spectrum).unwrap();
        assert!((score - expected).abs() < 1e-9);
        // sqrt(15) dispersion on 16 bins pushes the ratio negative
        assert!(score < 0.0);
    }

    #[test]
    fn test_textured_frames_scored_and_bounded() {
        let frames = FrameSequence::new((0..30).map(|i| textured(32, 24, i)).collect()).unwrap();
        let score = measure_spectral_regularity(&frames, 10).unwrap();
        assert!(score.is_finite());
        assert!(score <= 1.0);
    }

    #[test]
    fn test_black_frames_do_not_dilute_mean() {
        let mut raw: Vec<RgbImage> = (0..20).map(|i| textured(16, 16, i)).collect();
        raw[10] = RgbImage::new(16, 16);
        let with_black = FrameSequence::new(raw).unwrap();
        let only_first = FrameSequence::new(vec![textured(16, 16, 0)]).unwrap();

        let a = measure_spectral_regularity(&with_black, 10).unwrap();
        let b = measure_spectral_regularity(&only_first, 10).unwrap();
        assert!((a - b).abs() < 1e-12);
    }
}
