//! Facial stability analyzer
//!
//! Measures how consistent detected face sizes are within each sampled frame.
//!
//! Algorithm:
//! 1. Take every `stride`-th frame and convert it to grayscale
//! 2. Run the face detector
//! 3. For frames with at least one face, score `1 - std(areas) / mean(areas)`
//!    (frames whose mean area is 0 are skipped)
//! 4. Average the per-frame scores
//!
//! A frame sequence where no sampled frame yields a score has no measurement;
//! the public boundary turns that into the neutral score.

use super::detector::FaceDetector;
use crate::error::ScorerError;
use crate::features::stats;
use crate::io::media::FrameSequence;
use crate::preprocessing::grayscale::to_grayscale;

/// Compute the facial stability score
///
/// # Errors
///
/// - `ScorerError::ProcessingError` if no sampled frame produced a score
///   (no faces anywhere, or only zero-area boxes)
/// - Any error returned by the detector
pub fn measure_facial_stability<D: FaceDetector + ?Sized>(
    frames: &FrameSequence,
    detector: &D,
    stride: usize,
) -> Result<f64, ScorerError> {
    let mut frame_scores = Vec::new();
    let mut sampled = 0usize;
    let mut frames_with_faces = 0usize;

    for (index, frame) in frames.sampled(stride) {
        sampled += 1;
        let gray = to_grayscale(frame);
        let boxes = detector.detect(&gray)?;

        if boxes.is_empty() {
            continue;
        }
        frames_with_faces += 1;

        let areas: Vec<f64> = boxes.iter().map(|b| b.area()).collect();
        match stats::consistency(&areas) {
            Some(score) => {
                log::debug!(
                    "Frame {}: {} faces, area consistency {:.4}",
                    index,
                    boxes.len(),
                    score
                );
                frame_scores.push(score);
            }
            None => log::debug!("Frame {}: zero mean face area, skipped", index),
        }
    }

    log::debug!(
        "Facial stability: {} sampled frames, {} with faces, {} scored",
        sampled,
        frames_with_faces,
        frame_scores.len()
    );

    stats::mean(&frame_scores).ok_or_else(|| {
        ScorerError::ProcessingError(format!(
            "No usable face measurement in {} sampled frames",
            sampled
        ))
    })
}
