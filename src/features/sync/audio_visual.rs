//! Audio-visual correlation analyzer
//!
//! Speech and on-screen movement normally rise and fall together. A clip whose
//! motion is unrelated to its audio energy is suspicious.
//!
//! Algorithm:
//! 1. Audio energy: channel-averaged magnitude per sample frame
//! 2. Visual motion: mean absolute difference of every consecutive frame pair
//!    over the full sequence (no sampling)
//! 3. Min-max normalize both series (epsilon-guarded)
//! 4. Truncate the energy series to the motion length (alignment is by
//!    position, not by timestamp)
//! 5. Score is `|pearson(energy, motion)|`
//!
//! Missing audio is not an error: the caller gets `AudioVisualMeasurement::NoAudio`
//! and reports the neutral score without attempting a measurement.

use super::correlation::pearson;
use super::motion::motion_series;
use crate::error::ScorerError;
use crate::io::media::{AudioTrack, FrameSequence};
use crate::preprocessing::channel_mixer::channel_mean_magnitude;
use crate::preprocessing::normalization::min_max_normalize;

/// Outcome of the audio-visual measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioVisualMeasurement {
    /// No audio track; nothing was measured
    NoAudio,
    /// Absolute correlation between audio energy and motion
    Correlation(f64),
}

/// Correlate audio energy against visual motion
///
/// # Errors
///
/// - `ScorerError::ProcessingError` for fewer than two frames, an empty
///   audio track, or audio shorter than the motion series
/// - `ScorerError::NumericalError` if the correlation is undefined
///   (for example a static clip with zero motion everywhere)
pub fn measure_audio_visual_sync(
    frames: &FrameSequence,
    audio: Option<&AudioTrack>,
    epsilon: f64,
) -> Result<AudioVisualMeasurement, ScorerError> {
    let audio = match audio {
        Some(a) => a,
        None => return Ok(AudioVisualMeasurement::NoAudio),
    };

    let energy = channel_mean_magnitude(audio);
    if energy.is_empty() {
        return Err(ScorerError::ProcessingError(
            "Audio track contains no samples".to_string(),
        ));
    }

    let motion = motion_series(frames)?;
    if motion.is_empty() {
        return Err(ScorerError::ProcessingError(format!(
            "Need at least 2 frames for motion, got {}",
            frames.len()
        )));
    }

    let energy = min_max_normalize(&energy, epsilon);
    let motion = min_max_normalize(&motion, epsilon);

    if energy.len() < motion.len() {
        return Err(ScorerError::ProcessingError(format!(
            "Audio series ({} samples) shorter than motion series ({} pairs)",
            energy.len(),
            motion.len()
        )));
    }
    let aligned = &energy[..motion.len()];

    log::debug!(
        "Audio-visual sync: {} motion values against {} of {} energy values",
        motion.len(),
        aligned.len(),
        energy.len()
    );

    let r = pearson(aligned, &motion)?;
    Ok(AudioVisualMeasurement::Correlation(r.abs()))
}
