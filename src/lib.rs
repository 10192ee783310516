//! # Vidproof
//!
//! A forensic consistency scorer for video, producing an authenticity score
//! and a "Real" / "Likely Deepfake" verdict from three independent signals.
//!
//! ## Features
//!
//! - **Facial Stability**: Consistency of detected face areas across sampled frames
//! - **Spectral Regularity**: Dispersion of the 2D log-magnitude spectrum per frame
//! - **Audio-Visual Correlation**: Audio energy against frame-to-frame motion
//! - **Fusion**: Weighted score, verdict, confidence and per-component anomalies
//!
//! ## Quick Start
//!
//! ```no_run
//! use vidproof::{score_video, NoFaceDetector, ScoringConfig};
//!
//! let report = score_video("clip.mp4", NoFaceDetector, ScoringConfig::default())?;
//!
//! println!("Score: {:.3} ({})", report.final_score, report.interpretation.verdict);
//! println!("Anomalies: {:?}", report.interpretation.anomalies);
//! # Ok::<(), vidproof::ScorerError>(())
//! ```
//!
//! ## Architecture
//!
//! The scoring pipeline follows this flow:
//!
//! ```text
//! Media Source → Decode → Feature Extraction (facial, spectral, sync) → Fusion → Report
//! ```
//!
//! Video files are decoded by the `ffmpeg`/`ffprobe` executables; image
//! sequences and audio files are decoded in-process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::metadata::{DegradedComponent, ScoringMetadata};
pub use analysis::result::{Component, Interpretation, ScoreBundle, ScoreReport, Verdict};
pub use analysis::scorer::Scorer;
pub use config::{DecodeOptions, FusionWeights, ScoringConfig};
pub use error::ScorerError;
pub use features::facial::{FaceBox, FaceDetector, NoFaceDetector};
#[cfg(feature = "opencv")]
pub use features::facial::HaarCascadeDetector;
pub use io::{
    AudioTrack, DecodedMedia, FfmpegSource, Frame, FrameDirectorySource, FrameSequence,
    MediaSource,
};

/// Score a video file
///
/// Decodes `path` with FFmpeg (all frames, first audio stream if any) and runs
/// the full scoring pipeline.
///
/// # Arguments
///
/// * `path` - Video file readable by FFmpeg
/// * `detector` - Face detection backend (`NoFaceDetector` for none)
/// * `config` - Scoring configuration
///
/// # Errors
///
/// - `ScorerError::InvalidInput` if `config` is invalid
/// - `ScorerError::SourceUnavailable` if the file or FFmpeg is missing
/// - `ScorerError::DecodingError` if the streams cannot be decoded
///
/// Analyzer failures never surface here; they fall back to the neutral score.
///
/// # Example
///
/// ```no_run
/// use vidproof::{score_video, NoFaceDetector, ScoringConfig};
///
/// let report = score_video("interview.mov", NoFaceDetector, ScoringConfig::default())?;
/// println!("{}", report.to_json()?);
/// # Ok::<(), vidproof::ScorerError>(())
/// ```
pub fn score_video<D: FaceDetector>(
    path: impl AsRef<std::path::Path>,
    detector: D,
    config: ScoringConfig,
) -> Result<ScoreReport, ScorerError> {
    let scorer = Scorer::new(detector, config)?;
    scorer.score(&FfmpegSource::new(path.as_ref()))
}
