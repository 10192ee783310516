//! Scoring entry point
//!
//! `Scorer` decodes a media source, runs the three analyzers and fuses their
//! results into a `ScoreReport`.
//!
//! Only decoding failures abort a run. An analyzer that cannot produce a
//! measurement (no faces, degenerate spectra, no audio, undefined correlation)
//! contributes the neutral score instead and is listed in
//! `metadata.degraded`.

use super::fusion::fuse;
use super::metadata::{DegradedComponent, ScoringMetadata};
use super::result::{Component, ScoreBundle, ScoreReport};
use crate::config::ScoringConfig;
use crate::error::ScorerError;
use crate::features::facial::{measure_facial_stability, FaceDetector};
use crate::features::spectral::measure_spectral_regularity;
use crate::features::sync::{measure_audio_visual_sync, AudioVisualMeasurement};
use crate::io::media::{DecodedMedia, MediaSource};
use crate::preprocessing::sampling::sampled_count;
use std::time::Instant;

/// Result of one analyzer after failures have been settled
#[derive(Debug, Clone)]
struct ComponentOutcome {
    score: f64,
    degraded: Option<String>,
}

impl ComponentOutcome {
    fn settle(component: Component, result: Result<f64, ScorerError>, neutral: f64) -> Self {
        match result {
            Ok(score) => Self {
                score,
                degraded: None,
            },
            Err(e) => {
                log::warn!("{} analysis unavailable, using neutral score: {}", component, e);
                Self {
                    score: neutral,
                    degraded: Some(e.to_string()),
                }
            }
        }
    }
}

/// Media consistency scorer
///
/// # Example
///
/// ```
/// use vidproof::{DecodedMedia, FrameSequence, NoFaceDetector, Scorer, ScoringConfig};
/// use image::RgbImage;
///
/// let frames = FrameSequence::new(vec![RgbImage::new(16, 16); 20])?;
/// let media = DecodedMedia::new(frames, None);
///
/// let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default())?;
/// let report = scorer.score(&media)?;
///
/// // Nothing measurable: every component is neutral
/// assert_eq!(report.component_scores.facial, 0.5);
/// assert_eq!(report.metadata.degraded.len(), 3);
/// # Ok::<(), vidproof::ScorerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scorer<D> {
    detector: D,
    config: ScoringConfig,
}

impl<D: FaceDetector> Scorer<D> {
    /// Create a scorer
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::InvalidInput` if `config` fails validation.
    pub fn new(detector: D, config: ScoringConfig) -> Result<Self, ScorerError> {
        config.validate()?;
        Ok(Self { detector, config })
    }

    /// Active configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Face detector in use
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Decode `source` and score it
    ///
    /// # Errors
    ///
    /// Only decoding errors from `source` are returned; analyzer failures
    /// degrade to the neutral score.
    pub fn score<S: MediaSource + ?Sized>(&self, source: &S) -> Result<ScoreReport, ScorerError> {
        let media = source.decode()?;
        Ok(self.score_media(&media))
    }

    /// Score already decoded media
    pub fn score_media(&self, media: &DecodedMedia) -> ScoreReport {
        let start_time = Instant::now();
        let config = &self.config;

        log::debug!(
            "Scoring {} frames (stride {}), audio: {}",
            media.frames.len(),
            config.frame_stride,
            media.audio.is_some()
        );

        let (facial, (frequency, audio_visual)) = if config.parallel {
            rayon::join(
                || self.facial(media),
                || rayon::join(|| self.frequency(media), || self.audio_visual(media)),
            )
        } else {
            (self.facial(media), (self.frequency(media), self.audio_visual(media)))
        };

        let mut bundle = ScoreBundle {
            facial: facial.score,
            frequency: frequency.score,
            audio_visual: audio_visual.score,
        };
        if config.clamp_scores {
            bundle = bundle.clamped();
        }

        let (final_score, interpretation) = fuse(&bundle, config);

        let degraded = Component::ALL
            .iter()
            .zip([facial.degraded, frequency.degraded, audio_visual.degraded])
            .filter_map(|(&component, reason)| {
                reason.map(|reason| DegradedComponent { component, reason })
            })
            .collect();

        let processing_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        log::info!(
            "Score {:.3} ({}) in {:.1} ms",
            final_score,
            interpretation.verdict,
            processing_time_ms
        );

        ScoreReport {
            final_score,
            component_scores: bundle,
            interpretation,
            metadata: ScoringMetadata {
                frame_count: media.frames.len(),
                sampled_frames: sampled_count(media.frames.len(), config.frame_stride),
                frame_stride: config.frame_stride,
                has_audio: media.audio.is_some(),
                audio_sample_rate: media.audio.as_ref().map(|a| a.sample_rate()),
                fps: media.fps,
                processing_time_ms,
                degraded,
                ..ScoringMetadata::default()
            },
        }
    }

    fn facial(&self, media: &DecodedMedia) -> ComponentOutcome {
        ComponentOutcome::settle(
            Component::Facial,
            measure_facial_stability(&media.frames, &self.detector, self.config.frame_stride),
            self.config.neutral_score,
        )
    }

    fn frequency(&self, media: &DecodedMedia) -> ComponentOutcome {
        ComponentOutcome::settle(
            Component::Frequency,
            measure_spectral_regularity(&media.frames, self.config.frame_stride),
            self.config.neutral_score,
        )
    }

    fn audio_visual(&self, media: &DecodedMedia) -> ComponentOutcome {
        let measured = measure_audio_visual_sync(
            &media.frames,
            media.audio.as_ref(),
            self.config.normalization_epsilon,
        );
        match measured {
            Ok(AudioVisualMeasurement::NoAudio) => ComponentOutcome {
                score: self.config.neutral_score,
                degraded: Some("no audio track".to_string()),
            },
            Ok(AudioVisualMeasurement::Correlation(r)) => ComponentOutcome {
                score: r,
                degraded: None,
            },
            Err(e) => {
                ComponentOutcome::settle(Component::AudioVisual, Err(e), self.config.neutral_score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::Verdict;
    use crate::features::facial::{FaceBox, NoFaceDetector};
    use crate::io::media::{AudioTrack, FrameSequence};
    use image::{GrayImage, Rgb, RgbImage};

    fn textured(seed: u32) -> RgbImage {
        RgbImage::from_fn(16, 16, |x, y| {
            let v = ((x * 13 + y * 29 + seed * 11) % 241) as u8;
            Rgb([v, v / 3, 255 - v])
        })
    }

    fn constant_face(_: &GrayImage) -> Result<Vec<FaceBox>, ScorerError> {
        Ok(vec![FaceBox::new(10, 10, 40, 25)])
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            frame_stride: 0,
            ..Default::default()
        };
        assert!(Scorer::new(NoFaceDetector, config).is_err());
    }

    #[test]
    fn test_no_faces_is_exactly_neutral() {
        let frames = FrameSequence::new((0..20).map(textured).collect()).unwrap();
        let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default()).unwrap();
        let report = scorer.score_media(&DecodedMedia::new(frames, None));

        assert_eq!(report.component_scores.facial, 0.5);
        assert!(report.metadata.is_degraded(Component::Facial));
        assert!(!report.metadata.is_degraded(Component::Frequency));
    }

    #[test]
    fn test_no_audio_is_exactly_neutral() {
        let frames = FrameSequence::new((0..20).map(textured).collect()).unwrap();
        let scorer = Scorer::new(constant_face, ScoringConfig::default()).unwrap();
        let report = scorer.score_media(&DecodedMedia::new(frames, None));

        assert_eq!(report.component_scores.audio_visual, 0.5);
        assert!(!report.metadata.has_audio);
        let degraded = &report.metadata.degraded;
        assert_eq!(degraded.len(), 1);
        assert_eq!(degraded[0].component, Component::AudioVisual);
        assert_eq!(degraded[0].reason, "no audio track");
    }

    #[test]
    fn test_detector_error_degrades_facial() {
        let failing = |_: &GrayImage| -> Result<Vec<FaceBox>, ScorerError> {
            Err(ScorerError::ProcessingError("model crashed".to_string()))
        };
        let frames = FrameSequence::new((0..5).map(textured).collect()).unwrap();
        let scorer = Scorer::new(failing, ScoringConfig::default()).unwrap();
        let report = scorer.score_media(&DecodedMedia::new(frames, None));

        assert_eq!(report.component_scores.facial, 0.5);
        assert!(report.metadata.degraded[0].reason.contains("model crashed"));
    }

    #[test]
    fn test_end_to_end_constant_faces() {
        let frames = FrameSequence::new((0..50).map(textured).collect()).unwrap();
        let scorer = Scorer::new(constant_face, ScoringConfig::default()).unwrap();
        let report = scorer.score_media(&DecodedMedia::new(frames, None));

        assert!((report.component_scores.facial - 1.0).abs() < 1e-12);
        assert_eq!(report.component_scores.audio_visual, 0.5);
        assert_eq!(report.metadata.frame_count, 50);
        assert_eq!(report.metadata.sampled_frames, 5);

        let expected = 0.4 * report.component_scores.facial
            + 0.3 * report.component_scores.frequency
            + 0.3 * 0.5;
        assert!((report.final_score - expected).abs() < 1e-12);
        assert_eq!(
            report.interpretation.verdict,
            Verdict::from_score(expected, 0.7)
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let frames = FrameSequence::new((0..30).map(textured).collect()).unwrap();
        let samples: Vec<f32> = (0..400).map(|i| ((i as f32) * 0.37).sin()).collect();
        let media = DecodedMedia::new(frames, Some(AudioTrack::mono(8000, samples)));
        let scorer = Scorer::new(constant_face, ScoringConfig::default()).unwrap();

        let a = scorer.score_media(&media);
        let b = scorer.score_media(&media);
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.component_scores, b.component_scores);
        assert_eq!(a.interpretation, b.interpretation);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let frames = FrameSequence::new((0..30).map(textured).collect()).unwrap();
        let samples: Vec<f32> = (0..400).map(|i| ((i as f32) * 0.11).cos()).collect();
        let media = DecodedMedia::new(frames, Some(AudioTrack::mono(8000, samples)));

        let sequential = Scorer::new(constant_face, ScoringConfig::default()).unwrap();
        let parallel = Scorer::new(
            constant_face,
            ScoringConfig {
                parallel: true,
                ..Default::default()
            },
        )
        .unwrap();

        let a = sequential.score_media(&media);
        let b = parallel.score_media(&media);
        assert_eq!(a.component_scores, b.component_scores);
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.metadata.degraded, b.metadata.degraded);
    }

    #[test]
    fn test_score_propagates_source_errors() {
        struct Broken;
        impl MediaSource for Broken {
            fn decode(&self) -> Result<DecodedMedia, ScorerError> {
                Err(ScorerError::SourceUnavailable("gone".to_string()))
            }
        }

        let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default()).unwrap();
        assert!(matches!(
            scorer.score(&Broken),
            Err(ScorerError::SourceUnavailable(_))
        ));
    }
}
