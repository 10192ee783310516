//! Configuration parameters for media scoring

use crate::error::ScorerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tolerance used when checking that fusion weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-component fusion weights
///
/// The weighted sum of the three component scores is the final score, so the
/// weights must be non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    /// Weight of the facial stability score (default: 0.4)
    pub facial: f64,

    /// Weight of the spectral regularity score (default: 0.3)
    pub frequency: f64,

    /// Weight of the audio-visual correlation score (default: 0.3)
    pub audio_visual: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            facial: 0.4,
            frequency: 0.3,
            audio_visual: 0.3,
        }
    }
}

impl FusionWeights {
    /// Sum of all three weights
    pub fn sum(&self) -> f64 {
        self.facial + self.frequency + self.audio_visual
    }

    fn validate(&self) -> Result<(), ScorerError> {
        for (name, w) in [
            ("facial", self.facial),
            ("frequency", self.frequency),
            ("audio_visual", self.audio_visual),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(ScorerError::InvalidInput(format!(
                    "Fusion weight '{}' must be finite and >= 0, got {}",
                    name, w
                )));
            }
        }

        if (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScorerError::InvalidInput(format!(
                "Fusion weights must sum to 1.0, got {:.6}",
                self.sum()
            )));
        }

        Ok(())
    }
}

/// Scoring configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    // Sampling
    /// Analyze every Nth frame, starting at frame 0 (default: 10)
    ///
    /// Applies to the facial and spectral analyzers. The audio-visual analyzer
    /// always uses the full frame sequence.
    pub frame_stride: usize,

    // Fusion
    /// Fusion weights (default: facial 0.4, frequency 0.3, audio_visual 0.3)
    pub weights: FusionWeights,

    /// Final scores strictly above this are `Real` (default: 0.7)
    pub verdict_threshold: f64,

    /// Components scoring strictly below this are anomalies (default: 0.7)
    pub anomaly_threshold: f64,

    /// Score assigned to a component that produced no measurement (default: 0.5)
    pub neutral_score: f64,

    // Numerics
    /// Added to the min-max range before dividing (default: 1e-6)
    pub normalization_epsilon: f64,

    /// Clamp component scores and confidence to [0, 1] (default: false)
    ///
    /// Off by default: the ratio-based scores can leave [0, 1] on pathological
    /// input and the raw value is reported unchanged.
    pub clamp_scores: bool,

    // Execution
    /// Run the three analyzers concurrently on the rayon pool (default: false)
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            frame_stride: 10,
            weights: FusionWeights::default(),
            verdict_threshold: 0.7,
            anomaly_threshold: 0.7,
            neutral_score: 0.5,
            normalization_epsilon: 1e-6,
            clamp_scores: false,
            parallel: false,
        }
    }
}

impl ScoringConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::InvalidInput` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ScorerError> {
        if self.frame_stride == 0 {
            return Err(ScorerError::InvalidInput(
                "Frame stride must be >= 1".to_string(),
            ));
        }

        self.weights.validate()?;

        for (name, v) in [
            ("verdict_threshold", self.verdict_threshold),
            ("anomaly_threshold", self.anomaly_threshold),
            ("neutral_score", self.neutral_score),
        ] {
            if !v.is_finite() {
                return Err(ScorerError::InvalidInput(format!(
                    "{} must be finite, got {}",
                    name, v
                )));
            }
        }

        if !self.normalization_epsilon.is_finite() || self.normalization_epsilon <= 0.0 {
            return Err(ScorerError::InvalidInput(format!(
                "normalization_epsilon must be > 0, got {}",
                self.normalization_epsilon
            )));
        }

        Ok(())
    }

    /// Parse a configuration from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ScorerError> {
        let config: ScoringConfig = serde_json::from_str(json)
            .map_err(|e| ScorerError::InvalidInput(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScorerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ScorerError::InvalidInput(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}

/// Options for decoding a video container
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Stop after this many frames (default: no limit)
    pub max_frames: Option<usize>,

    /// Kill the decoder if extraction takes longer than this (default: none)
    pub timeout: Option<Duration>,

    /// Decode the first audio stream if present (default: true)
    pub include_audio: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_frames: None,
            timeout: None,
            include_audio: true,
        }
    }
}
