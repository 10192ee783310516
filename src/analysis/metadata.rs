//! Scoring run metadata

use super::result::Component;
use serde::{Deserialize, Serialize};

/// A component that fell back to the neutral score, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedComponent {
    /// Component that was not measured
    pub component: Component,
    /// Reason the measurement was unavailable
    pub reason: String,
}

/// Diagnostics for one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringMetadata {
    /// Total frames in the input
    pub frame_count: usize,

    /// Frames visited by the sampled analyzers
    pub sampled_frames: usize,

    /// Frame stride used
    pub frame_stride: usize,

    /// Whether an audio track was present
    pub has_audio: bool,

    /// Audio sample rate in Hz, if audio was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<u32>,

    /// Container frame rate, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    /// Wall time spent scoring (excludes decoding)
    pub processing_time_ms: f64,

    /// Crate version that produced the report
    pub algorithm_version: String,

    /// Components that reported the neutral score instead of a measurement
    pub degraded: Vec<DegradedComponent>,
}

impl Default for ScoringMetadata {
    fn default() -> Self {
        Self {
            frame_count: 0,
            sampled_frames: 0,
            frame_stride: 0,
            has_audio: false,
            audio_sample_rate: None,
            fps: None,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            degraded: vec![],
        }
    }
}

impl ScoringMetadata {
    /// True if `component` fell back to the neutral score
    pub fn is_degraded(&self, component: Component) -> bool {
        self.degraded.iter().any(|d| d.component == component)
    }
}
