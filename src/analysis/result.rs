//! Scoring result types

use super::metadata::ScoringMetadata;
use crate::error::ScorerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three consistency signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// Face-area stability across sampled frames
    Facial,
    /// Log-spectrum regularity across sampled frames
    Frequency,
    /// Audio energy vs. visual motion correlation
    AudioVisual,
}

impl Component {
    /// All components in their fixed reporting order
    pub const ALL: [Component; 3] = [
        Component::Facial,
        Component::Frequency,
        Component::AudioVisual,
    ];

    /// Stable key used in reports (`facial`, `frequency`, `audio_visual`)
    ///
    /// # Example
    ///
    /// ```
    /// use vidproof::analysis::result::Component;
    ///
    /// assert_eq!(Component::AudioVisual.name(), "audio_visual");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Component::Facial => "facial",
            Component::Frequency => "frequency",
            Component::AudioVisual => "audio_visual",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three component scores (higher = more consistent / authentic)
///
/// Always carries all three keys; a component without a measurement holds the
/// neutral score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    /// Facial stability score
    pub facial: f64,
    /// Spectral regularity score
    pub frequency: f64,
    /// Audio-visual correlation score
    pub audio_visual: f64,
}

impl ScoreBundle {
    /// Bundle with every component set to `value`
    pub fn uniform(value: f64) -> Self {
        Self {
            facial: value,
            frequency: value,
            audio_visual: value,
        }
    }

    /// Score of one component
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Facial => self.facial,
            Component::Frequency => self.frequency,
            Component::AudioVisual => self.audio_visual,
        }
    }

    /// `(component, score)` pairs in the fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Copy with every score clamped to `[0, 1]`
    pub fn clamped(&self) -> Self {
        Self {
            facial: self.facial.clamp(0.0, 1.0),
            frequency: self.frequency.clamp(0.0, 1.0),
            audio_visual: self.audio_visual.clamp(0.0, 1.0),
        }
    }
}

/// Binary classification of the fused score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Fused score above the verdict threshold
    #[serde(rename = "Real")]
    Real,
    /// Fused score at or below the verdict threshold
    #[serde(rename = "Likely Deepfake")]
    LikelyDeepfake,
}

impl Verdict {
    /// `Real` iff `final_score > threshold`
    ///
    /// # Example
    ///
    /// ```
    /// use vidproof::analysis::result::Verdict;
    ///
    /// assert_eq!(Verdict::from_score(0.71, 0.7), Verdict::Real);
    /// assert_eq!(Verdict::from_score(0.7, 0.7), Verdict::LikelyDeepfake);
    /// ```
    pub fn from_score(final_score: f64, threshold: f64) -> Self {
        if final_score > threshold {
            Verdict::Real
        } else {
            Verdict::LikelyDeepfake
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Real => "Real",
            Verdict::LikelyDeepfake => "Likely Deepfake",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Human-facing reading of the fused score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Thresholded verdict
    pub verdict: Verdict,

    /// Distance from the undecided midpoint, `|final_score - 0.5| * 2`
    pub confidence: f64,

    /// Components that scored below the anomaly threshold, in fixed order
    pub anomalies: Vec<Component>,
}

/// Complete scoring result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Weighted combination of the component scores
    pub final_score: f64,

    /// Per-component scores
    pub component_scores: ScoreBundle,

    /// Verdict, confidence and anomalies
    pub interpretation: Interpretation,

    /// Run diagnostics (timing, frame counts, degraded components)
    pub metadata: ScoringMetadata,
}

impl ScoreReport {
    /// True if the verdict is `Real`
    pub fn is_real(&self) -> bool {
        self.interpretation.verdict == Verdict::Real
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ScorerError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScorerError::ProcessingError(format!("Report serialization: {}", e)))
    }
}
