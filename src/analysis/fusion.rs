//! Score fusion
//!
//! Combines the three component scores into the final authenticity score and
//! its interpretation.
//!
//! # Components
//!
//! 1. **Final score**: weighted sum, facial 40%, frequency 30%, audio-visual 30%
//! 2. **Verdict**: `Real` iff the final score is strictly above the verdict threshold
//! 3. **Confidence**: distance from the undecided midpoint, `|score - 0.5| * 2`
//! 4. **Anomalies**: components strictly below the anomaly threshold, in fixed order
//!
//! # Example
//!
//! ```
//! use vidproof::ScoringConfig;
//! use vidproof::analysis::fusion::fuse;
//! use vidproof::analysis::result::{Component, ScoreBundle, Verdict};
//!
//! let bundle = ScoreBundle { facial: 0.9, frequency: 0.6, audio_visual: 0.65 };
//! let (score, interpretation) = fuse(&bundle, &ScoringConfig::default());
//!
//! assert!((score - 0.735).abs() < 1e-9);
//! assert_eq!(interpretation.verdict, Verdict::Real);
//! assert_eq!(interpretation.anomalies, vec![Component::Frequency, Component::AudioVisual]);
//! ```

use super::result::{Component, Interpretation, ScoreBundle, Verdict};
use crate::config::{FusionWeights, ScoringConfig};

/// Weighted sum of the component scores
///
/// Summed in the fixed order facial, frequency, audio-visual so repeated runs
/// produce bit-identical results.
pub fn weighted_score(bundle: &ScoreBundle, weights: &FusionWeights) -> f64 {
    bundle.facial * weights.facial
        + bundle.frequency * weights.frequency
        + bundle.audio_visual * weights.audio_visual
}

/// Confidence of a final score: `|score - 0.5| * 2`
///
/// 0.0 at the midpoint, 1.0 at either extreme. Not clamped.
pub fn confidence(final_score: f64) -> f64 {
    (final_score - 0.5).abs() * 2.0
}

/// Components scoring strictly below `threshold`, in fixed order
pub fn anomalies(bundle: &ScoreBundle, threshold: f64) -> Vec<Component> {
    bundle
        .iter()
        .filter(|&(_, score)| score < threshold)
        .map(|(component, _)| component)
        .collect()
}

/// Fuse a bundle into the final score and its interpretation
pub fn fuse(bundle: &ScoreBundle, config: &ScoringConfig) -> (f64, Interpretation) {
    let final_score = weighted_score(bundle, &config.weights);
    let verdict = Verdict::from_score(final_score, config.verdict_threshold);

    let mut conf = confidence(final_score);
    if config.clamp_scores {
        conf = conf.clamp(0.0, 1.0);
    }

    let anomalies = anomalies(bundle, config.anomaly_threshold);

    log::debug!(
        "Fusion: facial={:.3}, frequency={:.3}, audio_visual={:.3} -> final={:.3} ({}, confidence {:.3})",
        bundle.facial,
        bundle.frequency,
        bundle.audio_visual,
        final_score,
        verdict,
        conf
    );

    (
        final_score,
        Interpretation {
            verdict,
            confidence: conf,
            anomalies,
        },
    )
}
