//! Feature extraction modules
//!
//! The three independent consistency signals:
//! - Facial stability (face-area consistency across sampled frames)
//! - Spectral regularity (log-spectrum dispersion across sampled frames)
//! - Audio-visual sync (audio energy vs. frame motion correlation)

pub mod facial;
pub mod spectral;
pub mod stats;
pub mod sync;
