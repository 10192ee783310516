//! Audio-visual synchronization analysis
//!
//! - Frame-difference motion series (`motion`)
//! - Pearson correlation (`correlation`)
//! - Energy/motion correlation score (`audio_visual`)

pub mod audio_visual;
pub mod correlation;
pub mod motion;

pub use audio_visual::{measure_audio_visual_sync, AudioVisualMeasurement};
