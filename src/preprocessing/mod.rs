//! Media preprocessing modules
//!
//! Utilities that prepare frames and audio for the analyzers:
//! - Frame sampling (every Nth frame)
//! - Grayscale conversion
//! - Channel mixing (multi-channel audio to a mono energy envelope)
//! - Min-max normalization

pub mod channel_mixer;
pub mod grayscale;
pub mod normalization;
pub mod sampling;
