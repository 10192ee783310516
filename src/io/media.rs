//! Decoded media: frame sequences, audio tracks, and the source trait

use crate::error::ScorerError;
use image::RgbImage;

/// A single decoded frame (3-channel, 8-bit RGB)
pub type Frame = RgbImage;

/// Ordered, temporally sorted sequence of equally sized frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Build a sequence, rejecting frames whose dimensions differ from the first
    pub fn new(frames: Vec<Frame>) -> Result<Self, ScorerError> {
        if let Some(first) = frames.first() {
            let expected = first.dimensions();
            if let Some((i, f)) = frames
                .iter()
                .enumerate()
                .find(|(_, f)| f.dimensions() != expected)
            {
                return Err(ScorerError::InvalidInput(format!(
                    "Frame {} is {}x{}, expected {}x{}",
                    i,
                    f.width(),
                    f.height(),
                    expected.0,
                    expected.1
                )));
            }
        }
        Ok(Self { frames })
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if the sequence holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames in temporal order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// `(width, height)` shared by every frame, `None` when empty
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| f.dimensions())
    }

    /// Every `stride`-th frame starting at index 0, paired with its index
    pub fn sampled(&self, stride: usize) -> impl Iterator<Item = (usize, &Frame)> {
        crate::preprocessing::sampling::sample_indices(self.frames.len(), stride)
            .map(move |i| (i, &self.frames[i]))
    }
}

/// Decoded audio, interleaved `f32` samples
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    sample_rate: u32,
    channels: usize,
    samples: Vec<f32>,
}

impl AudioTrack {
    /// Create a track from interleaved samples
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::InvalidInput` if `channels` is zero or the sample
    /// count is not a multiple of `channels`.
    pub fn new(sample_rate: u32, channels: usize, samples: Vec<f32>) -> Result<Self, ScorerError> {
        if channels == 0 {
            return Err(ScorerError::InvalidInput(
                "Audio track must have at least one channel".to_string(),
            ));
        }
        if samples.len() % channels != 0 {
            return Err(ScorerError::InvalidInput(format!(
                "{} samples cannot be split evenly into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// Create a mono track
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            channels: 1,
            samples,
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of sample frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Duration in seconds, 0 when the sample rate is unknown
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frame_count() as f64 / self.sample_rate as f64
        }
    }
}

/// Everything the analyzers need from one video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMedia {
    /// Video frames in temporal order
    pub frames: FrameSequence,

    /// Audio track, `None` for silent video
    pub audio: Option<AudioTrack>,

    /// Frame rate reported by the container, if known
    pub fps: Option<f64>,
}

impl DecodedMedia {
    /// Bundle frames and optional audio
    pub fn new(frames: FrameSequence, audio: Option<AudioTrack>) -> Self {
        Self {
            frames,
            audio,
            fps: None,
        }
    }
}

/// Anything that can be decoded into frames plus optional audio
///
/// Implementations must report unreadable or missing input as
/// `ScorerError::SourceUnavailable` (or `DecodingError` when the container
/// opened but its streams did not decode); the scorer never recovers from
/// these.
pub trait MediaSource {
    /// Decode the source
    fn decode(&self) -> Result<DecodedMedia, ScorerError>;
}

impl MediaSource for DecodedMedia {
    fn decode(&self) -> Result<DecodedMedia, ScorerError> {
        Ok(self.clone())
    }
}
