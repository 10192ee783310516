//! Media I/O modules
//!
//! Decoded media types and the sources that produce them: FFmpeg-decoded
//! video files, image-sequence directories, and Symphonia audio decoding.

pub mod audio;
pub mod decoder;
pub mod frame_dir;
pub mod media;

pub use audio::decode_audio_file;
pub use decoder::FfmpegSource;
pub use frame_dir::FrameDirectorySource;
pub use media::{AudioTrack, DecodedMedia, Frame, FrameSequence, MediaSource};
