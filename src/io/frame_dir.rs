//! Pre-extracted frame dumps: a directory of still images plus optional audio

use super::audio::decode_audio_file;
use super::media::{DecodedMedia, FrameSequence, MediaSource};
use crate::error::ScorerError;
use std::path::{Path, PathBuf};

/// File extensions accepted as frames (case-insensitive)
const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Frames read from image files sorted by file name
///
/// Name frames so that lexical order is temporal order
/// (`frame_0001.png`, `frame_0002.png`, ...).
#[derive(Debug, Clone)]
pub struct FrameDirectorySource {
    dir: PathBuf,
    audio: Option<PathBuf>,
}

impl FrameDirectorySource {
    /// Read frames from `dir`, no audio
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            audio: None,
        }
    }

    /// Attach an audio file (anything Symphonia can decode)
    pub fn with_audio(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio = Some(path.into());
        self
    }

    /// Frame files in temporal order
    pub fn frame_paths(&self) -> Result<Vec<PathBuf>, ScorerError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            ScorerError::SourceUnavailable(format!("Cannot read {}: {}", self.dir.display(), e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| ScorerError::SourceUnavailable(e.to_string()))?
                .path();
            if path.is_file() && is_frame_file(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            FRAME_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

impl MediaSource for FrameDirectorySource {
    fn decode(&self) -> Result<DecodedMedia, ScorerError> {
        if !self.dir.is_dir() {
            return Err(ScorerError::SourceUnavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        let paths = self.frame_paths()?;
        if paths.is_empty() {
            return Err(ScorerError::DecodingError(format!(
                "No image frames in {}",
                self.dir.display()
            )));
        }

        log::debug!("Loading {} frames from {}", paths.len(), self.dir.display());

        let frames = paths
            .iter()
            .map(|p| {
                image::open(p)
                    .map(|img| img.to_rgb8())
                    .map_err(|e| ScorerError::DecodingError(format!("{}: {}", p.display(), e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let frames = FrameSequence::new(frames)?;
        let audio = self
            .audio
            .as_ref()
            .map(|p| decode_audio_file(p))
            .transpose()?;

        Ok(DecodedMedia::new(frames, audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_extension_filter() {
        assert!(is_frame_file(Path::new("a/frame_001.PNG")));
        assert!(is_frame_file(Path::new("frame.jpeg")));
        assert!(!is_frame_file(Path::new("notes.txt")));
        assert!(!is_frame_file(Path::new("no_extension")));
    }

    #[test]
    fn test_missing_directory() {
        let source = FrameDirectorySource::new("/no/such/frames");
        assert!(matches!(
            source.decode(),
            Err(ScorerError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = FrameDirectorySource::new(dir.path());
        assert!(matches!(source.decode(), Err(ScorerError::DecodingError(_))));
    }
}
