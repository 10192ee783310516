//! Video decoding through the FFmpeg command-line tools
//!
//! `ffprobe` reports the stream layout, `ffmpeg` pipes the first video stream
//! as raw RGB24 frames and transcodes the first audio stream to a temporary
//! float WAV that Symphonia then decodes.

use super::audio::decode_audio_file;
use super::media::{DecodedMedia, FrameSequence, MediaSource};
use crate::config::DecodeOptions;
use crate::error::ScorerError;
use image::RgbImage;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running decoder is checked against its deadline
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Stream layout reported by ffprobe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeInfo {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Average frame rate, if reported
    pub fps: Option<f64>,
    /// True if the container has at least one audio stream
    pub has_audio: bool,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
}

/// Parse ffprobe's JSON stream listing
pub fn parse_probe_output(json: &[u8]) -> Result<ProbeInfo, ScorerError> {
    let probe: FfprobeOutput = serde_json::from_slice(json)
        .map_err(|e| ScorerError::SourceUnavailable(format!("Unreadable ffprobe output: {}", e)))?;

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ScorerError::DecodingError("No video stream found".to_string()))?;

    let width = video.width.unwrap_or(0);
    let height = video.height.unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(ScorerError::DecodingError(format!(
            "Video stream has no usable size ({}x{})",
            width, height
        )));
    }

    let fps = video
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| video.r_frame_rate.as_deref().and_then(parse_frame_rate));

    let has_audio = probe
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(ProbeInfo {
        width,
        height,
        fps,
        has_audio,
    })
}

/// Parse an ffprobe rate such as `"30000/1001"` or `"25"`
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Output of a finished child process
struct ProcessOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: String,
}

fn read_all<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

fn join_reader(
    handle: thread::JoinHandle<std::io::Result<Vec<u8>>>,
    what: &str,
) -> Result<Vec<u8>, ScorerError> {
    handle
        .join()
        .map_err(|_| ScorerError::DecodingError(format!("{}: reader thread panicked", what)))?
        .map_err(|e| ScorerError::DecodingError(format!("{}: read failed: {}", what, e)))
}

/// Kill and reap `child`, then wait for its pipe readers to drain
fn abort_child(
    child: &mut Child,
    out_reader: thread::JoinHandle<std::io::Result<Vec<u8>>>,
    err_reader: thread::JoinHandle<std::io::Result<Vec<u8>>>,
) {
    let _ = child.kill();
    let _ = child.wait();
    let _ = out_reader.join();
    let _ = err_reader.join();
}

/// Run `cmd` to completion, killing it if `deadline` passes first
///
/// Both pipes are drained on their own threads so a chatty child cannot block
/// on a full pipe while we poll it.
fn run_with_deadline(
    mut cmd: Command,
    what: &str,
    deadline: Option<Instant>,
) -> Result<ProcessOutput, ScorerError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| ScorerError::SourceUnavailable(format!("Failed to spawn {}: {}", what, e)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| ScorerError::DecodingError(format!("{}: stdout not captured", what)))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| ScorerError::DecodingError(format!("{}: stderr not captured", what)))?;

    let out_reader = thread::spawn(move || read_all(stdout));
    let err_reader = thread::spawn(move || read_all(stderr));

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(e) => {
                abort_child(&mut child, out_reader, err_reader);
                return Err(ScorerError::DecodingError(format!(
                    "{}: wait failed: {}",
                    what, e
                )));
            }
        }

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                log::warn!("{} exceeded its deadline, killing it", what);
                abort_child(&mut child, out_reader, err_reader);
                return Err(ScorerError::Timeout(format!(
                    "{} did not finish before the decode deadline",
                    what
                )));
            }
        }

        thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_reader(out_reader, what)?;
    let stderr = String::from_utf8_lossy(&join_reader(err_reader, what)?)
        .trim()
        .to_string();

    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}

/// Split a raw RGB24 byte stream into frames
///
/// A trailing partial frame (decoder cut off mid-frame) is dropped.
pub fn frames_from_raw(raw: Vec<u8>, width: u32, height: u32) -> Result<FrameSequence, ScorerError> {
    let frame_bytes = width as usize * height as usize * 3;
    if frame_bytes == 0 {
        return Err(ScorerError::DecodingError(format!(
            "Invalid frame size {}x{}",
            width, height
        )));
    }

    let count = raw.len() / frame_bytes;
    if count == 0 {
        return Err(ScorerError::DecodingError(
            "Decoder produced no complete frames".to_string(),
        ));
    }
    if raw.len() % frame_bytes != 0 {
        log::warn!(
            "Dropping {} trailing bytes of a partial frame",
            raw.len() % frame_bytes
        );
    }

    let frames = raw
        .chunks_exact(frame_bytes)
        .map(|chunk| {
            RgbImage::from_raw(width, height, chunk.to_vec()).ok_or_else(|| {
                ScorerError::DecodingError("Raw frame buffer has the wrong size".to_string())
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    FrameSequence::new(frames)
}

/// Video file decoded with the `ffmpeg` and `ffprobe` binaries on `PATH`
#[derive(Debug, Clone)]
pub struct FfmpegSource {
    path: PathBuf,
    options: DecodeOptions,
}

impl FfmpegSource {
    /// Decode `path` with default options
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, DecodeOptions::default())
    }

    /// Decode `path` with explicit options
    pub fn with_options(path: impl Into<PathBuf>, options: DecodeOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Path being decoded
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tool(name: &str) -> Result<PathBuf, ScorerError> {
        which::which(name)
            .map_err(|_| ScorerError::SourceUnavailable(format!("{} not found on PATH", name)))
    }

    /// Query the stream layout with ffprobe
    pub fn probe(&self) -> Result<ProbeInfo, ScorerError> {
        let mut cmd = Command::new(Self::tool("ffprobe")?);
        cmd.args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
        ])
        .arg(&self.path);

        let out = run_with_deadline(cmd, "ffprobe", self.deadline_from_now())?;
        if !out.status.success() {
            return Err(ScorerError::SourceUnavailable(format!(
                "ffprobe could not read {} ({})",
                self.path.display(),
                out.status
            )));
        }
        parse_probe_output(&out.stdout)
    }

    fn deadline_from_now(&self) -> Option<Instant> {
        self.options.timeout.map(|t| Instant::now() + t)
    }

    fn extract_frames(
        &self,
        info: &ProbeInfo,
        deadline: Option<Instant>,
    ) -> Result<FrameSequence, ScorerError> {
        let mut cmd = Command::new(Self::tool("ffmpeg")?);
        cmd.args(["-hide_banner", "-loglevel", "error", "-noautorotate", "-i"])
            .arg(&self.path)
            .args(["-map", "0:v:0"]);
        if let Some(max) = self.options.max_frames {
            cmd.arg("-frames:v").arg(max.to_string());
        }
        cmd.args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"]);

        log::debug!(
            "Extracting {}x{} frames from {}",
            info.width,
            info.height,
            self.path.display()
        );

        let out = run_with_deadline(cmd, "ffmpeg (video)", deadline)?;
        if !out.status.success() {
            if out.stdout.is_empty() {
                return Err(ScorerError::DecodingError(format!(
                    "ffmpeg failed to decode video ({}): {}",
                    out.status, out.stderr
                )));
            }
            log::warn!(
                "ffmpeg exited with {} after producing frames: {}",
                out.status,
                out.stderr
            );
        }

        frames_from_raw(out.stdout, info.width, info.height)
    }

    fn extract_audio(
        &self,
        deadline: Option<Instant>,
    ) -> Result<super::media::AudioTrack, ScorerError> {
        let wav = tempfile::Builder::new()
            .prefix("vidproof-audio-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| ScorerError::DecodingError(format!("Cannot create temp file: {}", e)))?;

        let mut cmd = Command::new(Self::tool("ffmpeg")?);
        cmd.args(["-y", "-hide_banner", "-loglevel", "error", "-i"])
            .arg(&self.path)
            .args(["-map", "0:a:0", "-vn", "-acodec", "pcm_f32le", "-f", "wav"])
            .arg(wav.path());

        let out = run_with_deadline(cmd, "ffmpeg (audio)", deadline)?;
        if !out.status.success() {
            return Err(ScorerError::DecodingError(format!(
                "ffmpeg failed to extract audio ({}): {}",
                out.status, out.stderr
            )));
        }

        decode_audio_file(wav.path())
    }
}

impl MediaSource for FfmpegSource {
    fn decode(&self) -> Result<DecodedMedia, ScorerError> {
        if !self.path.is_file() {
            return Err(ScorerError::SourceUnavailable(format!(
                "{} does not exist",
                self.path.display()
            )));
        }

        let deadline = self.deadline_from_now();
        let info = self.probe()?;
        let frames = self.extract_frames(&info, deadline)?;

        let audio = if info.has_audio && self.options.include_audio {
            Some(self.extract_audio(deadline)?)
        } else {
            None
        };

        log::info!(
            "Decoded {}: {} frames, audio={}",
            self.path.display(),
            frames.len(),
            audio.is_some()
        );

        Ok(DecodedMedia {
            frames,
            audio,
            fps: info.fps,
        })
    }
}
