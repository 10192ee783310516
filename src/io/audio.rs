//! Audio decoding using Symphonia

use super::media::AudioTrack;
use crate::error::ScorerError;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode the first audio track of a file, keeping channels interleaved
///
/// # Errors
///
/// - `ScorerError::SourceUnavailable` if the file cannot be opened or its
///   container is not recognised
/// - `ScorerError::DecodingError` if no decodable track exists or decoding
///   fails mid-stream
pub fn decode_audio_file(path: impl AsRef<Path>) -> Result<AudioTrack, ScorerError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path).map_err(|e| {
        ScorerError::SourceUnavailable(format!("Cannot open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            ScorerError::SourceUnavailable(format!(
                "Unsupported audio container {}: {}",
                path.display(),
                e
            ))
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ScorerError::DecodingError("No decodable audio track".to_string()))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| ScorerError::DecodingError(format!("Unsupported audio codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(ScorerError::DecodingError(format!(
                    "Reading audio packets failed: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count();

                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                // Corrupt packets are dropped, the rest of the stream is still usable
                skipped_packets += 1;
                log::debug!("Skipping undecodable audio packet: {}", e);
            }
            Err(e) => {
                return Err(ScorerError::DecodingError(format!(
                    "Audio decode failed: {}",
                    e
                )))
            }
        }
    }

    if skipped_packets > 0 {
        log::warn!(
            "{}: skipped {} corrupt audio packets",
            path.display(),
            skipped_packets
        );
    }

    if channels == 0 {
        return Err(ScorerError::DecodingError(
            "Audio stream reports no channels".to_string(),
        ));
    }

    log::debug!(
        "Decoded {} samples ({} channels @ {} Hz)",
        samples.len(),
        channels,
        sample_rate
    );

    AudioTrack::new(sample_rate, channels, samples)
        .map_err(|e| ScorerError::DecodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_unavailable() {
        let result = decode_audio_file("/definitely/not/here.wav");
        assert!(matches!(result, Err(ScorerError::SourceUnavailable(_))));
    }

    #[test]
    fn test_garbage_is_unavailable() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"this is not a riff header").unwrap();
        let result = decode_audio_file(file.path());
        assert!(matches!(result, Err(ScorerError::SourceUnavailable(_))));
    }
}
