//! Channel mixing utilities (multi-channel to mono energy)

use crate::io::media::AudioTrack;

/// Collapse an interleaved track to one magnitude per sample frame
///
/// Each sample frame is averaged across its channels and the absolute value
/// of that mean is returned, giving a coarse energy envelope at the audio
/// sample rate.
///
/// # Example
///
/// ```
/// use vidproof::io::media::AudioTrack;
/// use vidproof::preprocessing::channel_mixer::channel_mean_magnitude;
///
/// let track = AudioTrack::new(8000, 2, vec![0.5, -0.1, -1.0, 0.0]).unwrap();
/// let energy = channel_mean_magnitude(&track);
/// assert!((energy[0] - 0.2).abs() < 1e-6);
/// assert!((energy[1] - 0.5).abs() < 1e-6);
/// ```
pub fn channel_mean_magnitude(track: &AudioTrack) -> Vec<f64> {
    let channels = track.channels();
    log::debug!(
        "Mixing {} sample frames across {} channels",
        track.frame_count(),
        channels
    );

    track
        .samples()
        .chunks_exact(channels)
        .map(|frame| {
            let sum: f64 = frame.iter().map(|&s| s as f64).sum();
            (sum / channels as f64).abs()
        })
        .collect()
}
