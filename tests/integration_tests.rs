//! Integration tests for the media scorer

use image::{GrayImage, Rgb, RgbImage};
use std::path::Path;
use vidproof::{
    Component, FaceBox, FfmpegSource, FrameDirectorySource, NoFaceDetector, Scorer, ScorerError,
    ScoringConfig, Verdict,
};

/// Gray level of synthetic frame `i`
fn gray_level(i: usize) -> u8 {
    ((i * 37) % 200 + 20) as u8
}

/// Textured frame so the spectrum is not degenerate
fn textured_frame(i: usize) -> RgbImage {
    let base = gray_level(i) as u32;
    RgbImage::from_fn(32, 24, |x, y| {
        let v = ((base + x * 7 + y * 3) % 256) as u8;
        Rgb([v, v, v])
    })
}

/// Write `count` PNG frames into `dir`
fn write_frames(dir: &Path, count: usize, make: impl Fn(usize) -> RgbImage) {
    for i in 0..count {
        make(i)
            .save(dir.join(format!("frame_{:04}.png", i)))
            .expect("Failed to write frame");
    }
}

/// Write a mono 16-bit WAV
fn write_wav(path: &Path, sample_rate: u32, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for &s in samples {
        writer
            .write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

fn constant_face(_: &GrayImage) -> Result<Vec<FaceBox>, ScorerError> {
    Ok(vec![FaceBox::new(5, 5, 40, 25)])
}

#[test]
fn test_frame_directory_without_audio() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), 50, textured_frame);

    let scorer = Scorer::new(constant_face, ScoringConfig::default()).unwrap();
    let report = scorer
        .score(&FrameDirectorySource::new(dir.path()))
        .expect("Scoring should succeed");

    // Identical face area in every sampled frame
    assert!((report.component_scores.facial - 1.0).abs() < 1e-12);
    assert_eq!(report.component_scores.audio_visual, 0.5);
    assert_eq!(report.metadata.frame_count, 50);
    assert_eq!(report.metadata.sampled_frames, 5);
    assert!(!report.metadata.has_audio);

    let expected = 0.4 * report.component_scores.facial
        + 0.3 * report.component_scores.frequency
        + 0.3 * report.component_scores.audio_visual;
    assert!((report.final_score - expected).abs() < 1e-12);
    assert_eq!(
        report.interpretation.verdict,
        Verdict::from_score(report.final_score, 0.7)
    );
    assert!(
        (report.interpretation.confidence - (report.final_score - 0.5).abs() * 2.0).abs() < 1e-12
    );
}

#[test]
fn test_audio_tracking_motion_scores_high() {
    let dir = tempfile::tempdir().unwrap();
    let frame_count = 30;
    write_frames(dir.path(), frame_count, |i| {
        RgbImage::from_pixel(16, 16, Rgb([gray_level(i); 3]))
    });

    // One audio sample per motion value, then a quiet tail
    let mut samples: Vec<f32> = (0..frame_count - 1)
        .map(|i| (gray_level(i + 1) as f32 - gray_level(i) as f32).abs() / 255.0)
        .collect();
    samples.extend(std::iter::repeat(0.1).take(200));

    let wav = dir.path().join("track.wav");
    write_wav(&wav, 8000, &samples);

    let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default()).unwrap();
    let report = scorer
        .score(&FrameDirectorySource::new(dir.path()).with_audio(&wav))
        .expect("Scoring should succeed");

    assert!(report.metadata.has_audio);
    assert_eq!(report.metadata.audio_sample_rate, Some(8000));
    assert!(!report.metadata.is_degraded(Component::AudioVisual));
    assert!(
        report.component_scores.audio_visual > 0.99,
        "Audio following motion should correlate, got {:.4}",
        report.component_scores.audio_visual
    );
}

#[test]
fn test_static_clip_with_audio_is_neutral() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), 12, |_| textured_frame(0));

    let samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
    let wav = dir.path().join("tone.wav");
    write_wav(&wav, 16000, &samples);

    let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default()).unwrap();
    let report = scorer
        .score(&FrameDirectorySource::new(dir.path()).with_audio(&wav))
        .unwrap();

    // Zero motion everywhere: correlation undefined
    assert_eq!(report.component_scores.audio_visual, 0.5);
    assert!(report.metadata.is_degraded(Component::AudioVisual));
}

#[test]
fn test_report_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), 20, textured_frame);

    let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default()).unwrap();
    let report = scorer.score(&FrameDirectorySource::new(dir.path())).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert!(json["final_score"].is_f64());

    let components = json["component_scores"].as_object().unwrap();
    assert_eq!(components.len(), 3);
    for key in ["facial", "frequency", "audio_visual"] {
        assert!(components[key].is_f64(), "missing component {}", key);
    }

    let verdict = json["interpretation"]["verdict"].as_str().unwrap();
    assert!(verdict == "Real" || verdict == "Likely Deepfake");
    assert!(json["interpretation"]["confidence"].is_f64());

    let anomalies = json["interpretation"]["anomalies"].as_array().unwrap();
    // Facial and audio-visual are neutral (0.5), which is below 0.7
    assert!(anomalies.contains(&serde_json::json!("facial")));
    assert!(anomalies.contains(&serde_json::json!("audio_visual")));

    assert!(json["metadata"]["algorithm_version"].is_string());
}

#[test]
fn test_scoring_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), 25, textured_frame);
    let source = FrameDirectorySource::new(dir.path());

    let scorer = Scorer::new(constant_face, ScoringConfig::default()).unwrap();
    let a = scorer.score(&source).unwrap();
    let b = scorer.score(&source).unwrap();

    assert_eq!(a.final_score, b.final_score);
    assert_eq!(a.component_scores, b.component_scores);
    assert_eq!(a.interpretation, b.interpretation);
}

#[test]
fn test_missing_sources_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = Scorer::new(NoFaceDetector, ScoringConfig::default()).unwrap();

    let missing_dir = scorer.score(&FrameDirectorySource::new(dir.path().join("nope")));
    assert!(matches!(missing_dir, Err(ScorerError::SourceUnavailable(_))));

    let missing_file = scorer.score(&FfmpegSource::new(dir.path().join("nope.mp4")));
    assert!(matches!(missing_file, Err(ScorerError::SourceUnavailable(_))));

    let empty_dir = scorer.score(&FrameDirectorySource::new(dir.path()));
    assert!(matches!(empty_dir, Err(ScorerError::DecodingError(_))));
}

#[test]
fn test_custom_config_from_json() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), 20, textured_frame);

    let config = ScoringConfig::from_json_str(
        r#"{"frame_stride": 1, "weights": {"facial": 1.0, "frequency": 0.0, "audio_visual": 0.0}}"#,
    )
    .unwrap();
    let scorer = Scorer::new(constant_face, config).unwrap();
    let report = scorer.score(&FrameDirectorySource::new(dir.path())).unwrap();

    assert_eq!(report.metadata.sampled_frames, 20);
    assert!((report.final_score - 1.0).abs() < 1e-12);
    assert_eq!(report.interpretation.verdict, Verdict::Real);
    assert!((report.interpretation.confidence - 1.0).abs() < 1e-12);
}
