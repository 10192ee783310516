//! Example: Score a single video (or image sequence)
//!
//! Usage:
//!   cargo run --release --example score_video -- [options] <video>
//!   cargo run --release --example score_video -- [options] --frames-dir <dir> [--audio <file>]
//!
//! Face detection needs the `opencv` feature and a Haar cascade file
//! (`--cascade haarcascade_frontalface_default.xml`). Without one the facial
//! component reports the neutral score.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use vidproof::{
    DecodeOptions, FaceDetector, FfmpegSource, FrameDirectorySource, MediaSource, NoFaceDetector,
    ScoreReport, Scorer, ScoringConfig,
};

const USAGE: &str = "Usage: score_video [options] <video>\n\
     \n\
     --json              Print the report as JSON\n\
     --config FILE       Load scoring config from JSON\n\
     --stride N          Analyze every Nth frame (default: 10)\n\
     --parallel          Run the analyzers concurrently\n\
     --max-frames N      Decode at most N frames\n\
     --timeout SECS      Abort decoding after SECS seconds\n\
     --frames-dir DIR    Score a directory of image frames instead of a video\n\
     --audio FILE        Audio track to pair with --frames-dir\n\
     --cascade FILE      Haar cascade for face detection (opencv feature)\n";

fn build_detector(
    cascade: Option<PathBuf>,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    match cascade {
        #[cfg(feature = "opencv")]
        Some(path) => Ok(Box::new(vidproof::HaarCascadeDetector::new(path)?)),
        #[cfg(not(feature = "opencv"))]
        Some(_) => Err("--cascade requires building with --features opencv".into()),
        None => {
            log::warn!("No face detector configured; facial score will be neutral");
            Ok(Box::new(NoFaceDetector))
        }
    }
}

fn print_report(report: &ScoreReport) {
    println!("Scoring Results:");
    println!("  Final score: {:.4}", report.final_score);
    println!(
        "  Verdict: {} (confidence: {:.2})",
        report.interpretation.verdict, report.interpretation.confidence
    );
    for (component, score) in report.component_scores.iter() {
        let note = if report.metadata.is_degraded(component) {
            " (neutral)"
        } else {
            ""
        };
        println!("  {:<13} {:.4}{}", format!("{}:", component), score, note);
    }
    if !report.interpretation.anomalies.is_empty() {
        let names: Vec<&str> = report
            .interpretation
            .anomalies
            .iter()
            .map(|c| c.name())
            .collect();
        println!("  Anomalies: {}", names.join(", "));
    }
    for d in &report.metadata.degraded {
        println!("  Note: {} not measured: {}", d.component, d.reason);
    }
    println!(
        "  Frames: {} ({} sampled), audio: {}",
        report.metadata.frame_count,
        report.metadata.sampled_frames,
        if report.metadata.has_audio { "yes" } else { "no" }
    );
    println!("  Processing time: {:.2} ms", report.metadata.processing_time_ms);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut config_path: Option<PathBuf> = None;
    let mut stride: Option<usize> = None;
    let mut parallel = false;
    let mut options = DecodeOptions::default();
    let mut frames_dir: Option<PathBuf> = None;
    let mut audio: Option<PathBuf> = None;
    let mut cascade: Option<PathBuf> = None;
    let mut video: Option<PathBuf> = None;

    while !args.is_empty() {
        let a = args.remove(0);
        let mut value = |flag: &str| -> Result<String, Box<dyn std::error::Error>> {
            if args.is_empty() {
                return Err(format!("{} requires a value", flag).into());
            }
            Ok(args.remove(0))
        };
        match a.as_str() {
            "--json" => json = true,
            "--parallel" => parallel = true,
            "--config" => config_path = Some(value("--config")?.into()),
            "--stride" => stride = Some(value("--stride")?.parse()?),
            "--max-frames" => options.max_frames = Some(value("--max-frames")?.parse()?),
            "--timeout" => {
                options.timeout = Some(Duration::try_from_secs_f64(value("--timeout")?.parse()?)?)
            }
            "--frames-dir" => frames_dir = Some(value("--frames-dir")?.into()),
            "--audio" => audio = Some(value("--audio")?.into()),
            "--cascade" => cascade = Some(value("--cascade")?.into()),
            "--help" | "-h" => {
                eprintln!("{}", USAGE);
                return Ok(());
            }
            _ => video = Some(a.into()),
        }
    }

    let mut config = match config_path {
        Some(path) => ScoringConfig::from_json_file(path)?,
        None => ScoringConfig::default(),
    };
    if let Some(n) = stride {
        config.frame_stride = n;
    }
    config.parallel |= parallel;

    let source: Box<dyn MediaSource> = match (frames_dir, video) {
        (Some(dir), _) => {
            let mut src = FrameDirectorySource::new(dir);
            if let Some(a) = audio {
                src = src.with_audio(a);
            }
            Box::new(src)
        }
        (None, Some(path)) => Box::new(FfmpegSource::with_options(path, options)),
        (None, None) => {
            eprintln!("ERROR: Provide a video path or --frames-dir.\n\n{}", USAGE);
            std::process::exit(2);
        }
    };

    let backend = build_detector(cascade)?;
    let detector = move |frame: &image::GrayImage| backend.detect(frame);
    let scorer = Scorer::new(detector, config)?;

    let report = scorer.score(source.as_ref())?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    Ok(())
}
