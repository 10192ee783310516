//! Example: Score multiple videos in parallel
//!
//! Usage:
//!   cargo run --release --example score_batch -- [--jobs N] [--json] [--stride N] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files (batch-level). Each file is scored single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.
//! - Each worker also runs one ffmpeg process while decoding.

use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;
use vidproof::{FfmpegSource, NoFaceDetector, ScoreReport, Scorer, ScoringConfig};

#[derive(Serialize)]
struct ItemOut {
    file: String,
    #[serde(flatten)]
    report: Option<ScoreReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn percentile(mut xs: Vec<f64>, p: f64) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((xs.len() - 1) as f64 * p.clamp(0.0, 1.0)).round() as usize;
    Some(xs[idx.min(xs.len() - 1)])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut config = ScoringConfig::default();
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--stride" => {
                config.frame_stride = args
                    .first()
                    .ok_or("--stride requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: score_batch [--jobs N] [--json] [--stride N] <file1> <file2> ...\n\
                     \n\
                     --jobs N     Parallel workers (default: CPU-1)\n\
                     --json       Emit one JSON object per line (JSONL)\n\
                     --stride N   Analyze every Nth frame (default: 10)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one video file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let scorer = Scorer::new(NoFaceDetector, config)?;

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| match scorer.score(&FfmpegSource::new(path)) {
                Ok(report) => ItemOut {
                    file: path.clone(),
                    report: Some(report),
                    error: None,
                },
                Err(e) => ItemOut {
                    file: path.clone(),
                    report: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match (&o.report, &o.error) {
            (Some(r), _) => println!(
                "[{}/{}] {}: score={:.3} {} (conf={:.2}) facial={:.3} frequency={:.3} audio_visual={:.3} time={:.2}ms",
                idx + 1,
                outs.len(),
                o.file,
                r.final_score,
                r.interpretation.verdict,
                r.interpretation.confidence,
                r.component_scores.facial,
                r.component_scores.frequency,
                r.component_scores.audio_visual,
                r.metadata.processing_time_ms
            ),
            (None, err) => println!(
                "[{}/{}] {}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.file,
                err.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let ok_times: Vec<f64> = outs
        .iter()
        .filter_map(|o| o.report.as_ref())
        .map(|r| r.metadata.processing_time_ms)
        .collect();
    let wall_ms = t0.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok_times.len(),
        outs.len(),
        wall_ms
    );
    if !ok_times.is_empty() {
        let mean = ok_times.iter().sum::<f64>() / ok_times.len() as f64;
        let p50 = percentile(ok_times.clone(), 0.50).unwrap_or(mean);
        let p90 = percentile(ok_times.clone(), 0.90).unwrap_or(mean);
        let max = ok_times.iter().cloned().fold(0.0, f64::max);
        eprintln!(
            "processing_time_ms: mean={:.2} p50={:.2} p90={:.2} max={:.2}",
            mean, p50, p90, max
        );
    }

    Ok(())
}
