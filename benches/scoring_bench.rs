//! Performance benchmarks for media scoring

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{GrayImage, Rgb, RgbImage};
use vidproof::features::spectral::fft2d::Fft2d;
use vidproof::{
    AudioTrack, DecodedMedia, FaceBox, FrameSequence, Scorer, ScorerError, ScoringConfig,
};

fn synthetic_media(frames: usize, width: u32, height: u32) -> DecodedMedia {
    let frames: Vec<RgbImage> = (0..frames as u32)
        .map(|i| {
            RgbImage::from_fn(width, height, |x, y| {
                let v = ((x * 7 + y * 13 + i * 5) % 256) as u8;
                Rgb([v, v / 2, 255 - v])
            })
        })
        .collect();
    let samples: Vec<f32> = (0..16000 * 10)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 16000.0).sin() * 0.5)
        .collect();

    DecodedMedia::new(
        FrameSequence::new(frames).expect("equal frame sizes"),
        Some(AudioTrack::mono(16000, samples)),
    )
}

fn centred_face(image: &GrayImage) -> Result<Vec<FaceBox>, ScorerError> {
    let (w, h) = image.dimensions();
    Ok(vec![FaceBox::new((w / 4) as i32, (h / 4) as i32, w / 2, h / 2)])
}

fn bench_score_media(c: &mut Criterion) {
    // 10 seconds at 25 fps, 320x240
    let media = synthetic_media(250, 320, 240);

    let sequential = Scorer::new(centred_face, ScoringConfig::default()).unwrap();
    let parallel = Scorer::new(
        centred_face,
        ScoringConfig {
            parallel: true,
            ..Default::default()
        },
    )
    .unwrap();

    c.bench_function("score_media_250f_320x240", |b| {
        b.iter(|| sequential.score_media(black_box(&media)));
    });
    c.bench_function("score_media_250f_320x240_parallel", |b| {
        b.iter(|| parallel.score_media(black_box(&media)));
    });
}

fn bench_fft2d(c: &mut Criterion) {
    let gray = GrayImage::from_fn(640, 480, |x, y| image::Luma([((x ^ y) % 256) as u8]));
    let fft = Fft2d::new(640, 480).unwrap();

    c.bench_function("log_magnitude_spectrum_640x480", |b| {
        b.iter(|| fft.log_magnitude_spectrum(black_box(&gray)).unwrap());
    });
}

criterion_group!(benches, bench_score_media, bench_fft2d);
criterion_main!(benches);
