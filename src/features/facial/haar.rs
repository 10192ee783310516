//! OpenCV Haar cascade face detector
//!
//! Requires the `opencv` feature and a cascade XML file such as
//! `haarcascade_frontalface_default.xml` from the OpenCV data directory.

use super::detector::{FaceBox, FaceDetector};
use crate::error::ScorerError;
use image::GrayImage;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use std::path::Path;
use std::sync::Mutex;

/// Scale step between detection passes
pub const DEFAULT_SCALE_FACTOR: f64 = 1.3;

/// Neighbouring detections needed to keep a candidate
pub const DEFAULT_MIN_NEIGHBORS: i32 = 5;

/// Haar cascade detector backed by `cv::CascadeClassifier`
///
/// OpenCV's classifier needs `&mut self` to run, so it sits behind a mutex;
/// concurrent callers serialize on detection.
pub struct HaarCascadeDetector {
    classifier: Mutex<CascadeClassifier>,
    scale_factor: f64,
    min_neighbors: i32,
}

impl HaarCascadeDetector {
    /// Load a cascade from `path` with the default parameters
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ScorerError> {
        Self::with_params(path, DEFAULT_SCALE_FACTOR, DEFAULT_MIN_NEIGHBORS)
    }

    /// Load a cascade with explicit scale factor and neighbour count
    pub fn with_params(
        path: impl AsRef<Path>,
        scale_factor: f64,
        min_neighbors: i32,
    ) -> Result<Self, ScorerError> {
        let path = path.as_ref();
        let path_str = path.to_str().ok_or_else(|| {
            ScorerError::InvalidInput(format!("Cascade path is not UTF-8: {}", path.display()))
        })?;

        let classifier = CascadeClassifier::new(path_str).map_err(|e| {
            ScorerError::SourceUnavailable(format!("Cannot load cascade {}: {}", path_str, e))
        })?;

        let empty = classifier
            .empty()
            .map_err(|e| ScorerError::ProcessingError(e.to_string()))?;
        if empty {
            return Err(ScorerError::SourceUnavailable(format!(
                "Cascade {} contains no classifier stages",
                path_str
            )));
        }

        log::info!(
            "Haar cascade loaded: {} (scale={}, neighbors={})",
            path_str,
            scale_factor,
            min_neighbors
        );

        Ok(Self {
            classifier: Mutex::new(classifier),
            scale_factor,
            min_neighbors,
        })
    }
}

impl FaceDetector for HaarCascadeDetector {
    fn detect(&self, image: &GrayImage) -> Result<Vec<FaceBox>, ScorerError> {
        let to_err = |e: opencv::Error| ScorerError::ProcessingError(format!("OpenCV: {}", e));

        let (width, height) = image.dimensions();
        let view = Mat::new_rows_cols_with_data(height as i32, width as i32, image.as_raw())
            .map_err(to_err)?;
        let mat: Mat = view.try_clone().map_err(to_err)?;

        let mut faces = Vector::<Rect>::new();
        let mut classifier = self
            .classifier
            .lock()
            .map_err(|_| ScorerError::ProcessingError("Cascade lock poisoned".to_string()))?;
        classifier
            .detect_multi_scale(
                &mat,
                &mut faces,
                self.scale_factor,
                self.min_neighbors,
                0,
                Size::new(0, 0),
                Size::new(0, 0),
            )
            .map_err(to_err)?;

        Ok(faces
            .iter()
            .map(|r| FaceBox::new(r.x, r.y, r.width.max(0) as u32, r.height.max(0) as u32))
            .collect())
    }
}
