//! Face-region detector boundary

use crate::error::ScorerError;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned face bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Box width
    pub width: u32,
    /// Box height
    pub height: u32,
}

impl FaceBox {
    /// Create a box from `(x, y, width, height)`
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box area in square pixels
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// Finds faces in a grayscale image
///
/// Zero boxes is a normal result for a face-free image, not an error. Errors
/// are reserved for detector malfunction (model failed to run).
pub trait FaceDetector: Send + Sync {
    /// Detect face regions in `image`
    fn detect(&self, image: &GrayImage) -> Result<Vec<FaceBox>, ScorerError>;
}

impl<F> FaceDetector for F
where
    F: Fn(&GrayImage) -> Result<Vec<FaceBox>, ScorerError> + Send + Sync,
{
    fn detect(&self, image: &GrayImage) -> Result<Vec<FaceBox>, ScorerError> {
        self(image)
    }
}

/// Detector that never finds a face
///
/// Used when no detection backend is compiled in; the facial analyzer then
/// reports its neutral score.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaceDetector;

impl FaceDetector for NoFaceDetector {
    fn detect(&self, _image: &GrayImage) -> Result<Vec<FaceBox>, ScorerError> {
        Ok(Vec::new())
    }
}
