//! Facial stability analysis
//!
//! - Detector boundary (`FaceDetector`, `FaceBox`)
//! - Per-frame face-area consistency
//! - Optional OpenCV Haar cascade backend (`opencv` feature)

pub mod detector;
#[cfg(feature = "opencv")]
pub mod haar;
pub mod stability;

pub use detector::{FaceBox, FaceDetector, NoFaceDetector};
#[cfg(feature = "opencv")]
pub use haar::HaarCascadeDetector;
pub use stability::measure_facial_stability;
