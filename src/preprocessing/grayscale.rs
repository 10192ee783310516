//! RGB to single-channel luma conversion
//!
//! Uses BT.601 weights (0.299, 0.587, 0.114), the luma the Haar cascades were
//! trained on, with round-half-up integer arithmetic.

use image::{GrayImage, Luma, RgbImage};

/// Convert an RGB frame to 8-bit grayscale
pub fn to_grayscale(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
        Luma([luma as u8])
    })
}
