//! Two-dimensional FFT of grayscale frames
//!
//! Rows are transformed first, then columns (via a transpose so both passes
//! run on contiguous buffers). The zero-frequency bin is moved to the centre
//! with the same roll as `fftshift`.

use crate::error::ScorerError;
use image::GrayImage;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Planned forward 2D FFT for one frame size
///
/// Planning is the expensive part, so one instance is reused for every frame
/// of a sequence (all frames share dimensions).
pub struct Fft2d {
    width: usize,
    height: usize,
    row_fft: Arc<dyn Fft<f64>>,
    col_fft: Arc<dyn Fft<f64>>,
}

impl Fft2d {
    /// Plan transforms for `width` x `height` images
    pub fn new(width: usize, height: usize) -> Result<Self, ScorerError> {
        if width == 0 || height == 0 {
            return Err(ScorerError::InvalidInput(format!(
                "Cannot transform a {}x{} image",
                width, height
            )));
        }

        let mut planner = FftPlanner::<f64>::new();
        Ok(Self {
            width,
            height,
            row_fft: planner.plan_fft_forward(width),
            col_fft: planner.plan_fft_forward(height),
        })
    }

    /// Frame size this plan accepts
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Forward 2D DFT, row-major `height x width`, DC at index 0
    pub fn transform(&self, image: &GrayImage) -> Result<Vec<Complex<f64>>, ScorerError> {
        let (w, h) = (image.width() as usize, image.height() as usize);
        if (w, h) != (self.width, self.height) {
            return Err(ScorerError::InvalidInput(format!(
                "FFT planned for {}x{}, got {}x{}",
                self.width, self.height, w, h
            )));
        }

        let mut data: Vec<Complex<f64>> = image
            .as_raw()
            .iter()
            .map(|&p| Complex::new(p as f64, 0.0))
            .collect();

        // rustfft processes every `width`-long chunk in one call
        self.row_fft.process(&mut data);

        let mut columns = transpose(&data, w, h);
        self.col_fft.process(&mut columns);

        Ok(transpose(&columns, h, w))
    }

    /// `ln(|F| + 1)` of the centred spectrum
    pub fn log_magnitude_spectrum(&self, image: &GrayImage) -> Result<Vec<f64>, ScorerError> {
        let spectrum = self.transform(image)?;
        let shifted = fft_shift(&spectrum, self.width, self.height);
        Ok(shifted.iter().map(|c| (c.norm() + 1.0).ln()).collect())
    }
}

/// Transpose a row-major `rows x cols` buffer into `cols x rows`
fn transpose<T: Copy>(data: &[T], cols: usize, rows: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());
    for c in 0..cols {
        for r in 0..rows {
            out.push(data[r * cols + c]);
        }
    }
    out
}

/// Move the zero-frequency bin to the centre of a row-major spectrum
///
/// Element `(y, x)` lands at `((y + h/2) % h, (x + w/2) % w)`.
pub fn fft_shift<T: Copy + Default>(data: &[T], width: usize, height: usize) -> Vec<T> {
    let mut out = vec![T::default(); data.len()];
    let (dy, dx) = (height / 2, width / 2);
    for y in 0..height {
        let ny = (y + dy) % height;
        for x in 0..width {
            let nx = (x + dx) % width;
            out[ny * width + nx] = data[y * width + x];
        }
    }
    out
}
