//! Spectral regularity analysis
//!
//! - 2D FFT with DC centring (`fft2d`)
//! - Log-spectrum dispersion score per frame (`regularity`)

pub mod fft2d;
pub mod regularity;

pub use regularity::measure_spectral_regularity;
