//! Frame sampling policy
//!
//! The per-frame visual analyzers look at every Nth frame starting at 0.
//! Neighbouring frames are highly correlated, so a stride keeps coverage of the
//! whole clip while cutting the number of detector and FFT passes by N.

/// Indices `0, stride, 2*stride, ...` below `len`
///
/// A stride of 0 is treated as 1 so the iterator always terminates;
/// `ScoringConfig::validate` rejects 0 before it gets here.
pub fn sample_indices(len: usize, stride: usize) -> impl Iterator<Item = usize> {
    (0..len).step_by(stride.max(1))
}

/// Number of indices `sample_indices(len, stride)` yields
pub fn sampled_count(len: usize, stride: usize) -> usize {
    let stride = stride.max(1);
    len.div_ceil(stride)
}
