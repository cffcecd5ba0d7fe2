//! Amplitude normalization for display.
//!
//! Percentile clipping bounds outliers to the 1st/99th percentile before a
//! linear rescale into [0, 1]. The percentile method (exact rank selection
//! with linear interpolation between closest ranks) and the clip-then-rescale
//! order are part of the output contract: downstream visualization assumes
//! this exact distribution shaping, so neither may be approximated.

use crate::slice::Slice;

const LOW_PERCENTILE: f64 = 1.0;
const HIGH_PERCENTILE: f64 = 99.0;

/// Rescale a slice's amplitudes into [0, 1] with percentile clipping.
///
/// A degenerate slice (p99 == p1) maps to all zeros; a slice with no finite
/// values is returned unchanged. Non-finite values pass through untouched.
pub fn normalize(mut slice: Slice) -> Slice {
    let mut finite: Vec<f32> = slice.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return slice;
    }
    finite.sort_unstable_by(f32::total_cmp);

    let p1 = percentile(&finite, LOW_PERCENTILE);
    let p99 = percentile(&finite, HIGH_PERCENTILE);
    let span = if p99 > p1 { p99 - p1 } else { 1.0 };

    slice.mapv_inplace(|v| (v.clamp(p1, p99) - p1) / span);
    slice
}

/// Exact-rank percentile with linear interpolation between closest ranks.
///
/// `sorted` must be ascending and non-empty.
fn percentile(sorted: &[f32], q: f64) -> f32 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;

    (f64::from(sorted[lo]) * (1.0 - weight) + f64::from(sorted[hi]) * weight) as f32
}
