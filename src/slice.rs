//! Slice extraction - assembling 2D amplitude sections from the volume.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SegyError};
use crate::volume::VolumeHandle;

/// A 2D amplitude section: rows are sample depths, columns follow the
/// perpendicular axis's distinct values in ascending order.
pub type Slice = Array2<f32>;

/// Axis a slice is taken along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceAxis {
    Inline,
    Crossline,
}

impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceAxis::Inline => write!(f, "inline"),
            SliceAxis::Crossline => write!(f, "crossline"),
        }
    }
}

/// Extract the 2D section at `value` along `axis`.
///
/// `value` must be a member of the axis's distinct set, else
/// [`SegyError::AxisValueNotFound`]. Positions with no trace (sparse
/// geometry) yield all-zero columns rather than an error; a trace shorter
/// than the file-level sample count fills what it has, remainder zero.
pub fn extract_slice(volume: &VolumeHandle, axis: SliceAxis, value: i32) -> Result<Slice> {
    let geometry = volume.geometry();

    let known = match axis {
        SliceAxis::Inline => geometry.has_inline(value),
        SliceAxis::Crossline => geometry.has_crossline(value),
    };
    if !known {
        return Err(SegyError::AxisValueNotFound { axis, value });
    }

    let positions = match axis {
        SliceAxis::Inline => geometry.crosslines(),
        SliceAxis::Crossline => geometry.inlines(),
    };

    let n_samples = volume.header().samples_per_trace;
    let mut slice = Array2::zeros((n_samples, positions.len()));
    let reader = volume.trace_reader();

    for (col, &position) in positions.iter().enumerate() {
        let (inline, crossline) = match axis {
            SliceAxis::Inline => (value, position),
            SliceAxis::Crossline => (position, value),
        };

        let Some(trace_index) = geometry.lookup(inline, crossline) else {
            continue; // gap in the survey, column stays zero
        };

        let samples = reader.read(trace_index, volume.record(trace_index))?;
        let rows = samples.len().min(n_samples);
        for (row, &sample) in samples[..rows].iter().enumerate() {
            slice[[row, col]] = sample;
        }
    }

    Ok(slice)
}

/// Row-major nested vectors, the shape the transport serializes to JSON.
pub fn slice_to_rows(slice: &Slice) -> Vec<Vec<f32>> {
    slice.rows().into_iter().map(|row| row.to_vec()).collect()
}
