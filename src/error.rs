//! Error types for SEG-Y volume operations

use thiserror::Error;

use crate::slice::SliceAxis;

/// Main error type for SEG-Y volume operations
#[derive(Error, Debug)]
pub enum SegyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unsupported sample format code: {0}")]
    UnsupportedFormat(u16),

    #[error("truncated trace {index}: expected {expected} bytes, got {actual}")]
    TruncatedTrace {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("volume contains no traces")]
    EmptyVolume,

    #[error("no {axis} with value {value} in volume geometry")]
    AxisValueNotFound { axis: SliceAxis, value: i32 },

    #[error("no volume is open")]
    VolumeNotOpen,
}

/// Specialized Result type for SEG-Y volume operations
pub type Result<T> = std::result::Result<T, SegyError>;
