//! Trace sample reading and decoding.
//!
//! A [`TraceRecord`] pins down where one trace lives in the file; records
//! are produced by the open-time scan, which accumulates real byte strides
//! so per-trace sample-count overrides keep every offset exact.

use byteorder::{BigEndian, ByteOrder};
use std::fs::File;

use crate::error::{Result, SegyError};
use crate::header::SampleFormat;
use crate::io::read_up_to_at;
use crate::TRACE_HEADER_LEN;

/// Location and shape of one trace in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Absolute byte offset of this trace's 240-byte header
    pub offset: u64,
    /// Resolved sample count (per-trace override or file default)
    pub samples: usize,
}

impl TraceRecord {
    /// Absolute byte offset of this trace's first sample
    pub fn data_offset(&self) -> u64 {
        self.offset + TRACE_HEADER_LEN as u64
    }
}

/// Reads and decodes trace samples via positioned I/O.
pub struct TraceReader<'a> {
    file: &'a File,
    format: SampleFormat,
}

impl<'a> TraceReader<'a> {
    pub fn new(file: &'a File, format: SampleFormat) -> Self {
        Self { file, format }
    }

    /// Read one trace's samples as `f32`.
    ///
    /// Fails with [`SegyError::TruncatedTrace`] when the file holds fewer
    /// bytes than the record declares. `index` only labels the error.
    pub fn read(&self, index: usize, record: &TraceRecord) -> Result<Vec<f32>> {
        let expected = record.samples * self.format.bytes_per_sample();
        let mut bytes = vec![0u8; expected];

        let actual = read_up_to_at(self.file, &mut bytes, record.data_offset())?;
        if actual < expected {
            return Err(SegyError::TruncatedTrace {
                index,
                expected,
                actual,
            });
        }

        Ok(decode_samples(&bytes, self.format))
    }
}

/// Decode raw big-endian sample bytes into `f32`.
///
/// `bytes.len()` must be a multiple of the format's sample width; the open
/// scan and [`TraceReader::read`] guarantee that.
pub fn decode_samples(bytes: &[u8], format: SampleFormat) -> Vec<f32> {
    match format {
        SampleFormat::IbmFloat32 => bytes
            .chunks_exact(4)
            .map(|c| ibm_to_f32(BigEndian::read_u32(c)))
            .collect(),
        SampleFormat::IeeeFloat32 => bytes
            .chunks_exact(4)
            .map(BigEndian::read_f32)
            .collect(),
        SampleFormat::Int32 => bytes
            .chunks_exact(4)
            .map(|c| BigEndian::read_i32(c) as f32)
            .collect(),
        SampleFormat::Int16 => bytes
            .chunks_exact(2)
            .map(|c| BigEndian::read_i16(c) as f32)
            .collect(),
        SampleFormat::Int8 => bytes.iter().map(|&b| b as i8 as f32).collect(),
    }
}

/// Convert a 32-bit IBM float (base-16 exponent, excess-64) to IEEE `f32`.
///
/// value = (-1)^sign x 16^(exponent - 64) x fraction / 2^24, equivalent to
/// rebasing the exponent as 4 x (exponent - 64) with the mantissa scaled by
/// 2^-24. The intermediate runs in `f64`: IBM's range exceeds `f32`, and
/// narrowing only at the end keeps subnormal results exact.
pub fn ibm_to_f32(bits: u32) -> f32 {
    let fraction = bits & 0x00ff_ffff;
    if fraction == 0 {
        return 0.0;
    }

    let sign = if bits & 0x8000_0000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 24) & 0x7f) as i32 - 64;
    let mantissa = f64::from(fraction) / f64::from(1u32 << 24);

    (sign * mantissa * 16f64.powi(exponent)) as f32
}
