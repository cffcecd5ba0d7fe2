//! SEG-Y header decoding.
//!
//! All multi-byte fields are big-endian (network order) per the SEG-Y
//! exchange convention. Decoders are pure transforms over fixed-size byte
//! buffers; the caller is responsible for reading the right region of the
//! file.

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SegyError};
use crate::{BINARY_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN};

/// Binary file header field byte offsets (within the 400-byte header).
mod binary_offsets {
    pub const TRACES_PER_ENSEMBLE: usize = 12;
    pub const SAMPLE_INTERVAL: usize = 16;
    pub const SAMPLES_PER_TRACE: usize = 20;
    pub const FORMAT_CODE: usize = 24;
}

/// Trace header field byte offsets (within the 240-byte header).
mod trace_offsets {
    pub const SAMPLES_THIS_TRACE: usize = 114;
    pub const INLINE: usize = 188;
    pub const CROSSLINE: usize = 192;
}

/// Sample encodings supported by the reader.
///
/// The set is closed: any other format code in the binary header fails with
/// [`SegyError::UnsupportedFormat`] rather than silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum SampleFormat {
    /// 4-byte IBM floating point (base-16 exponent)
    IbmFloat32 = 1,
    /// 4-byte two's complement integer
    Int32 = 2,
    /// 2-byte two's complement integer
    Int16 = 3,
    /// 4-byte IEEE 754 floating point
    IeeeFloat32 = 5,
    /// 1-byte two's complement integer
    Int8 = 8,
}

impl SampleFormat {
    /// Parse from the binary-header format code
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            1 => Ok(SampleFormat::IbmFloat32),
            2 => Ok(SampleFormat::Int32),
            3 => Ok(SampleFormat::Int16),
            5 => Ok(SampleFormat::IeeeFloat32),
            8 => Ok(SampleFormat::Int8),
            other => Err(SegyError::UnsupportedFormat(other)),
        }
    }

    /// Size in bytes of one sample in this encoding
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleFormat::IbmFloat32 | SampleFormat::Int32 | SampleFormat::IeeeFloat32 => 4,
            SampleFormat::Int16 => 2,
            SampleFormat::Int8 => 1,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Decoded binary file header.
///
/// Immutable once read; only the fields the engine consumes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryHeader {
    /// Sample encoding of every trace in the file
    pub sample_format: SampleFormat,
    /// File-level default number of samples per trace
    pub samples_per_trace: usize,
    /// Sample interval in microseconds
    pub sample_interval_us: u16,
    /// Data traces per ensemble (trace count hint, informational only)
    pub traces_per_ensemble: u16,
}

impl BinaryHeader {
    /// Decode the 400-byte binary file header
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BINARY_HEADER_LEN {
            return Err(SegyError::MalformedHeader(format!(
                "binary header must be {} bytes, got {}",
                BINARY_HEADER_LEN,
                bytes.len()
            )));
        }

        let format_code = BigEndian::read_u16(&bytes[binary_offsets::FORMAT_CODE..]);
        let sample_format = SampleFormat::from_code(format_code)?;

        let samples_per_trace =
            BigEndian::read_u16(&bytes[binary_offsets::SAMPLES_PER_TRACE..]) as usize;
        if samples_per_trace == 0 {
            return Err(SegyError::MalformedHeader(
                "samples per trace is zero".to_string(),
            ));
        }

        Ok(Self {
            sample_format,
            samples_per_trace,
            sample_interval_us: BigEndian::read_u16(&bytes[binary_offsets::SAMPLE_INTERVAL..]),
            traces_per_ensemble: BigEndian::read_u16(&bytes[binary_offsets::TRACES_PER_ENSEMBLE..]),
        })
    }

    /// Sample interval as an explicit optional value.
    ///
    /// `None` when the file cannot express a rate (fewer than two samples
    /// per trace, or an unset interval field).
    pub fn sample_rate_us(&self) -> Option<u32> {
        if self.samples_per_trace > 1 && self.sample_interval_us > 0 {
            Some(u32::from(self.sample_interval_us))
        } else {
            None
        }
    }
}

/// Decoded per-trace header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceHeader {
    /// Inline number of this trace
    pub inline: i32,
    /// Crossline number of this trace
    pub crossline: i32,
    /// Per-trace sample count override; `None` means use the file default
    pub samples: Option<usize>,
}

impl TraceHeader {
    /// Decode a 240-byte trace header
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TRACE_HEADER_LEN {
            return Err(SegyError::MalformedHeader(format!(
                "trace header must be {} bytes, got {}",
                TRACE_HEADER_LEN,
                bytes.len()
            )));
        }

        let samples = BigEndian::read_u16(&bytes[trace_offsets::SAMPLES_THIS_TRACE..]);

        Ok(Self {
            inline: BigEndian::read_i32(&bytes[trace_offsets::INLINE..]),
            crossline: BigEndian::read_i32(&bytes[trace_offsets::CROSSLINE..]),
            samples: (samples > 0).then_some(samples as usize),
        })
    }

    /// Sample count for this trace given the file-level default
    pub fn sample_count(&self, file_default: usize) -> usize {
        self.samples.unwrap_or(file_default)
    }
}

/// Decode the 3200-byte textual header into forty 80-column display lines.
///
/// The textual header is informational only. Historical files carry it in
/// EBCDIC, newer ones in ASCII; the encoding is detected from the ratio of
/// printable ASCII bytes. Bytes with no printable mapping render as spaces.
pub fn decode_text_header(bytes: &[u8]) -> Result<Vec<String>> {
    if bytes.len() != TEXT_HEADER_LEN {
        return Err(SegyError::MalformedHeader(format!(
            "textual header must be {} bytes, got {}",
            TEXT_HEADER_LEN,
            bytes.len()
        )));
    }

    let printable = bytes
        .iter()
        .filter(|&&b| (0x20..=0x7e).contains(&b))
        .count();
    let is_ascii = printable * 4 >= bytes.len() * 3;

    let lines = bytes
        .chunks(80)
        .map(|line| {
            line.iter()
                .map(|&b| {
                    if is_ascii {
                        if (0x20..=0x7e).contains(&b) {
                            b as char
                        } else {
                            ' '
                        }
                    } else {
                        ebcdic_to_ascii(b)
                    }
                })
                .collect::<String>()
        })
        .collect();

    Ok(lines)
}

/// Map one EBCDIC (code page 037) byte to its printable ASCII equivalent.
fn ebcdic_to_ascii(b: u8) -> char {
    match b {
        0x40 => ' ',
        0x4b => '.',
        0x4c => '<',
        0x4d => '(',
        0x4e => '+',
        0x4f => '|',
        0x50 => '&',
        0x5a => '!',
        0x5b => '$',
        0x5c => '*',
        0x5d => ')',
        0x5e => ';',
        0x60 => '-',
        0x61 => '/',
        0x6b => ',',
        0x6c => '%',
        0x6d => '_',
        0x6e => '>',
        0x6f => '?',
        0x7a => ':',
        0x7b => '#',
        0x7c => '@',
        0x7d => '\'',
        0x7e => '=',
        0x7f => '"',
        0x81..=0x89 => (b'a' + (b - 0x81)) as char,
        0x91..=0x99 => (b'j' + (b - 0x91)) as char,
        0xa2..=0xa9 => (b's' + (b - 0xa2)) as char,
        0xc1..=0xc9 => (b'A' + (b - 0xc1)) as char,
        0xd1..=0xd9 => (b'J' + (b - 0xd1)) as char,
        0xe2..=0xe9 => (b'S' + (b - 0xe2)) as char,
        0xf0..=0xf9 => (b'0' + (b - 0xf0)) as char,
        _ => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, ByteOrder};

    fn binary_header_bytes(format: u16, samples: u16, interval: u16) -> Vec<u8> {
        let mut bytes = vec![0u8; BINARY_HEADER_LEN];
        BigEndian::write_u16(&mut bytes[binary_offsets::FORMAT_CODE..], format);
        BigEndian::write_u16(&mut bytes[binary_offsets::SAMPLES_PER_TRACE..], samples);
        BigEndian::write_u16(&mut bytes[binary_offsets::SAMPLE_INTERVAL..], interval);
        bytes
    }

    #[test]
    fn test_sample_format_codes() {
        assert_eq!(SampleFormat::from_code(1).unwrap(), SampleFormat::IbmFloat32);
        assert_eq!(SampleFormat::from_code(2).unwrap(), SampleFormat::Int32);
        assert_eq!(SampleFormat::from_code(3).unwrap(), SampleFormat::Int16);
        assert_eq!(SampleFormat::from_code(5).unwrap(), SampleFormat::IeeeFloat32);
        assert_eq!(SampleFormat::from_code(8).unwrap(), SampleFormat::Int8);

        // Fixed-gain and obsolete codes are outside the closed set
        for code in [0u16, 4, 6, 7, 9, 12, 255] {
            assert!(matches!(
                SampleFormat::from_code(code),
                Err(SegyError::UnsupportedFormat(c)) if c == code
            ));
        }
    }

    #[test]
    fn test_bytes_per_sample() {
        assert_eq!(SampleFormat::IbmFloat32.bytes_per_sample(), 4);
        assert_eq!(SampleFormat::Int32.bytes_per_sample(), 4);
        assert_eq!(SampleFormat::Int16.bytes_per_sample(), 2);
        assert_eq!(SampleFormat::IeeeFloat32.bytes_per_sample(), 4);
        assert_eq!(SampleFormat::Int8.bytes_per_sample(), 1);
    }

    #[test]
    fn test_binary_header_decode() {
        let bytes = binary_header_bytes(5, 1500, 2000);
        let header = BinaryHeader::decode(&bytes).unwrap();
        assert_eq!(header.sample_format, SampleFormat::IeeeFloat32);
        assert_eq!(header.samples_per_trace, 1500);
        assert_eq!(header.sample_interval_us, 2000);
        assert_eq!(header.sample_rate_us(), Some(2000));
    }

    #[test]
    fn test_binary_header_wrong_length() {
        let err = BinaryHeader::decode(&[0u8; 399]).unwrap_err();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }

    #[test]
    fn test_binary_header_zero_samples() {
        let bytes = binary_header_bytes(5, 0, 2000);
        let err = BinaryHeader::decode(&bytes).unwrap_err();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }

    #[test]
    fn test_binary_header_unknown_format() {
        let bytes = binary_header_bytes(4, 1500, 2000);
        let err = BinaryHeader::decode(&bytes).unwrap_err();
        assert!(matches!(err, SegyError::UnsupportedFormat(4)));
    }

    #[test]
    fn test_sample_rate_optional_when_single_sample() {
        let bytes = binary_header_bytes(5, 1, 2000);
        let header = BinaryHeader::decode(&bytes).unwrap();
        assert_eq!(header.sample_rate_us(), None);
    }

    #[test]
    fn test_trace_header_decode() {
        let mut bytes = vec![0u8; TRACE_HEADER_LEN];
        BigEndian::write_i32(&mut bytes[trace_offsets::INLINE..], 2150);
        BigEndian::write_i32(&mut bytes[trace_offsets::CROSSLINE..], -12);
        BigEndian::write_u16(&mut bytes[trace_offsets::SAMPLES_THIS_TRACE..], 800);

        let header = TraceHeader::decode(&bytes).unwrap();
        assert_eq!(header.inline, 2150);
        assert_eq!(header.crossline, -12);
        assert_eq!(header.samples, Some(800));
        assert_eq!(header.sample_count(1500), 800);
    }

    #[test]
    fn test_trace_header_default_samples() {
        let mut bytes = vec![0u8; TRACE_HEADER_LEN];
        BigEndian::write_i32(&mut bytes[trace_offsets::INLINE..], 100);
        BigEndian::write_i32(&mut bytes[trace_offsets::CROSSLINE..], 10);

        let header = TraceHeader::decode(&bytes).unwrap();
        assert_eq!(header.samples, None);
        assert_eq!(header.sample_count(1500), 1500);
    }

    #[test]
    fn test_trace_header_wrong_length() {
        let err = TraceHeader::decode(&[0u8; 240 - 1]).unwrap_err();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }

    #[test]
    fn test_text_header_ascii() {
        let mut bytes = vec![b' '; TEXT_HEADER_LEN];
        bytes[..3].copy_from_slice(b"C01");
        let lines = decode_text_header(&bytes).unwrap();
        assert_eq!(lines.len(), 40);
        assert_eq!(lines[0].len(), 80);
        assert!(lines[0].starts_with("C01"));
    }

    #[test]
    fn test_text_header_ebcdic() {
        // "C01 CLIENT" in EBCDIC, rest of the header EBCDIC spaces
        let mut bytes = vec![0x40u8; TEXT_HEADER_LEN];
        for (i, &b) in [0xc3, 0xf0, 0xf1, 0x40, 0xc3, 0xd3, 0xc9, 0xc5, 0xd5, 0xe3]
            .iter()
            .enumerate()
        {
            bytes[i] = b;
        }
        let lines = decode_text_header(&bytes).unwrap();
        assert!(lines[0].starts_with("C01 CLIENT"));
    }

    #[test]
    fn test_text_header_wrong_length() {
        let err = decode_text_header(&[0u8; 100]).unwrap_err();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }
}
