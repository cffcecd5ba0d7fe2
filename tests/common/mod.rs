//! Common test utilities: synthetic SEG-Y files built in memory.

#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder};
use std::io::Write;
use tempfile::NamedTempFile;

use segyview::{SampleFormat, BINARY_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN};

/// One trace to be written: position, optional per-trace sample-count
/// override, and amplitude data.
pub struct TraceSpec {
    pub inline: i32,
    pub crossline: i32,
    pub samples_override: Option<u16>,
    pub data: Vec<f32>,
}

/// Builds SEG-Y byte streams for tests.
pub struct SegyBuilder {
    format: SampleFormat,
    samples_per_trace: u16,
    sample_interval_us: u16,
    text: Vec<u8>,
    traces: Vec<TraceSpec>,
}

impl SegyBuilder {
    pub fn new(format: SampleFormat, samples_per_trace: u16) -> Self {
        let mut text = vec![b' '; TEXT_HEADER_LEN];
        text[..22].copy_from_slice(b"C01 SYNTHETIC TEST SET");
        Self {
            format,
            samples_per_trace,
            sample_interval_us: 2000,
            text,
            traces: Vec::new(),
        }
    }

    pub fn sample_interval_us(mut self, us: u16) -> Self {
        self.sample_interval_us = us;
        self
    }

    /// Add a trace carrying the file-level sample count
    pub fn trace(mut self, inline: i32, crossline: i32, data: &[f32]) -> Self {
        self.traces.push(TraceSpec {
            inline,
            crossline,
            samples_override: None,
            data: data.to_vec(),
        });
        self
    }

    /// Add a trace with its own sample-count override
    pub fn short_trace(mut self, inline: i32, crossline: i32, data: &[f32]) -> Self {
        self.traces.push(TraceSpec {
            inline,
            crossline,
            samples_override: Some(data.len() as u16),
            data: data.to_vec(),
        });
        self
    }

    /// Add a full inline x crossline grid; amplitude = f(inline, crossline, sample)
    pub fn grid(
        mut self,
        inlines: &[i32],
        crosslines: &[i32],
        amplitude: impl Fn(i32, i32, usize) -> f32,
    ) -> Self {
        for &il in inlines {
            for &xl in crosslines {
                let data: Vec<f32> = (0..self.samples_per_trace as usize)
                    .map(|s| amplitude(il, xl, s))
                    .collect();
                self = self.trace(il, xl, &data);
            }
        }
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut out = self.text.clone();

        let mut binary = vec![0u8; BINARY_HEADER_LEN];
        BigEndian::write_u16(&mut binary[16..], self.sample_interval_us);
        BigEndian::write_u16(&mut binary[20..], self.samples_per_trace);
        BigEndian::write_u16(&mut binary[24..], format_code(self.format));
        out.extend_from_slice(&binary);

        for spec in &self.traces {
            let mut header = vec![0u8; TRACE_HEADER_LEN];
            if let Some(samples) = spec.samples_override {
                BigEndian::write_u16(&mut header[114..], samples);
            }
            BigEndian::write_i32(&mut header[188..], spec.inline);
            BigEndian::write_i32(&mut header[192..], spec.crossline);
            out.extend_from_slice(&header);

            let declared = spec.samples_override.unwrap_or(self.samples_per_trace) as usize;
            for s in 0..declared {
                let value = spec.data.get(s).copied().unwrap_or(0.0);
                encode_sample(&mut out, value, self.format);
            }
        }

        out
    }

    /// Write the volume to a temp file
    pub fn write(&self) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&self.bytes()).unwrap();
        tmp
    }
}

fn format_code(format: SampleFormat) -> u16 {
    match format {
        SampleFormat::IbmFloat32 => 1,
        SampleFormat::Int32 => 2,
        SampleFormat::Int16 => 3,
        SampleFormat::IeeeFloat32 => 5,
        SampleFormat::Int8 => 8,
    }
}

fn encode_sample(out: &mut Vec<u8>, value: f32, format: SampleFormat) {
    match format {
        SampleFormat::IbmFloat32 => out.extend_from_slice(&encode_ibm(value).to_be_bytes()),
        SampleFormat::IeeeFloat32 => out.extend_from_slice(&value.to_be_bytes()),
        SampleFormat::Int32 => out.extend_from_slice(&(value as i32).to_be_bytes()),
        SampleFormat::Int16 => out.extend_from_slice(&(value as i16).to_be_bytes()),
        SampleFormat::Int8 => out.push(value as i8 as u8),
    }
}

/// Encode an IEEE `f32` as a 32-bit IBM float (base-16 exponent, excess-64).
pub fn encode_ibm(value: f32) -> u32 {
    if value == 0.0 {
        return 0;
    }

    let sign = if value.is_sign_negative() { 1u32 } else { 0 };
    let mut mantissa = f64::from(value.abs());
    let mut exponent = 0i32;

    while mantissa >= 1.0 {
        mantissa /= 16.0;
        exponent += 1;
    }
    while mantissa < 1.0 / 16.0 {
        mantissa *= 16.0;
        exponent -= 1;
    }

    let mut fraction = (mantissa * f64::from(1u32 << 24)).round() as u32;
    if fraction >= 1 << 24 {
        fraction >>= 4;
        exponent += 1;
    }

    (sign << 31) | (((exponent + 64) as u32 & 0x7f) << 24) | (fraction & 0x00ff_ffff)
}
