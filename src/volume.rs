//! Volume access - the façade owning an open SEG-Y file and its index.

use bytes::Bytes;
use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, SegyError};
use crate::geometry::GeometryIndex;
use crate::header::{decode_text_header, BinaryHeader, SampleFormat, TraceHeader};
use crate::normalize::normalize;
use crate::slice::{extract_slice, Slice, SliceAxis};
use crate::trace::{TraceReader, TraceRecord};
use crate::{BINARY_HEADER_LEN, DATA_START, TEXT_HEADER_LEN, TRACE_HEADER_LEN};

/// One fully opened volume: file handle, decoded headers, trace records,
/// and geometry index.
///
/// Everything here is immutable after [`VolumeHandle::open`] returns, so any
/// number of threads may read through one handle concurrently; sample reads
/// go through positioned I/O and never share a cursor.
pub struct VolumeHandle {
    file: File,
    text_raw: Bytes,
    text_lines: Vec<String>,
    header: BinaryHeader,
    records: Vec<TraceRecord>,
    geometry: GeometryIndex,
}

impl VolumeHandle {
    /// Open a SEG-Y file: decode the file headers, scan every trace header,
    /// and build the geometry index.
    ///
    /// The scan accumulates real byte strides, so per-trace sample-count
    /// overrides keep every [`TraceRecord`] offset exact. Any failure here
    /// surfaces before the handle exists; there is no partially-open state.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();

        if file_len < DATA_START {
            return Err(SegyError::MalformedHeader(format!(
                "file is {} bytes, smaller than the {} byte SEG-Y header region",
                file_len, DATA_START
            )));
        }

        // The open-time scan is the only cursor-based read; per-request
        // access is positioned-only.
        let mut reader = BufReader::new(&file);

        let mut text_raw = vec![0u8; TEXT_HEADER_LEN];
        reader.read_exact(&mut text_raw)?;
        let text_lines = decode_text_header(&text_raw)?;

        let mut binary_raw = vec![0u8; BINARY_HEADER_LEN];
        reader.read_exact(&mut binary_raw)?;
        let header = BinaryHeader::decode(&binary_raw)?;

        let bytes_per_sample = header.sample_format.bytes_per_sample();
        let mut records = Vec::new();
        let mut trace_headers = Vec::new();
        let mut header_buf = [0u8; TRACE_HEADER_LEN];
        let mut offset = DATA_START;

        while offset < file_len {
            let index = records.len();

            if offset + TRACE_HEADER_LEN as u64 > file_len {
                return Err(SegyError::TruncatedTrace {
                    index,
                    expected: TRACE_HEADER_LEN,
                    actual: (file_len - offset) as usize,
                });
            }
            reader.read_exact(&mut header_buf)?;
            let trace_header = TraceHeader::decode(&header_buf)?;

            let samples = trace_header.sample_count(header.samples_per_trace);
            let data_len = (samples * bytes_per_sample) as u64;
            let data_start = offset + TRACE_HEADER_LEN as u64;
            if data_start + data_len > file_len {
                return Err(SegyError::TruncatedTrace {
                    index,
                    expected: samples * bytes_per_sample,
                    actual: (file_len - data_start) as usize,
                });
            }

            records.push(TraceRecord { offset, samples });
            trace_headers.push(trace_header);
            reader.seek_relative(data_len as i64)?;
            offset = data_start + data_len;
        }

        debug!(
            "scanned {} trace headers from {}",
            records.len(),
            path.display()
        );

        let geometry = GeometryIndex::build(&trace_headers)?;

        info!(
            "opened volume {}: {} traces, {} inlines x {} crosslines, {} samples/trace ({})",
            path.display(),
            records.len(),
            geometry.inlines().len(),
            geometry.crosslines().len(),
            header.samples_per_trace,
            header.sample_format,
        );

        Ok(Self {
            file,
            text_raw: Bytes::from(text_raw),
            text_lines,
            header,
            records,
            geometry,
        })
    }

    /// Decoded binary file header
    pub fn header(&self) -> &BinaryHeader {
        &self.header
    }

    /// Geometry index over (inline, crossline) positions
    pub fn geometry(&self) -> &GeometryIndex {
        &self.geometry
    }

    /// Raw 3200-byte textual header
    pub fn text_raw(&self) -> &Bytes {
        &self.text_raw
    }

    /// Textual header as forty 80-column display lines
    pub fn text_lines(&self) -> &[String] {
        &self.text_lines
    }

    /// Number of traces in the file
    pub fn num_traces(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn record(&self, index: usize) -> &TraceRecord {
        &self.records[index]
    }

    pub(crate) fn trace_reader(&self) -> TraceReader<'_> {
        TraceReader::new(&self.file, self.header.sample_format)
    }

    /// Fixed-field metadata summary for the transport boundary
    pub fn summary(&self) -> VolumeSummary {
        VolumeSummary {
            num_traces: self.records.len(),
            samples_per_trace: self.header.samples_per_trace,
            sample_rate_us: self.header.sample_rate_us(),
            sample_format: self.header.sample_format,
            num_inlines: self.geometry.inlines().len(),
            num_crosslines: self.geometry.crosslines().len(),
            inlines: self.geometry.inlines().to_vec(),
            crosslines: self.geometry.crosslines().to_vec(),
            text_header: self.text_lines.clone(),
        }
    }
}

/// Metadata summary of an open volume.
///
/// Fixed fields throughout; values a file may lack (sample rate with a
/// single sample per trace) are explicit options, never missing keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub num_traces: usize,
    pub samples_per_trace: usize,
    pub sample_rate_us: Option<u32>,
    pub sample_format: SampleFormat,
    pub num_inlines: usize,
    pub num_crosslines: usize,
    pub inlines: Vec<i32>,
    pub crosslines: Vec<i32>,
    pub text_header: Vec<String>,
}

/// Main interface for serving one active volume.
///
/// Holds at most one open [`VolumeHandle`] behind a single-writer slot.
/// `open`/`replace` build the new handle completely off to the side and then
/// perform one atomic swap, so a failed open never disturbs the volume that
/// is already being served, and in-flight reads against a superseded handle
/// complete normally.
pub struct VolumeAccessor {
    current: RwLock<Option<Arc<VolumeHandle>>>,
}

impl VolumeAccessor {
    /// Create an accessor in the `Closed` state
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Open the volume at `path` and make it the active one.
    ///
    /// On failure the accessor keeps its previous state: still closed if it
    /// was closed, still serving the old volume if one was open.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<()> {
        let handle = Arc::new(VolumeHandle::open(path)?);

        let mut slot = self.current.write();
        if slot.replace(handle).is_some() {
            debug!("previous volume handle superseded");
        }
        Ok(())
    }

    /// Atomically swap to the volume at `path`.
    ///
    /// The old handle remains servable until the new one has fully opened;
    /// it is discarded only on success.
    pub fn replace(&self, path: impl AsRef<Path>) -> Result<()> {
        self.open(path)
    }

    /// Drop the active volume, returning to `Closed`
    pub fn close(&self) {
        self.current.write().take();
    }

    /// Whether a volume is currently open
    pub fn is_open(&self) -> bool {
        self.current.read().is_some()
    }

    /// Metadata summary of the active volume
    pub fn metadata(&self) -> Result<VolumeSummary> {
        Ok(self.handle()?.summary())
    }

    /// Extract and normalize the slice at `value` along `axis`
    pub fn slice(&self, axis: SliceAxis, value: i32) -> Result<Slice> {
        let handle = self.handle()?;
        let slice = extract_slice(&handle, axis, value)?;
        Ok(normalize(slice))
    }

    fn handle(&self) -> Result<Arc<VolumeHandle>> {
        self.current.read().clone().ok_or(SegyError::VolumeNotOpen)
    }
}

impl Default for VolumeAccessor {
    fn default() -> Self {
        Self::new()
    }
}
