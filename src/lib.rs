//! SegyView - SEG-Y seismic volume access engine
//!
//! Decodes SEG-Y file and trace headers, builds an inline/crossline geometry
//! index, and serves display-ready 2D amplitude slices out of a 3D survey.
//!
//! # Features
//!
//! - Big-endian SEG-Y header decoding (textual, binary, and per-trace headers)
//! - IBM float, IEEE float, and integer sample encodings
//! - Geometry index tolerant of sparse/irregular trace layouts
//! - Percentile-clipped amplitude normalization into [0, 1]
//! - Atomic volume replacement with no visible downtime for in-flight reads
//! - Drill-telemetry feed with publish/subscribe fan-out
//!
//! The engine is synchronous and uses positioned reads throughout, so
//! `metadata` and `slice` calls against one open volume are safe to run from
//! any number of threads. Suspension points, if any, belong to the
//! surrounding transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use segyview::{SliceAxis, VolumeAccessor};
//!
//! let accessor = VolumeAccessor::new();
//! accessor.open("/data/latest.sgy")?;
//!
//! let summary = accessor.metadata()?;
//! println!("{} traces, {} inlines", summary.num_traces, summary.num_inlines);
//!
//! let slice = accessor.slice(SliceAxis::Inline, summary.inlines[0])?;
//! # Ok::<(), segyview::SegyError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod header;
pub mod io;
pub mod normalize;
pub mod slice;
pub mod telemetry;
pub mod trace;
pub mod volume;

// Re-exports
pub use error::{Result, SegyError};
pub use geometry::GeometryIndex;
pub use header::{BinaryHeader, SampleFormat, TraceHeader};
pub use normalize::normalize;
pub use slice::{extract_slice, slice_to_rows, Slice, SliceAxis};
pub use telemetry::{DrillFeed, DrillState, DrillUpdate, SubscriberId};
pub use trace::{TraceReader, TraceRecord};
pub use volume::{VolumeAccessor, VolumeHandle, VolumeSummary};

/// Version of the SegyView implementation
pub const SEGYVIEW_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of the EBCDIC/ASCII textual file header in bytes
pub const TEXT_HEADER_LEN: usize = 3200;

/// Length of the binary file header in bytes
pub const BINARY_HEADER_LEN: usize = 400;

/// Length of one trace header in bytes
pub const TRACE_HEADER_LEN: usize = 240;

/// Byte offset of the first trace header (textual + binary file headers)
pub const DATA_START: u64 = (TEXT_HEADER_LEN + BINARY_HEADER_LEN) as u64;
