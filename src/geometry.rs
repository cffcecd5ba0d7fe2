//! Inline/crossline geometry index.
//!
//! Built exactly once from the open-time trace-header scan and read-only for
//! the lifetime of the owning volume handle. Real surveys are often sparse
//! or irregular, so the distinct axis values need not be contiguous or
//! evenly spaced, and not every (inline, crossline) pair has a trace.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, SegyError};
use crate::header::TraceHeader;

/// Maps (inline, crossline) coordinates to trace indices.
#[derive(Debug, Clone)]
pub struct GeometryIndex {
    map: HashMap<(i32, i32), usize>,
    inlines: Vec<i32>,
    crosslines: Vec<i32>,
}

impl GeometryIndex {
    /// Build the index from trace headers in file order.
    ///
    /// Duplicate (inline, crossline) pairs are resolved last-write-wins:
    /// the later trace in file order overwrites the mapping.
    pub fn build(headers: &[TraceHeader]) -> Result<Self> {
        if headers.is_empty() {
            return Err(SegyError::EmptyVolume);
        }

        let mut map = HashMap::with_capacity(headers.len());
        let mut inlines = BTreeSet::new();
        let mut crosslines = BTreeSet::new();

        for (index, header) in headers.iter().enumerate() {
            map.insert((header.inline, header.crossline), index);
            inlines.insert(header.inline);
            crosslines.insert(header.crossline);
        }

        Ok(Self {
            map,
            inlines: inlines.into_iter().collect(),
            crosslines: crosslines.into_iter().collect(),
        })
    }

    /// Trace index at (inline, crossline), if that position has a trace
    pub fn lookup(&self, inline: i32, crossline: i32) -> Option<usize> {
        self.map.get(&(inline, crossline)).copied()
    }

    /// Sorted ascending distinct inline numbers
    pub fn inlines(&self) -> &[i32] {
        &self.inlines
    }

    /// Sorted ascending distinct crossline numbers
    pub fn crosslines(&self) -> &[i32] {
        &self.crosslines
    }

    /// Whether `value` is one of the distinct inline numbers
    pub fn has_inline(&self, value: i32) -> bool {
        self.inlines.binary_search(&value).is_ok()
    }

    /// Whether `value` is one of the distinct crossline numbers
    pub fn has_crossline(&self, value: i32) -> bool {
        self.crosslines.binary_search(&value).is_ok()
    }

    /// Number of mapped (inline, crossline) positions
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
