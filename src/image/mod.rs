/// Disk image data structures

/// Image builder for assembling images from raw rows
pub mod builder;

pub use builder::DiskImageBuilder;

use crate::error::{DecodeError, FlintError, Result};
use crate::filesystem::cluster::{interpret, Cluster};
use crate::format::constants::BYTES_PER_CLUSTER;
use crate::format::DumpOptions;
use std::path::Path;

/// Raw contents of one cluster
pub type ByteRow = [u8; BYTES_PER_CLUSTER];

/// A decoded Flintstone Disk image, one row per cluster
///
/// The index of a row is its cluster number. Images are produced once by
/// decoding or building and are not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskImage {
    pub(crate) rows: Vec<ByteRow>,
    /// Original filename if loaded from disk
    pub(crate) filename: Option<String>,
}

impl DiskImage {
    /// Create an image from rows
    pub fn from_rows(rows: Vec<ByteRow>) -> Self {
        Self {
            rows,
            filename: None,
        }
    }

    /// Open a dump file using the default options
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::io::reader::read_dump(path, &DumpOptions::default())
    }

    /// Decode dump text using the default options
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(crate::io::hexdump::decode(text)?)
    }

    /// Render the image in canonical dump form
    pub fn to_text(&self) -> String {
        crate::io::hexdump::encode(self)
    }

    /// Write the canonical dump to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::io::writer::write_dump(self, path)
    }

    /// Create a new builder
    pub fn builder() -> DiskImageBuilder {
        DiskImageBuilder::new()
    }

    /// Get the original filename if loaded from disk
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get all rows
    pub fn rows(&self) -> &[ByteRow] {
        &self.rows
    }

    /// Get a row by cluster number
    pub fn row(&self, index: usize) -> Option<&ByteRow> {
        self.rows.get(index)
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the image has no clusters
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total size of the image in bytes
    pub fn total_size(&self) -> usize {
        self.rows.len() * BYTES_PER_CLUSTER
    }

    /// Interpret a single cluster
    pub fn cluster(&self, index: usize) -> Result<Cluster> {
        let row = self.row(index).ok_or(FlintError::InvalidCluster {
            index,
            count: self.len(),
        })?;
        Ok(interpret(index, row)?)
    }

    /// Interpret every cluster, keeping one result per row
    pub fn interpret_all(&self) -> Vec<std::result::Result<Cluster, DecodeError>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| interpret(index, row))
            .collect()
    }
}
