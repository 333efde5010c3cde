/// Builder for assembling disk images

use crate::error::{FlintError, Result};
use crate::format::constants::BYTES_PER_CLUSTER;
use crate::image::{ByteRow, DiskImage};

/// Builder for constructing disk images from raw row bytes
///
/// Rows shorter than a cluster are padded with the fill byte.
#[derive(Debug, Clone)]
pub struct DiskImageBuilder {
    rows: Vec<Vec<u8>>,
    fill_byte: u8,
}

impl DiskImageBuilder {
    /// Create a new builder with no rows and a zero fill byte
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            fill_byte: 0x00,
        }
    }

    /// Set the byte used to pad short rows
    pub fn fill_byte(mut self, fill_byte: u8) -> Self {
        self.fill_byte = fill_byte;
        self
    }

    /// Append a row
    pub fn row(mut self, data: &[u8]) -> Self {
        self.rows.push(data.to_vec());
        self
    }

    /// Append `count` rows each holding only the fill byte
    pub fn blank_rows(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.rows.push(Vec::new());
        }
        self
    }

    /// Build the image
    pub fn build(self) -> Result<DiskImage> {
        let mut rows = Vec::with_capacity(self.rows.len());

        for (index, data) in self.rows.iter().enumerate() {
            if data.len() > BYTES_PER_CLUSTER {
                return Err(FlintError::RowTooLong {
                    index,
                    len: data.len(),
                    max: BYTES_PER_CLUSTER,
                });
            }

            let mut row: ByteRow = [self.fill_byte; BYTES_PER_CLUSTER];
            row[..data.len()].copy_from_slice(data);
            rows.push(row);
        }

        Ok(DiskImage::from_rows(rows))
    }
}

impl Default for DiskImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
