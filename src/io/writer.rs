/// Dump file writer

use crate::error::Result;
use crate::image::DiskImage;
use crate::io::hexdump;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write an image to a file in canonical dump form
pub fn write_dump<P: AsRef<Path>>(image: &DiskImage, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_dump_to(image, file)
}

/// Write an image in canonical dump form to any writer
pub fn write_dump_to<W: Write>(image: &DiskImage, mut writer: W) -> Result<()> {
    writer.write_all(hexdump::encode(image).as_bytes())?;
    writer.flush()?;
    Ok(())
}
