/// Dump file reader

use crate::error::Result;
use crate::format::DumpOptions;
use crate::image::DiskImage;
use crate::io::hexdump;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Largest UTF-8 encoding of one character, used to size bounded reads
const MAX_UTF8_WIDTH: u64 = 4;

/// Read and decode a dump file
pub fn read_dump<P: AsRef<Path>>(path: P, options: &DumpOptions) -> Result<DiskImage> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut image = read_dump_from(file, options)?;
    image.filename = Some(path.display().to_string());
    Ok(image)
}

/// Read and decode a dump from any reader, such as standard input
///
/// Only as much input as the character budget can use is read.
pub fn read_dump_from<R: Read>(reader: R, options: &DumpOptions) -> Result<DiskImage> {
    let text = read_text(reader, options.max_input_chars)?;
    Ok(hexdump::decode_with(&text, options)?)
}

fn read_text<R: Read>(reader: R, limit: Option<usize>) -> Result<String> {
    let mut text = String::new();
    match limit {
        Some(chars) => {
            let bytes = (chars as u64).saturating_mul(MAX_UTF8_WIDTH);
            let mut buf = Vec::new();
            reader.take(bytes).read_to_end(&mut buf)?;
            text.push_str(&String::from_utf8_lossy(&buf));
        }
        None => {
            let mut reader = reader;
            reader.read_to_string(&mut text)?;
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, FlintError, LineFault};
    use crate::format::constants::*;

    fn dump(rows: usize) -> String {
        hexdump::encode(&DiskImage::from_rows(vec![[0u8; BYTES_PER_CLUSTER]; rows]))
    }

    #[test]
    fn test_read_from_slice() {
        let text = dump(3);
        let image = read_dump_from(text.as_bytes(), &DumpOptions::default()).unwrap();
        assert_eq!(image.len(), 3);
        assert!(image.filename().is_none());
    }

    #[test]
    fn test_read_respects_budget() {
        let text = dump(100);
        let image = read_dump_from(text.as_bytes(), &DumpOptions::default()).unwrap();
        assert!(image.len() < 100);

        let image = read_dump_from(text.as_bytes(), &DumpOptions::unbounded()).unwrap();
        assert_eq!(image.len(), 100);
    }

    #[test]
    fn test_read_reports_decode_error() {
        let text = format!("{}\n{}\n00:123", HEADER_INDEX_RULER, HEADER_HEX_RULER);
        let result = read_dump_from(text.as_bytes(), &DumpOptions::default());
        assert!(matches!(
            result,
            Err(FlintError::Decode(DecodeError::MalformedLine {
                line_number: 3,
                fault: LineFault::TooShort { width: 6 },
            }))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_dump("/nonexistent/flint/disk.txt", &DumpOptions::default());
        assert!(matches!(result, Err(FlintError::Io(_))));
    }
}
