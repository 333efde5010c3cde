/// Flintstone Disk format constants

/// Bytes in one cluster (one dump row)
pub const BYTES_PER_CLUSTER: usize = 32;

/// Default input budget in characters, matching the fixed read size of the format
pub const MAX_INPUT_CHARS: usize = 4096;

/// First header line: column ruler in sixteens
pub const HEADER_INDEX_RULER: &str = "XX:                1               2               3";

/// Second header line: column ruler in hex digits
pub const HEADER_HEX_RULER: &str =
    "XX:0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";

/// Number of header lines preceding the data lines
pub const HEADER_LINES: usize = 2;

/// Width of the row index label
pub const LABEL_WIDTH: usize = 2;

/// Width of the label plus its colon
pub const PREFIX_WIDTH: usize = LABEL_WIDTH + 1;

/// Hex characters in the data field, including the trailing filler
pub const HEX_FIELD_WIDTH: usize = BYTES_PER_CLUSTER * 2;

/// Exact width of a data line
pub const LINE_WIDTH: usize = PREFIX_WIDTH + HEX_FIELD_WIDTH;

/// Filler written after the last nibble on encode
pub const FILLER_CHAR: char = '0';

/// Cluster type tag: root
pub const TAG_ROOT: u8 = 0;
/// Cluster type tag: empty
pub const TAG_EMPTY: u8 = 1;
/// Cluster type tag: damaged
pub const TAG_DAMAGED: u8 = 2;
/// Cluster type tag: file header
pub const TAG_FILE_HEADER: u8 = 3;
/// Cluster type tag: file data
pub const TAG_FILE_DATA: u8 = 4;

/// Offset of the name in a root cluster
pub const ROOT_NAME_OFFSET: usize = 4;
/// Offset of the name in a file header cluster
pub const HEADER_NAME_OFFSET: usize = 3;
/// Offset of the content in a file data cluster
pub const DATA_CONTENT_OFFSET: usize = 2;

/// Parse a single hex digit, either case
#[inline]
pub fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width() {
        assert_eq!(LINE_WIDTH, 67);
        assert_eq!(HEADER_HEX_RULER.len(), LINE_WIDTH);
    }

    #[test]
    fn test_hex_value() {
        assert_eq!(hex_value(b'0'), Some(0));
        assert_eq!(hex_value(b'a'), Some(10));
        assert_eq!(hex_value(b'F'), Some(15));
        assert_eq!(hex_value(b'g'), None);
        assert_eq!(hex_value(b':'), None);
    }
}
