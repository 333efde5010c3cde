/// Cluster types and row interpretation

use crate::error::DecodeError;
use crate::format::constants::*;
use crate::image::ByteRow;

/// Cluster type, stored in the first byte of each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterType {
    /// Volume root holding the chain heads
    Root,
    /// Free cluster
    Empty,
    /// Unusable cluster
    Damaged,
    /// First cluster of a file
    FileHeader,
    /// Continuation of a file's content
    FileData,
}

impl ClusterType {
    /// Type tag byte
    pub fn tag(self) -> u8 {
        match self {
            ClusterType::Root => TAG_ROOT,
            ClusterType::Empty => TAG_EMPTY,
            ClusterType::Damaged => TAG_DAMAGED,
            ClusterType::FileHeader => TAG_FILE_HEADER,
            ClusterType::FileData => TAG_FILE_DATA,
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            ClusterType::Root => "Root",
            ClusterType::Empty => "Empty",
            ClusterType::Damaged => "Damaged",
            ClusterType::FileHeader => "File header",
            ClusterType::FileData => "File data",
        }
    }
}

impl TryFrom<u8> for ClusterType {
    type Error = u8;

    fn try_from(tag: u8) -> std::result::Result<Self, u8> {
        match tag {
            TAG_ROOT => Ok(ClusterType::Root),
            TAG_EMPTY => Ok(ClusterType::Empty),
            TAG_DAMAGED => Ok(ClusterType::Damaged),
            TAG_FILE_HEADER => Ok(ClusterType::FileHeader),
            TAG_FILE_DATA => Ok(ClusterType::FileData),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for ClusterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded cluster
///
/// Links (`*_head`, `next_*`) are cluster numbers into the same image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    /// Volume root
    Root {
        /// Volume name
        name: String,
        /// First cluster of the empty chain
        empty_head: u8,
        /// First cluster of the damaged chain
        damaged_head: u8,
        /// First cluster of the file header chain
        file_headers_head: u8,
    },
    /// Free cluster
    Empty {
        /// Next free cluster
        next_empty: u8,
    },
    /// Unusable cluster
    Damaged {
        /// Next damaged cluster
        next_damaged: u8,
    },
    /// First cluster of a file
    FileHeader {
        /// File name
        name: String,
        /// Start of the file's content
        content: String,
        /// Next file header
        next_header: u8,
        /// First data cluster of this file
        next_data: u8,
    },
    /// Continuation of a file
    FileData {
        /// Content held in this cluster
        content: String,
        /// Next data cluster of this file
        next_data: u8,
    },
}

impl Cluster {
    /// Get the cluster type
    pub fn cluster_type(&self) -> ClusterType {
        match self {
            Cluster::Root { .. } => ClusterType::Root,
            Cluster::Empty { .. } => ClusterType::Empty,
            Cluster::Damaged { .. } => ClusterType::Damaged,
            Cluster::FileHeader { .. } => ClusterType::FileHeader,
            Cluster::FileData { .. } => ClusterType::FileData,
        }
    }

    /// Name of a root or file header cluster
    pub fn name(&self) -> Option<&str> {
        match self {
            Cluster::Root { name, .. } | Cluster::FileHeader { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Inline content of a file header or file data cluster
    pub fn content(&self) -> Option<&str> {
        match self {
            Cluster::FileHeader { content, .. } | Cluster::FileData { content, .. } => {
                Some(content)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cluster::Root {
                name,
                empty_head,
                damaged_head,
                file_headers_head,
            } => write!(
                f,
                "Root \"{}\" (empty: {:02X}, damaged: {:02X}, files: {:02X})",
                name, empty_head, damaged_head, file_headers_head
            ),
            Cluster::Empty { next_empty } => write!(f, "Empty (next: {:02X})", next_empty),
            Cluster::Damaged { next_damaged } => {
                write!(f, "Damaged (next: {:02X})", next_damaged)
            }
            Cluster::FileHeader {
                name,
                content,
                next_header,
                next_data,
            } => write!(
                f,
                "File header \"{}\" (next header: {:02X}, data: {:02X}) \"{}\"",
                name, next_header, next_data, content
            ),
            Cluster::FileData { content, next_data } => {
                write!(f, "File data (next: {:02X}) \"{}\"", next_data, content)
            }
        }
    }
}

/// Read a zero-terminated Latin-1 string
///
/// Returns the string and the offset just past its terminator, or `None` if
/// the string ran to the end of the data.
fn read_cstr(data: &[u8]) -> (String, Option<usize>) {
    let end = data.iter().position(|&b| b == 0);
    let text = data[..end.unwrap_or(data.len())]
        .iter()
        .map(|&b| b as char)
        .collect();
    (text, end.map(|pos| pos + 1))
}

/// Decode one row into a cluster
pub fn interpret(row_index: usize, row: &ByteRow) -> Result<Cluster, DecodeError> {
    let tag = row[0];
    let cluster_type = ClusterType::try_from(tag)
        .map_err(|tag| DecodeError::UnknownClusterType { tag, row_index })?;

    let cluster = match cluster_type {
        ClusterType::Root => Cluster::Root {
            empty_head: row[1],
            damaged_head: row[2],
            file_headers_head: row[3],
            name: read_cstr(&row[ROOT_NAME_OFFSET..]).0,
        },
        ClusterType::Empty => Cluster::Empty { next_empty: row[1] },
        ClusterType::Damaged => Cluster::Damaged {
            next_damaged: row[1],
        },
        ClusterType::FileHeader => {
            let tail = &row[HEADER_NAME_OFFSET..];
            let (name, after) = read_cstr(tail);
            let content = match after {
                Some(offset) => read_cstr(&tail[offset..]).0,
                None => String::new(),
            };
            Cluster::FileHeader {
                name,
                content,
                next_header: row[1],
                next_data: row[2],
            }
        }
        ClusterType::FileData => Cluster::FileData {
            next_data: row[1],
            content: read_cstr(&row[DATA_CONTENT_OFFSET..]).0,
        },
    };

    Ok(cluster)
}

/// Names of all file header clusters, in the order given
///
/// This is a scan over every cluster, not a walk of the header chain.
pub fn list_file_names<'a, I>(clusters: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Cluster>,
{
    clusters
        .into_iter()
        .filter_map(|cluster| match cluster {
            Cluster::FileHeader { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bytes: &[u8]) -> ByteRow {
        let mut row = [0u8; BYTES_PER_CLUSTER];
        row[..bytes.len()].copy_from_slice(bytes);
        row
    }

    #[test]
    fn test_root() {
        let r = row(b"\x00\x02\x05\x07Bedrock\x00junk");
        assert_eq!(
            interpret(0, &r).unwrap(),
            Cluster::Root {
                name: "Bedrock".to_string(),
                empty_head: 2,
                damaged_head: 5,
                file_headers_head: 7,
            }
        );
    }

    #[test]
    fn test_empty_and_damaged() {
        assert_eq!(
            interpret(1, &row(&[0x01, 0x09])).unwrap(),
            Cluster::Empty { next_empty: 9 }
        );
        assert_eq!(
            interpret(2, &row(&[0x02, 0xFF])).unwrap(),
            Cluster::Damaged { next_damaged: 0xFF }
        );
    }

    #[test]
    fn test_file_header() {
        let r = row(b"\x03\x00\x01FOO\x00hi\x00");
        assert_eq!(
            interpret(3, &r).unwrap(),
            Cluster::FileHeader {
                name: "FOO".to_string(),
                content: "hi".to_string(),
                next_header: 0,
                next_data: 1,
            }
        );
    }

    #[test]
    fn test_file_header_content_runs_to_row_end() {
        let mut bytes = b"\x03\x04\x05AB\x00".to_vec();
        bytes.resize(BYTES_PER_CLUSTER, b'z');
        let cluster = interpret(0, &row(&bytes)).unwrap();

        assert_eq!(cluster.name(), Some("AB"));
        assert_eq!(cluster.content(), Some("z".repeat(26).as_str()));
    }

    #[test]
    fn test_file_header_name_fills_row() {
        let mut bytes = vec![0x03, 0x00, 0x00];
        bytes.resize(BYTES_PER_CLUSTER, b'N');
        let cluster = interpret(0, &row(&bytes)).unwrap();

        assert_eq!(cluster.name(), Some("N".repeat(29).as_str()));
        assert_eq!(cluster.content(), Some(""));
    }

    #[test]
    fn test_file_data_empty_content() {
        let cluster = interpret(0, &row(&[0x04])).unwrap();
        assert_eq!(
            cluster,
            Cluster::FileData {
                content: String::new(),
                next_data: 0,
            }
        );
    }

    #[test]
    fn test_file_data_content() {
        let cluster = interpret(0, &row(b"\x04\x06yabba dabba\x00doo")).unwrap();
        assert_eq!(cluster.content(), Some("yabba dabba"));
    }

    #[test]
    fn test_latin1_names() {
        let cluster = interpret(0, &row(b"\x03\x00\x00caf\xE9\x00")).unwrap();
        assert_eq!(cluster.name(), Some("caf\u{e9}"));
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            interpret(6, &row(&[0x09])),
            Err(DecodeError::UnknownClusterType { tag: 9, row_index: 6 })
        );
    }

    #[test]
    fn test_cluster_type_tags() {
        for tag in 0..=4u8 {
            assert_eq!(ClusterType::try_from(tag).unwrap().tag(), tag);
        }
        assert_eq!(ClusterType::try_from(5), Err(5));
        assert_eq!(ClusterType::FileHeader.to_string(), "File header");
    }

    #[test]
    fn test_list_file_names() {
        let clusters = vec![
            Cluster::Root {
                name: "ROOT".to_string(),
                empty_head: 0,
                damaged_head: 0,
                file_headers_head: 2,
            },
            Cluster::FileHeader {
                name: "ALPHA".to_string(),
                content: String::new(),
                next_header: 3,
                next_data: 0,
            },
            Cluster::Empty { next_empty: 0 },
            Cluster::FileHeader {
                name: "BETA".to_string(),
                content: String::new(),
                next_header: 0,
                next_data: 0,
            },
        ];

        assert_eq!(list_file_names(&clusters), vec!["ALPHA", "BETA"]);
    }

    #[test]
    fn test_display() {
        let cluster = Cluster::FileData {
            content: "hi".to_string(),
            next_data: 0x0A,
        };
        assert_eq!(cluster.to_string(), "File data (next: 0A) \"hi\"");
    }
}
