use thiserror::Error;

/// Result type alias for Flintstone Disk operations
pub type Result<T> = std::result::Result<T, FlintError>;

/// The structural problem found on a malformed dump line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFault {
    /// The input ended before both header lines were seen
    MissingHeader,
    /// Line is narrower than label, colon and hex field
    TooShort {
        /// Width of the offending line in characters
        width: usize,
    },
    /// Line is wider than label, colon and hex field
    TooLong {
        /// Width of the offending line in characters
        width: usize,
    },
    /// Index label is not two hex digits (or does not match the row when checked)
    BadLabel,
    /// No colon after the index label
    MissingColon,
    /// Non-hex character inside the data field
    BadHexDigit {
        /// 0-based character column within the line
        column: usize,
    },
}

impl std::fmt::Display for LineFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineFault::MissingHeader => write!(f, "missing header line"),
            LineFault::TooShort { width } => write!(f, "line too short ({} chars)", width),
            LineFault::TooLong { width } => write!(f, "line too long ({} chars)", width),
            LineFault::BadLabel => write!(f, "bad index label"),
            LineFault::MissingColon => write!(f, "missing ':' after label"),
            LineFault::BadHexDigit { column } => write!(f, "non-hex character at column {}", column),
        }
    }
}

/// Errors raised while decoding dump text or interpreting cluster rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A line violates the hex-dump line grammar
    #[error("Malformed line {line_number}: {fault}")]
    MalformedLine {
        /// 1-based line number within the input text
        line_number: usize,
        /// What was wrong with it
        fault: LineFault,
    },

    /// A row's tag byte is not a known cluster type
    #[error("Unknown cluster type {tag:#04X} in cluster {row_index}")]
    UnknownClusterType {
        /// The tag byte found
        tag: u8,
        /// Cluster number of the row
        row_index: usize,
    },
}

impl DecodeError {
    /// Create a malformed line error
    pub fn malformed(line_number: usize, fault: LineFault) -> Self {
        DecodeError::MalformedLine { line_number, fault }
    }
}

/// Errors that can occur when working with Flintstone Disk images
#[derive(Debug, Error)]
pub enum FlintError {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dump text or a cluster row failed to decode
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The image does not start with a Root cluster
    #[error("Not a formatted disk: {0}")]
    NotFormatted(String),

    /// Cluster index outside the image
    #[error("Invalid cluster {index} (image has {count} clusters)")]
    InvalidCluster {
        /// Requested cluster number
        index: usize,
        /// Number of clusters in the image
        count: usize,
    },

    /// Row data wider than a cluster
    #[error("Row {index} is {len} bytes (max: {max})")]
    RowTooLong {
        /// Row number
        index: usize,
        /// Supplied length
        len: usize,
        /// Cluster size
        max: usize,
    },

    /// File not found in filesystem
    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl FlintError {
    /// Create a not-formatted error
    pub fn not_formatted<S: Into<String>>(message: S) -> Self {
        FlintError::NotFormatted(message.into())
    }
}
