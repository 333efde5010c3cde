/*!
# flintdisk

A Rust library for reading Flintstone Disk hex dumps and the chained-cluster
filesystem stored inside them.

## Features

- Decode and re-encode the fixed-width hex-dump text format
- Typed cluster decoding (root, empty, damaged, file header, file data)
- Directory listing, chain walking and file reading
- Idiomatic Rust API with typed errors

## Quick Start

```rust,no_run
use flintdisk::{DiskImage, FileSystem, FlintFileSystem};

// Decode a dump file
let image = DiskImage::open("disk.txt")?;

// Print it back in canonical form
println!("{}", image.to_text());

// List files
let fs = FlintFileSystem::from_image(&image)?;
for entry in fs.read_dir()? {
    println!("{}: {} bytes", entry.name, entry.size);
}

// Read a file
let contents = fs.read_file("README")?;
# Ok::<(), flintdisk::FlintError>(())
```

## Modules

- `format`: Format constants and decoding options
- `image`: Disk image data structures (DiskImage, ByteRow)
- `io`: Hex-dump codec, readers and writers
- `filesystem`: Cluster interpretation and the Flintstone filesystem
- `map`: Cluster map visualization
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// Error types and Result alias
pub mod error;
/// Filesystem implementations (Flintstone)
pub mod filesystem;
/// Format constants and decoding options
pub mod format;
/// Disk image data structures
pub mod image;
/// I/O operations for reading and writing dump text
pub mod io;
/// Cluster map visualization
pub mod map;

// Re-export common types
pub use error::{DecodeError, FlintError, LineFault, Result};
pub use filesystem::{
    interpret, list_file_names, Cluster, ClusterType, DirEntry, FileSystem, FileSystemInfo,
    FlintFileSystem,
};
pub use format::constants::{BYTES_PER_CLUSTER, MAX_INPUT_CHARS};
pub use format::DumpOptions;
pub use image::{ByteRow, DiskImage, DiskImageBuilder};
pub use io::{decode, decode_with, encode};
