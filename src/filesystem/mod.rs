/// Filesystem implementations

/// Cluster types and row interpretation
pub mod cluster;
/// Flintstone chained-cluster filesystem
pub mod flint;

pub use cluster::{interpret, list_file_names, Cluster, ClusterType};
pub use flint::FlintFileSystem;

use crate::error::Result;

/// Directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name
    pub name: String,
    /// Cluster number of the file header
    pub cluster: usize,
    /// File size in bytes, header content plus data chain
    pub size: usize,
}

/// Filesystem information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemInfo {
    /// Volume name from the root cluster
    pub volume_name: String,
    /// Clusters in the image
    pub total_clusters: usize,
    /// Clusters reachable on the empty chain
    pub free_clusters: usize,
    /// Clusters reachable on the damaged chain
    pub damaged_clusters: usize,
    /// File header clusters found
    pub file_count: usize,
    /// Cluster size in bytes
    pub cluster_size: usize,
}

/// Filesystem trait for reading files from disk images
pub trait FileSystem {
    /// List directory entries
    fn read_dir(&self) -> Result<Vec<DirEntry>>;

    /// Read a file's contents
    fn read_file(&self, name: &str) -> Result<String>;

    /// Get filesystem information
    fn info(&self) -> FileSystemInfo;
}
