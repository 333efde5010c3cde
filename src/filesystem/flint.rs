/// Flintstone chained-cluster filesystem

use crate::error::{DecodeError, FlintError, Result};
use crate::filesystem::cluster::{list_file_names, Cluster, ClusterType};
use crate::filesystem::{DirEntry, FileSystem, FileSystemInfo};
use crate::format::constants::BYTES_PER_CLUSTER;
use crate::image::DiskImage;

/// Flintstone filesystem view over a disk image
///
/// Cluster 0 must be the root. Rows that fail to interpret are kept as
/// errors; they end any chain that reaches them and are skipped by listings.
pub struct FlintFileSystem<'a> {
    image: &'a DiskImage,
    clusters: Vec<std::result::Result<Cluster, DecodeError>>,
    volume_name: String,
    empty_head: u8,
    damaged_head: u8,
    file_headers_head: u8,
}

impl<'a> FlintFileSystem<'a> {
    /// Mount the filesystem on an image
    pub fn from_image(image: &'a DiskImage) -> Result<Self> {
        let clusters = image.interpret_all();

        let (volume_name, empty_head, damaged_head, file_headers_head) = match clusters.first() {
            Some(Ok(Cluster::Root {
                name,
                empty_head,
                damaged_head,
                file_headers_head,
            })) => (name.clone(), *empty_head, *damaged_head, *file_headers_head),
            Some(Ok(other)) => {
                return Err(FlintError::not_formatted(format!(
                    "cluster 0 is {}, not Root",
                    other.cluster_type()
                )))
            }
            Some(Err(err)) => return Err(FlintError::not_formatted(err.to_string())),
            None => return Err(FlintError::not_formatted("image has no clusters")),
        };

        for err in clusters.iter().filter_map(|c| c.as_ref().err()) {
            log::warn!("Skipping undecodable cluster: {}", err);
        }

        log::debug!(
            "Mounted volume \"{}\" with {} clusters",
            volume_name,
            clusters.len()
        );

        Ok(Self {
            image,
            clusters,
            volume_name,
            empty_head,
            damaged_head,
            file_headers_head,
        })
    }

    /// The image this filesystem reads from
    pub fn image(&self) -> &DiskImage {
        self.image
    }

    /// Volume name from the root cluster
    pub fn volume_name(&self) -> &str {
        &self.volume_name
    }

    /// Per-row interpretation results
    pub fn clusters(&self) -> &[std::result::Result<Cluster, DecodeError>] {
        &self.clusters
    }

    /// Names of all file headers in cluster order
    pub fn file_names(&self) -> Vec<String> {
        list_file_names(self.clusters.iter().filter_map(|c| c.as_ref().ok()))
    }

    /// Follow a chain of clusters of one type starting at `head`
    ///
    /// The chain ends at a link outside the image, at a cluster of another
    /// type or one that did not decode, or at a cluster already on the chain.
    fn walk<F>(&self, head: u8, kind: ClusterType, next: F) -> Vec<usize>
    where
        F: Fn(&Cluster) -> u8,
    {
        let mut chain = Vec::new();
        let mut visited = vec![false; self.clusters.len()];
        let mut index = head as usize;

        loop {
            let cluster = match self.clusters.get(index) {
                Some(Ok(cluster)) if cluster.cluster_type() == kind => cluster,
                _ => break,
            };
            if visited[index] {
                break;
            }
            visited[index] = true;
            log::trace!("{} chain: cluster {:02X}", kind, index);
            chain.push(index);
            index = next(cluster) as usize;
        }

        chain
    }

    /// Clusters on the empty chain
    pub fn free_clusters(&self) -> Vec<usize> {
        self.walk(self.empty_head, ClusterType::Empty, |c| match c {
            Cluster::Empty { next_empty } => *next_empty,
            _ => 0,
        })
    }

    /// Clusters on the damaged chain
    pub fn damaged_clusters(&self) -> Vec<usize> {
        self.walk(self.damaged_head, ClusterType::Damaged, |c| match c {
            Cluster::Damaged { next_damaged } => *next_damaged,
            _ => 0,
        })
    }

    /// File header clusters in chain order from the root
    pub fn header_chain(&self) -> Vec<usize> {
        self.walk(self.file_headers_head, ClusterType::FileHeader, |c| match c {
            Cluster::FileHeader { next_header, .. } => *next_header,
            _ => 0,
        })
    }

    /// Data clusters belonging to the file whose header is at `header`
    pub fn data_chain(&self, header: usize) -> Vec<usize> {
        match self.clusters.get(header) {
            Some(Ok(Cluster::FileHeader { next_data, .. })) => {
                self.walk(*next_data, ClusterType::FileData, |c| match c {
                    Cluster::FileData { next_data, .. } => *next_data,
                    _ => 0,
                })
            }
            _ => Vec::new(),
        }
    }

    /// Directory entries following the header chain instead of scanning
    pub fn read_dir_chained(&self) -> Result<Vec<DirEntry>> {
        Ok(self
            .header_chain()
            .into_iter()
            .filter_map(|index| self.dir_entry(index))
            .collect())
    }

    fn dir_entry(&self, index: usize) -> Option<DirEntry> {
        match self.clusters.get(index) {
            Some(Ok(Cluster::FileHeader { name, .. })) => Some(DirEntry {
                name: name.clone(),
                cluster: index,
                size: self.file_contents(index).len(),
            }),
            _ => None,
        }
    }

    /// Header content followed by each data cluster's content
    fn file_contents(&self, header: usize) -> String {
        let mut contents = String::new();
        let clusters = std::iter::once(header).chain(self.data_chain(header));
        for index in clusters {
            if let Some(Ok(cluster)) = self.clusters.get(index) {
                contents.push_str(cluster.content().unwrap_or_default());
            }
        }
        contents
    }
}

impl<'a> FileSystem for FlintFileSystem<'a> {
    fn read_dir(&self) -> Result<Vec<DirEntry>> {
        Ok((0..self.clusters.len())
            .filter_map(|index| self.dir_entry(index))
            .collect())
    }

    fn read_file(&self, name: &str) -> Result<String> {
        let header = self
            .clusters
            .iter()
            .position(|c| {
                matches!(c, Ok(cluster @ Cluster::FileHeader { .. }) if cluster.name() == Some(name))
            })
            .ok_or_else(|| FlintError::FileNotFound(name.to_string()))?;

        Ok(self.file_contents(header))
    }

    fn info(&self) -> FileSystemInfo {
        FileSystemInfo {
            volume_name: self.volume_name.clone(),
            total_clusters: self.clusters.len(),
            free_clusters: self.free_clusters().len(),
            damaged_clusters: self.damaged_clusters().len(),
            file_count: self.file_names().len(),
            cluster_size: BYTES_PER_CLUSTER,
        }
    }
}
