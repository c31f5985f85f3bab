use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, debug_span};

use super::dawg::Dawg;
use super::edge::{Edge, EDGE_SIZE};
use super::header::Header;
use super::DictError;

impl Dawg {
    /// Parse a complete dictionary file.
    ///
    /// The size must match the header exactly, and every edge is decoded
    /// from network byte order before the dictionary is returned.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        let _span = debug_span!("dawg_from_bytes", len = data.len()).entered();

        let (header, header_len) = Header::from_bytes(data)?;
        let count = header.edges_used as usize + 1;
        let expected = header_len + count * EDGE_SIZE;
        if data.len() != expected {
            return Err(DictError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let edges: Vec<Edge> = data[header_len..]
            .chunks_exact(EDGE_SIZE)
            .map(|chunk| Edge::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        if header.root as usize >= count {
            return Err(DictError::Inconsistent(format!(
                "root {} outside of {count} edges",
                header.root
            )));
        }
        let letters = header.alphabet.len() as u8;
        // Nodes are written after their children, so pointers only go back.
        for (i, edge) in edges.iter().enumerate() {
            let ptr = edge.ptr() as usize;
            if ptr >= count {
                return Err(DictError::Inconsistent(format!(
                    "edge {i} points to {ptr} (only {count} edges)"
                )));
            }
            if ptr != 0 && ptr >= i {
                return Err(DictError::Inconsistent(format!(
                    "edge {i} points forward to {ptr}"
                )));
            }
            if edge.code() > letters {
                return Err(DictError::Inconsistent(format!(
                    "edge {i} has letter code {} (only {letters} letters)",
                    edge.code()
                )));
            }
        }

        debug!(
            version = header.version,
            words = header.nwords,
            edges = count
        );
        Ok(Dawg::from_parts(header, edges))
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, DictError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Load a dictionary file. The mapping only lives during decoding.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    /// Serialize in the latest format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let mut buf = self.header.to_bytes()?;
        buf.reserve(self.edges.len() * EDGE_SIZE);
        for edge in &self.edges {
            buf.extend_from_slice(&edge.to_be_bytes());
        }
        Ok(buf)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }
}
