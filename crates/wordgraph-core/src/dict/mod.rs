//! Compiled word graph storage.
//!
//! `DawgBuilder` turns a sorted word list into a minimal DAWG, `Dawg` loads
//! the resulting file and exposes index-based traversal primitives.
//! `Header` carries the alphabet and the build counters.

pub mod builder;
mod dawg;
mod dawg_io;
mod edge;
mod header;
mod header_io;
#[cfg(test)]
pub(crate) mod tests;

pub use builder::{build_dictionary, BuildError, BuildReport, DawgBuilder};
pub use dawg::{Dawg, Siblings};
pub use edge::{Edge, EDGE_SIZE, MAX_PTR};
pub use header::{DictType, Header, HeaderInfo};
pub use header_io::{FORMAT_VERSION, MAGIC};

use std::io;

use crate::alphabet::AlphabetError;

/// Error type for dictionary and header binary I/O.
///
/// Every variant is fatal to the load; nothing is partially recovered.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("incorrect header keyword; is it a dictionary file?")]
    InvalidMagic,

    #[error("obsolete dictionary format (version 0), recompile the word list")]
    ObsoleteVersion,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("unrecognized algorithm type: {0}")]
    UnknownAlgorithm(u8),

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} too long (max {max} bytes)")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("inconsistent header: {0}")]
    Inconsistent(String),

    #[error("file size mismatch: expected {expected} bytes, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),
}
