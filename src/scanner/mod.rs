//! Scanner module for directory traversal and file hashing.
//!
//! This module provides:
//! - A recursive directory scanner that builds a size tree
//! - Content hashing with BLAKE3
//! - Feeding every scanned file into a [`DuplicateIndex`](crate::duplicates::DuplicateIndex)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`tree`]: The [`DirectoryNode`] tree produced by a scan
//! - [`walker`]: The recursive [`Scanner`]
//! - [`hasher`]: BLAKE3 file hashing (chunked)
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::duplicates::DuplicateIndex;
//! use dirdupe::scanner::Scanner;
//! use std::path::Path;
//!
//! let mut index = DuplicateIndex::new();
//! let (root, report) = Scanner::with_defaults()
//!     .scan(Path::new("."), &mut index)
//!     .unwrap();
//!
//! println!("{} [{}] in {} files", root.name, root.size, report.files);
//! ```

pub mod hasher;
pub mod tree;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher, DEFAULT_CHUNK_SIZE};
pub use tree::DirectoryNode;
pub use walker::Scanner;

/// What the scanner does when an entry cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the whole scan on the first I/O failure.
    #[default]
    Abort,
    /// Log the failure, record it in the report and keep going.
    Skip,
}

/// Counters and warnings collected during one scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Number of files hashed and recorded
    pub files: usize,
    /// Number of directories visited, including the root
    pub directories: usize,
    /// Total bytes of all recorded files
    pub bytes: u64,
    /// Entries skipped under [`ErrorPolicy::Skip`]
    pub warnings: Vec<ScanError>,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The scan root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file or directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file could not be hashed.
    #[error(transparent)]
    HashError(#[from] HashError),
}

impl ScanError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
