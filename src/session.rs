//! In-memory state shared by the commands of one process run.
//!
//! A [`Session`] owns the directory tree of the most recent scan and the
//! duplicate index. The tree is replaced by every scan. The index is not:
//! scanning a second root adds to the counts from the first, so duplicates
//! across separately scanned roots are detected too. Nothing is persisted.

use std::path::{Path, PathBuf};

use crate::duplicates::DuplicateIndex;
use crate::scanner::{DirectoryNode, ScanError, ScanReport, Scanner};

/// Scan results of the current run.
#[derive(Debug, Default)]
pub struct Session {
    tree: Option<DirectoryNode>,
    index: DuplicateIndex,
    last_path: Option<PathBuf>,
}

impl Session {
    /// Create a session with no tree and an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `path` into this session.
    ///
    /// On success the tree is replaced and `path` becomes the last scanned
    /// path. On failure the previous tree is kept, but files recorded before
    /// the failure remain in the index.
    ///
    /// # Errors
    ///
    /// Propagates the scanner's [`ScanError`].
    pub fn scan(&mut self, scanner: &Scanner, path: &Path) -> Result<ScanReport, ScanError> {
        let (root, report) = scanner.scan(path, &mut self.index)?;
        self.tree = Some(root);
        self.last_path = Some(path.to_path_buf());
        Ok(report)
    }

    /// Tree of the most recent successful scan.
    #[must_use]
    pub fn tree(&self) -> Option<&DirectoryNode> {
        self.tree.as_ref()
    }

    /// Cumulative duplicate index.
    #[must_use]
    pub fn index(&self) -> &DuplicateIndex {
        &self.index
    }

    /// Root of the most recent successful scan.
    #[must_use]
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }
}
