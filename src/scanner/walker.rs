//! Recursive directory scanner.
//!
//! # Overview
//!
//! [`Scanner::scan`] walks a directory tree depth-first in a single pass.
//! For every directory it builds a [`DirectoryNode`] whose size is the sum
//! of everything beneath it; every non-directory entry is hashed with the
//! configured [`Hasher`] and recorded in the caller's [`DuplicateIndex`].
//!
//! Entries are visited in the order the filesystem returns them. Totals and
//! duplicate counts do not depend on that order, the order of
//! `files`/`subdirectories` does.
//!
//! # Failure handling
//!
//! With [`ErrorPolicy::Abort`] (the default) the first I/O failure ends the
//! scan. Anything already recorded in the index stays there. With
//! [`ErrorPolicy::Skip`] the failing entry is left out of the tree, logged,
//! and collected in [`ScanReport::warnings`].
//!
//! Directory detection follows symbolic links. There is no cycle guard, so a
//! symlink pointing at one of its ancestors recurses until the OS refuses.
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::duplicates::DuplicateIndex;
//! use dirdupe::scanner::{ErrorPolicy, Hasher, Scanner};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(Hasher::new().with_chunk_size(4096))
//!     .with_error_policy(ErrorPolicy::Skip);
//!
//! let mut index = DuplicateIndex::new();
//! let (root, report) = scanner.scan(Path::new("/home/user/Downloads"), &mut index).unwrap();
//! for warning in &report.warnings {
//!     eprintln!("skipped: {}", warning);
//! }
//! println!("{} [{}]", root.name, root.size);
//! ```

use std::fs;
use std::path::Path;

use super::{DirectoryNode, ErrorPolicy, Hasher, ScanError, ScanReport};
use crate::duplicates::DuplicateIndex;

/// Single-threaded tree builder and duplicate collector.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    hasher: Hasher,
    policy: ErrorPolicy,
}

impl Scanner {
    /// Create a scanner using `hasher` and [`ErrorPolicy::Abort`].
    #[must_use]
    pub fn new(hasher: Hasher) -> Self {
        Self {
            hasher,
            policy: ErrorPolicy::Abort,
        }
    }

    /// Create a scanner with the default hasher and error policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Set how unreadable entries are treated.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The hasher used for file contents.
    #[must_use]
    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    /// Scan the tree rooted at `path`, recording every file in `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotADirectory`] if `path` is not a directory.
    /// Under [`ErrorPolicy::Abort`] any I/O failure below `path` is returned
    /// as well; under [`ErrorPolicy::Skip`] only a failure on `path` itself is.
    pub fn scan(
        &self,
        path: &Path,
        index: &mut DuplicateIndex,
    ) -> Result<(DirectoryNode, ScanReport), ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(path.to_path_buf()));
        }

        log::info!("Scanning {}", path.display());

        let mut report = ScanReport::default();
        let root = self.scan_dir(path, root_name(path), index, &mut report)?;

        log::info!(
            "Scanned {}: {} files in {} directories, {} bytes",
            path.display(),
            report.files,
            report.directories,
            report.bytes
        );
        if !report.warnings.is_empty() {
            log::warn!("{} entries were skipped", report.warnings.len());
        }

        Ok((root, report))
    }

    fn scan_dir(
        &self,
        dir: &Path,
        name: String,
        index: &mut DuplicateIndex,
        report: &mut ScanReport,
    ) -> Result<DirectoryNode, ScanError> {
        let entries = fs::read_dir(dir).map_err(|e| ScanError::from_io(dir, e))?;
        report.directories += 1;

        let mut node = DirectoryNode::new(name);
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.handle_error(ScanError::from_io(dir, e), report)?;
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            if let Err(err) = self.visit_entry(&entry.path(), name, &mut node, index, report) {
                self.handle_error(err, report)?;
            }
        }

        log::trace!("{} [{}]", dir.display(), node.size);
        Ok(node)
    }

    fn visit_entry(
        &self,
        path: &Path,
        name: String,
        node: &mut DirectoryNode,
        index: &mut DuplicateIndex,
        report: &mut ScanReport,
    ) -> Result<(), ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;

        if metadata.is_dir() {
            let child = self.scan_dir(path, name, index, report)?;
            node.push_subdirectory(child);
            return Ok(());
        }

        let size = metadata.len();
        log::debug!("Analyzing {}", path.display());
        let digest = self.hasher.full_hash(path)?;

        index.record_file(digest, &name, size);
        node.push_file(name, size);
        report.files += 1;
        report.bytes += size;
        Ok(())
    }

    fn handle_error(&self, err: ScanError, report: &mut ScanReport) -> Result<(), ScanError> {
        match self.policy {
            ErrorPolicy::Abort => Err(err),
            ErrorPolicy::Skip => {
                log::warn!("Skipping: {}", err);
                report.warnings.push(err);
                Ok(())
            }
        }
    }
}

/// Name of the scan root: its last component, or the path as given when it
/// has none (`/`, `.`, `..`).
fn root_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
