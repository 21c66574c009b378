//! Digest-keyed duplicate index.
//!
//! # Overview
//!
//! The index maps every content digest seen during a scan to a single
//! [`DuplicateEntry`]. An entry is created the first time a digest is
//! seen and updated on every later sighting:
//!
//! - `copies` is incremented
//! - `name` is replaced only by a strictly shorter basename, so on a tie
//!   the first recorded name stays
//! - `size` is never changed after insertion
//!
//! Entries are never removed. The index outlives a single scan, so scanning
//! several roots into the same index accumulates across all of them.
//!
//! # Example
//!
//! ```
//! use dirdupe::duplicates::DuplicateIndex;
//!
//! let mut index = DuplicateIndex::new();
//! index.record_file([1u8; 32], "report-final.txt", 42);
//! index.record_file([1u8; 32], "report.txt", 42);
//! index.record_file([2u8; 32], "other.txt", 7);
//!
//! let entry = index.get(&[1u8; 32]).unwrap();
//! assert_eq!(entry.name, "report.txt");
//! assert_eq!(entry.copies, 2);
//! assert_eq!(index.duplicates().count(), 1);
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::scanner::Hash;

/// Summary of one duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    /// Shortest basename seen for this content
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Number of files seen with this content
    pub copies: u64,
}

impl DuplicateEntry {
    /// Bytes that could be freed by keeping a single copy.
    #[must_use]
    pub fn reclaimable(&self) -> u64 {
        self.size.saturating_mul(self.copies.saturating_sub(1))
    }

    /// Whether more than one file shares this content.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.copies > 1
    }
}

/// Aggregate numbers over the whole index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Distinct digests recorded
    pub unique_contents: usize,
    /// Digests seen more than once
    pub duplicate_groups: usize,
    /// Extra copies beyond the first, summed over all groups
    pub duplicate_files: u64,
    /// Bytes held by those extra copies
    pub reclaimable_space: u64,
}

/// Mapping from content digest to its [`DuplicateEntry`].
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    entries: HashMap<Hash, DuplicateEntry>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file with content `digest`.
    pub fn record_file(&mut self, digest: Hash, name: &str, size: u64) {
        match self.entries.get_mut(&digest) {
            Some(entry) => {
                if name.chars().count() < entry.name.chars().count() {
                    entry.name = name.to_string();
                }
                entry.copies += 1;
            }
            None => {
                self.entries.insert(
                    digest,
                    DuplicateEntry {
                        name: name.to_string(),
                        size,
                        copies: 1,
                    },
                );
            }
        }
    }

    /// Look up the entry for a digest.
    #[must_use]
    pub fn get(&self, digest: &Hash) -> Option<&DuplicateEntry> {
        self.entries.get(digest)
    }

    /// Number of distinct digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Hash, &DuplicateEntry)> {
        self.entries.iter()
    }

    /// Entries with more than one copy, in unspecified order.
    pub fn duplicates(&self) -> impl Iterator<Item = &DuplicateEntry> {
        self.entries.values().filter(|e| e.is_duplicate())
    }

    /// Compute aggregate statistics.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.entries.values().fold(
            IndexStats {
                unique_contents: self.entries.len(),
                ..Default::default()
            },
            |mut stats, entry| {
                if entry.is_duplicate() {
                    stats.duplicate_groups += 1;
                    stats.duplicate_files += entry.copies - 1;
                    stats.reclaimable_space += entry.reclaimable();
                }
                stats
            },
        )
    }
}
