//! Duplicate detection module.
//!
//! This module provides the [`DuplicateIndex`], the digest-keyed map that a
//! scan fills and the CSV exporter reads.

pub mod index;

pub use index::{DuplicateEntry, DuplicateIndex, IndexStats};
