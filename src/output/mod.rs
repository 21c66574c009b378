//! Reporters for scan results.
//!
//! Both formatters only read what a scan produced:
//! - [`csv`]: duplicate groups as CSV
//! - [`tree`]: directory sizes as an indented tree view

pub mod csv;
pub mod tree;

// Re-export main types
pub use self::csv::{CsvOutput, CsvOutputError};
pub use tree::{TreeView, DEFAULT_TREE_DEPTH};
