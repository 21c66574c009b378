//! In-memory directory size tree.

use serde::Serialize;

/// One scanned directory.
///
/// `size` is inclusive: the sum of the sizes of the files directly inside
/// plus the `size` of every subdirectory. Children are owned by their parent
/// and kept in the order the filesystem listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryNode {
    /// Last path component
    pub name: String,
    /// Total bytes beneath this directory
    pub size: u64,
    /// Basenames of the files directly inside
    pub files: Vec<String>,
    /// Child directories, unique by name
    pub subdirectories: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Create an empty node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a direct child by name.
    #[must_use]
    pub fn subdirectory(&self, name: &str) -> Option<&DirectoryNode> {
        self.subdirectories.iter().find(|d| d.name == name)
    }

    /// Add a file of `size` bytes directly inside this directory.
    pub fn push_file(&mut self, name: impl Into<String>, size: u64) {
        self.files.push(name.into());
        self.size += size;
    }

    /// Attach a fully scanned child directory.
    ///
    /// The caller keeps names unique; entries of one `read_dir` listing are.
    pub fn push_subdirectory(&mut self, child: DirectoryNode) {
        self.size += child.size;
        self.subdirectories.push(child);
    }

    /// Whether the node holds no files and no subdirectories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }

    /// Number of directories in this subtree, including `self`.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        1 + self
            .subdirectories
            .iter()
            .map(DirectoryNode::directory_count)
            .sum::<usize>()
    }

    /// Depth of the deepest directory below `self` (0 for a leaf).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.subdirectories
            .iter()
            .map(|d| d.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}
