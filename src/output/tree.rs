//! Depth-bounded tree view of directory sizes.
//!
//! Each directory is printed on its own line as
//! `"{'==' * depth} {name} [{size}]"`, parents before children. The root
//! is at depth 0, so its line starts with a single space. Nodes deeper than
//! `max_depth` are not printed.
//!
//! ```
//! use dirdupe::output::tree::TreeView;
//! use dirdupe::scanner::DirectoryNode;
//!
//! let mut child = DirectoryNode::new("sub");
//! child.push_file("b.txt", 3);
//! let mut root = DirectoryNode::new("root");
//! root.push_file("a.txt", 2);
//! root.push_subdirectory(child);
//!
//! let text = TreeView::new(&root, 3).to_string();
//! assert_eq!(text, " root [5]\n== sub [3]\n");
//! ```

use std::fmt;
use std::io;

use crate::scanner::DirectoryNode;

/// Default number of levels shown below the root.
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// Tree view renderer.
pub struct TreeView<'a> {
    root: &'a DirectoryNode,
    max_depth: usize,
}

impl<'a> TreeView<'a> {
    /// Render `root` and its subdirectories down to `max_depth` levels.
    #[must_use]
    pub fn new(root: &'a DirectoryNode, max_depth: usize) -> Self {
        Self { root, max_depth }
    }

    /// Write the tree to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any write error.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &DirectoryNode,
        depth: usize,
    ) -> fmt::Result {
        writeln!(f, "{} {} [{}]", "==".repeat(depth), node.name, node.size)?;
        if depth < self.max_depth {
            for child in &node.subdirectories {
                self.fmt_node(f, child, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}
