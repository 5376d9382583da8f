//! Path index over a built tree.
//!
//! Each node gets a synthetic CSS-like path: the root is the fixed
//! sentinel [`ROOT_PATH`], every child appends
//! `" > {tag}:nth-child({k})"` with `k` 1-based among its siblings.
//! Sibling positions are unique per parent, so paths cannot collide.
//!
//! The index borrows the tree it was built from: rebuilding the tree
//! forces rebuilding the index.

use axon_figure::AxNode;
use axon_lumen::{CompactString, FxHashMap};

/// Path of the root node in every index
pub const ROOT_PATH: &str = "root";

/// Path-keyed lookup table over one tree snapshot
#[derive(Debug)]
pub struct TreeIndex<'t> {
    paths: FxHashMap<CompactString, &'t AxNode>,
}

impl<'t> TreeIndex<'t> {
    /// Look up a node by its path
    pub fn get(&self, path: &str) -> Option<&'t AxNode> {
        self.paths.get(path).copied()
    }

    /// Number of indexed nodes
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over `(path, node)` entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'t AxNode)> + '_ {
        self.paths.iter().map(|(path, node)| (path.as_str(), *node))
    }
}

/// Build the path index for a tree snapshot
pub fn build_index(tree: &AxNode) -> TreeIndex<'_> {
    let mut paths = FxHashMap::default();
    visit(tree, CompactString::from(ROOT_PATH), &mut paths);
    tracing::debug!(nodes = paths.len(), "indexed accessibility tree");
    TreeIndex { paths }
}

fn visit<'t>(
    node: &'t AxNode,
    path: CompactString,
    paths: &mut FxHashMap<CompactString, &'t AxNode>,
) {
    for (i, child) in node.children.iter().enumerate() {
        let child_path =
            CompactString::from(format!("{path} > {}:nth-child({})", child.tag, i + 1));
        visit(child, child_path, paths);
    }
    paths.insert(path, node);
}
