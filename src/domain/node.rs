//! Tree node entity and traversal

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Id of the root node, fixed at tree creation.
pub const ROOT_ID: u64 = 1;

/// Node in a family tree hierarchy.
///
/// The serde shape of this struct is the persisted snapshot format:
/// `{id, name, image, children}` with children nested recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique id within the tree, monotonically assigned
    pub id: u64,
    /// Display name
    pub name: String,
    /// Image reference (URL or embedded data)
    pub image: String,
    /// Child nodes, insertion order is display order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node with generated placeholder name and image.
    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            name: format!("Node {}", id),
            image: placeholder_image(id),
            children: Vec::new(),
        }
    }

    /// Default single-node tree used when no snapshot exists.
    pub fn default_tree() -> Self {
        Self {
            id: ROOT_ID,
            name: "Root".to_string(),
            image: "https://i.pravatar.cc/80?img=1".to_string(),
            children: Vec::new(),
        }
    }

    /// Preorder iterator over the tree (parent before children,
    /// children left to right). Restartable: call again for a fresh walk.
    pub fn iter(&self) -> DfsIter<'_> {
        DfsIter::new(self)
    }

    /// Look up a node by id anywhere in the subtree.
    pub fn find(&self, id: u64) -> Option<&TreeNode> {
        self.iter().find(|n| n.id == id)
    }

    /// Whether a node with the given id exists in the subtree.
    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    /// Total number of nodes in the subtree.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Largest id anywhere in the subtree.
    ///
    /// Used to recompute the id counter after restoring a snapshot, so
    /// freshly assigned ids never collide with restored ones.
    #[instrument(level = "trace", skip(self))]
    pub fn max_id(&self) -> u64 {
        self.iter().map(|n| n.id).max().unwrap_or(self.id)
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Placeholder image for a generated node, keyed on its id.
pub fn placeholder_image(id: u64) -> String {
    format!("https://i.pravatar.cc/80?img={}", (id % 70) + 1)
}

/// Flat projection of a node for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    pub id: u64,
    pub name: String,
    pub image: String,
}

impl From<&TreeNode> for FlatNode {
    fn from(node: &TreeNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            image: node.image.clone(),
        }
    }
}

/// Explicit-stack preorder iterator, avoids deep call recursion on
/// degenerate (very deep) trees.
pub struct DfsIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> DfsIter<'a> {
    fn new(root: &'a TreeNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
