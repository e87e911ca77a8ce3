//! Tree store: mutation model over one owned tree
//!
//! All mutations rebuild the path from root to the affected node and
//! reuse everything else by moving it into the new tree value. There is
//! no aliasing and no interior mutability; the store owns the whole
//! hierarchy and replaces it atomically on every applied mutation.

use std::mem;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{FlatNode, TreeNode};

/// Outcome of a mutation.
///
/// An unknown target id is not an error: the tree is left unchanged and
/// the miss is reported through this status value instead of being
/// swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The mutation was applied. For `add_child` the id is the newly
    /// assigned child id, otherwise the target id.
    Applied { id: u64 },
    /// No node with the given id exists; the tree is unchanged.
    TargetNotFound { id: u64 },
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied { .. })
    }
}

/// One family tree plus its monotonic id counter.
///
/// The counter is explicit state owned by the store. After restoring a
/// snapshot it is recomputed as the maximum id found in the tree, so ids
/// assigned later can never collide with restored ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStore {
    root: TreeNode,
    next_id: u64,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore {
    /// Store holding the default single-node tree.
    pub fn new() -> Self {
        let root = TreeNode::default_tree();
        let next_id = root.id;
        Self { root, next_id }
    }

    /// Store restored from a deserialized tree; the id counter is
    /// recomputed by full traversal.
    pub fn from_root(root: TreeNode) -> Self {
        let next_id = root.max_id();
        Self { root, next_id }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Id that would be assigned to the next added node, minus one.
    pub fn last_id(&self) -> u64 {
        self.next_id
    }

    pub fn count(&self) -> usize {
        self.root.count()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.root.contains(id)
    }

    /// Append a generated child node under `parent_id`.
    ///
    /// The new node gets id `last_id + 1`, a placeholder name and image
    /// derived from that id, and becomes the parent's last child. The
    /// counter only advances when the parent exists.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent_id: u64) -> Mutation {
        if !self.root.contains(parent_id) {
            debug!("add_child: parent {} not found", parent_id);
            return Mutation::TargetNotFound { id: parent_id };
        }
        self.next_id += 1;
        let id = self.next_id;
        let child = TreeNode::placeholder(id);

        let root = mem::replace(&mut self.root, TreeNode::default_tree());
        let mut pending = Some(child);
        self.root = graft(root, parent_id, &mut pending);
        Mutation::Applied { id }
    }

    /// Replace name and image on the matching node, preserving its
    /// children and position. A name that is blank after trimming keeps
    /// the previous name; the image is still replaced.
    #[instrument(level = "debug", skip(self, name, image))]
    pub fn update_node(&mut self, id: u64, name: &str, image: &str) -> Mutation {
        let root = mem::replace(&mut self.root, TreeNode::default_tree());
        let mut applied = false;
        self.root = rewrite(root, id, name, image, &mut applied);
        if applied {
            Mutation::Applied { id }
        } else {
            debug!("update_node: {} not found", id);
            Mutation::TargetNotFound { id }
        }
    }

    /// Remove the node and its entire subtree from its parent's
    /// children. Deleting the root is rejected with an error the caller
    /// can surface; an unknown id leaves the tree unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, id: u64) -> DomainResult<Mutation> {
        if id == self.root.id {
            return Err(DomainError::RootDeletion(id));
        }
        let root = mem::replace(&mut self.root, TreeNode::default_tree());
        let mut removed = false;
        // The root id was checked above, so prune never removes the root.
        self.root = prune(root, id, &mut removed).unwrap_or_else(TreeNode::default_tree);
        if removed {
            Ok(Mutation::Applied { id })
        } else {
            debug!("delete_node: {} not found", id);
            Ok(Mutation::TargetNotFound { id })
        }
    }

    /// Depth-first flat listing, parent before children, children in
    /// insertion order. Recomputed from current state on every call.
    pub fn flatten(&self) -> Vec<FlatNode> {
        self.root.iter().map(FlatNode::from).collect()
    }
}

/// Rebuild the path to `parent_id`, appending the pending child there.
/// Subtrees off the path are moved over unchanged.
fn graft(node: TreeNode, parent_id: u64, pending: &mut Option<TreeNode>) -> TreeNode {
    let TreeNode {
        id,
        name,
        image,
        mut children,
    } = node;
    if id == parent_id {
        if let Some(child) = pending.take() {
            children.push(child);
        }
        TreeNode {
            id,
            name,
            image,
            children,
        }
    } else {
        let children = children
            .drain(..)
            .map(|c| graft(c, parent_id, pending))
            .collect();
        TreeNode {
            id,
            name,
            image,
            children,
        }
    }
}

/// Rebuild the path to `target`, replacing its name and image.
fn rewrite(node: TreeNode, target: u64, name: &str, image: &str, applied: &mut bool) -> TreeNode {
    let TreeNode {
        id,
        name: old_name,
        image: old_image,
        children,
    } = node;
    if id == target {
        *applied = true;
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            old_name
        } else {
            trimmed.to_string()
        };
        TreeNode {
            id,
            name,
            image: image.to_string(),
            children,
        }
    } else {
        let children = children
            .into_iter()
            .map(|c| rewrite(c, target, name, image, applied))
            .collect();
        TreeNode {
            id,
            name: old_name,
            image: old_image,
            children,
        }
    }
}

/// Drop the subtree rooted at `target`; everything else is rebuilt with
/// sibling order preserved.
fn prune(node: TreeNode, target: u64, removed: &mut bool) -> Option<TreeNode> {
    if node.id == target {
        *removed = true;
        return None;
    }
    let TreeNode {
        id,
        name,
        image,
        children,
    } = node;
    let children = children
        .into_iter()
        .filter_map(|c| prune(c, target, removed))
        .collect();
    Some(TreeNode {
        id,
        name,
        image,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::ROOT_ID;

    #[test]
    fn given_default_store_when_adding_children_then_ids_are_monotonic() {
        let mut store = TreeStore::new();
        assert_eq!(store.add_child(ROOT_ID), Mutation::Applied { id: 2 });
        assert_eq!(store.add_child(ROOT_ID), Mutation::Applied { id: 3 });
        assert_eq!(store.add_child(2), Mutation::Applied { id: 4 });
        assert_eq!(store.count(), 4);
    }

    #[test]
    fn given_unknown_parent_when_adding_then_tree_and_counter_unchanged() {
        let mut store = TreeStore::new();
        store.add_child(ROOT_ID);
        let before = store.clone();
        assert_eq!(store.add_child(99), Mutation::TargetNotFound { id: 99 });
        assert_eq!(store, before);
    }

    #[test]
    fn given_blank_name_when_updating_then_old_name_kept_image_replaced() {
        let mut store = TreeStore::new();
        store.add_child(ROOT_ID);
        assert!(store.update_node(2, "   ", "new.png").is_applied());
        let node = store.root().find(2).unwrap();
        assert_eq!(node.name, "Node 2");
        assert_eq!(node.image, "new.png");
    }

    #[test]
    fn given_delete_of_root_when_deleting_then_rejected_and_unchanged() {
        let mut store = TreeStore::new();
        store.add_child(ROOT_ID);
        let before = store.clone();
        assert_eq!(
            store.delete_node(ROOT_ID),
            Err(DomainError::RootDeletion(ROOT_ID))
        );
        assert_eq!(store, before);
    }

    #[test]
    fn given_deleted_subtree_when_adding_again_then_id_not_reused() {
        let mut store = TreeStore::new();
        store.add_child(ROOT_ID); // 2
        store.add_child(2); // 3
        assert!(store.delete_node(2).unwrap().is_applied());
        assert_eq!(store.add_child(ROOT_ID), Mutation::Applied { id: 4 });
    }
}
