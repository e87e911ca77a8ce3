//! Terminal rendering of a family tree via termtree

use termtree::Tree;

use crate::domain::TreeNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode {
    fn to_tree_string(&self) -> Tree<String> {
        let root = format!("{} (#{})", self.name, self.id);

        // Recursively construct the children
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();

        Tree::new(root).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TreeStore, ROOT_ID};

    #[test]
    fn given_two_level_tree_when_rendering_then_children_are_indented() {
        let mut store = TreeStore::new();
        store.add_child(ROOT_ID);
        store.add_child(ROOT_ID);
        let rendered = store.root().to_tree_string().to_string();
        assert!(rendered.starts_with("Root (#1)"));
        assert!(rendered.contains("Node 2 (#2)"));
        assert!(rendered.contains("Node 3 (#3)"));
    }
}
