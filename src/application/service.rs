//! Tree service: load, mutate, persist
//!
//! Orchestrates the domain store over an abstract snapshot store. Every
//! applied mutation rewrites the side's snapshot slot; target misses
//! leave the slot untouched since the payload would be identical.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{FlatNode, Mutation, Side, TreeNode, TreeStore};
use crate::infrastructure::SnapshotStore;

/// Service owning persistence of the two tree instances.
pub struct TreeService {
    snapshots: Arc<dyn SnapshotStore>,
}

impl TreeService {
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self { snapshots }
    }

    /// Restore a side's tree from its snapshot slot.
    ///
    /// An empty slot or a payload that does not parse as the tree shape
    /// falls back to the default single-node tree; the fallback is
    /// logged but never surfaced as an error. On a successful restore
    /// the id counter is recomputed from the tree contents.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, side: Side) -> ApplicationResult<TreeStore> {
        let key = side.snapshot_key();
        match self.snapshots.load(key)? {
            None => {
                debug!("no snapshot for {}, using default tree", side);
                Ok(TreeStore::new())
            }
            Some(payload) => match serde_json::from_str::<TreeNode>(&payload) {
                Ok(root) => Ok(TreeStore::from_root(root)),
                Err(e) => {
                    warn!("corrupt snapshot for {} ({}), using default tree", side, e);
                    Ok(TreeStore::new())
                }
            },
        }
    }

    fn persist(&self, side: Side, store: &TreeStore) -> ApplicationResult<()> {
        let payload =
            serde_json::to_string(store.root()).map_err(ApplicationError::Serialize)?;
        self.snapshots.save(side.snapshot_key(), &payload)?;
        Ok(())
    }

    /// Add a generated child under `parent_id` and persist.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&self, side: Side, parent_id: u64) -> ApplicationResult<Mutation> {
        let mut store = self.load(side)?;
        let outcome = store.add_child(parent_id);
        if outcome.is_applied() {
            self.persist(side, &store)?;
        }
        Ok(outcome)
    }

    /// Update name and/or image of a node and persist. Omitted values
    /// keep the node's current ones; the blank-name rule lives in the
    /// domain store.
    #[instrument(level = "debug", skip(self, name, image))]
    pub fn update_node(
        &self,
        side: Side,
        id: u64,
        name: Option<&str>,
        image: Option<&str>,
    ) -> ApplicationResult<Mutation> {
        let mut store = self.load(side)?;
        let (name, image) = match store.root().find(id) {
            Some(node) => (
                name.unwrap_or(&node.name).to_string(),
                image.unwrap_or(&node.image).to_string(),
            ),
            None => return Ok(Mutation::TargetNotFound { id }),
        };
        let outcome = store.update_node(id, &name, &image);
        if outcome.is_applied() {
            self.persist(side, &store)?;
        }
        Ok(outcome)
    }

    /// Delete the subtree rooted at `id` and persist. Root deletion is
    /// rejected with a domain error.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&self, side: Side, id: u64) -> ApplicationResult<Mutation> {
        let mut store = self.load(side)?;
        let outcome = store.delete_node(id)?;
        if outcome.is_applied() {
            self.persist(side, &store)?;
        }
        Ok(outcome)
    }

    /// Flat listing of a side's tree in depth-first display order.
    pub fn list(&self, side: Side) -> ApplicationResult<Vec<FlatNode>> {
        Ok(self.load(side)?.flatten())
    }
}
