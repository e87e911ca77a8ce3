//! Tree service: load/mutate/persist orchestration

use std::sync::Arc;

use tempfile::TempDir;

use kintree::application::{ApplicationError, TreeService};
use kintree::domain::{DomainError, Mutation, Side, TreeNode, ROOT_ID};
use kintree::infrastructure::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};

fn memory_service() -> (Arc<MemorySnapshotStore>, TreeService) {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let service = TreeService::new(snapshots.clone());
    (snapshots, service)
}

// ============================================================
// load: defaults and fallback
// ============================================================

#[test]
fn given_empty_slot_when_loading_then_default_single_node_tree() {
    let (_, service) = memory_service();
    let store = service.load(Side::Fatherside).unwrap();
    assert_eq!(store.root(), &TreeNode::default_tree());
    assert_eq!(store.count(), 1);
}

#[test]
fn given_corrupt_snapshot_when_loading_then_falls_back_to_default() {
    let (snapshots, service) = memory_service();
    snapshots.seed(Side::Fatherside.snapshot_key(), "{not json");
    let store = service.load(Side::Fatherside).unwrap();
    assert_eq!(store.root(), &TreeNode::default_tree());
}

#[test]
fn given_shape_mismatch_when_loading_then_falls_back_to_default() {
    let (snapshots, service) = memory_service();
    // valid JSON, wrong shape
    snapshots.seed(Side::Fatherside.snapshot_key(), r#"{"foo": 42}"#);
    let store = service.load(Side::Fatherside).unwrap();
    assert_eq!(store.root(), &TreeNode::default_tree());
}

#[test]
fn given_restored_snapshot_when_adding_then_counter_recomputed_from_max_id() {
    let (snapshots, service) = memory_service();
    // ids out of order, max is 7
    let payload = r#"{"id":1,"name":"Root","image":"i","children":[
        {"id":7,"name":"A","image":"a","children":[]},
        {"id":3,"name":"B","image":"b","children":[]}]}"#;
    snapshots.seed(Side::Fatherside.snapshot_key(), payload);

    let outcome = service.add_child(Side::Fatherside, ROOT_ID).unwrap();
    assert_eq!(outcome, Mutation::Applied { id: 8 });
}

// ============================================================
// mutate and persist
// ============================================================

#[test]
fn given_applied_mutation_when_reloading_then_change_was_persisted() {
    let (_, service) = memory_service();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap();
    service
        .update_node(Side::Fatherside, 2, Some("Opa"), None)
        .unwrap();

    let store = service.load(Side::Fatherside).unwrap();
    assert_eq!(store.count(), 2);
    assert_eq!(store.root().find(2).unwrap().name, "Opa");
}

#[test]
fn given_target_miss_when_mutating_then_slot_not_rewritten() {
    let (snapshots, service) = memory_service();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap();
    let before = snapshots.load(Side::Fatherside.snapshot_key()).unwrap();

    let outcome = service.add_child(Side::Fatherside, 999).unwrap();
    assert_eq!(outcome, Mutation::TargetNotFound { id: 999 });
    let after = snapshots.load(Side::Fatherside.snapshot_key()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn given_omitted_fields_when_updating_then_current_values_kept() {
    let (_, service) = memory_service();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap();
    service
        .update_node(Side::Fatherside, 2, None, Some("new.png"))
        .unwrap();

    let store = service.load(Side::Fatherside).unwrap();
    let node = store.root().find(2).unwrap();
    assert_eq!(node.name, "Node 2", "name untouched when not given");
    assert_eq!(node.image, "new.png");
}

#[test]
fn given_root_delete_when_deleting_then_domain_error_and_tree_kept() {
    let (_, service) = memory_service();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap();

    let err = service.delete_node(Side::Fatherside, ROOT_ID).unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::RootDeletion(1))
    ));
    assert_eq!(service.load(Side::Fatherside).unwrap().count(), 2);
}

#[test]
fn given_subtree_delete_when_reloading_then_subtree_gone() {
    let (_, service) = memory_service();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap(); // 2
    service.add_child(Side::Fatherside, 2).unwrap(); // 3
    service.add_child(Side::Fatherside, ROOT_ID).unwrap(); // 4

    service.delete_node(Side::Fatherside, 2).unwrap();
    let store = service.load(Side::Fatherside).unwrap();
    assert!(!store.contains(2));
    assert!(!store.contains(3));
    assert!(store.contains(4));
}

// ============================================================
// side isolation
// ============================================================

#[test]
fn given_both_sides_when_mutating_one_then_other_untouched() {
    let (_, service) = memory_service();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap();
    service.add_child(Side::Fatherside, ROOT_ID).unwrap();

    assert_eq!(service.load(Side::Fatherside).unwrap().count(), 3);
    assert_eq!(service.load(Side::Motherside).unwrap().count(), 1);

    service.add_child(Side::Motherside, ROOT_ID).unwrap();
    assert_eq!(service.load(Side::Motherside).unwrap().count(), 2);
    assert_eq!(service.load(Side::Fatherside).unwrap().count(), 3);
}

// ============================================================
// file-backed end to end
// ============================================================

#[test]
fn given_file_store_when_mutating_then_snapshot_survives_new_service() {
    let dir = TempDir::new().unwrap();

    {
        let service = TreeService::new(Arc::new(FileSnapshotStore::new(dir.path())));
        service.add_child(Side::Motherside, ROOT_ID).unwrap();
        service
            .update_node(Side::Motherside, 2, Some("Oma"), Some("oma.jpg"))
            .unwrap();
    }

    // fresh service over the same directory, as at next startup
    let service = TreeService::new(Arc::new(FileSnapshotStore::new(dir.path())));
    let store = service.load(Side::Motherside).unwrap();
    assert_eq!(store.count(), 2);
    let node = store.root().find(2).unwrap();
    assert_eq!(node.name, "Oma");
    assert_eq!(node.image, "oma.jpg");

    let listed = service.list(Side::Motherside).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, 1);
    assert_eq!(listed[1].name, "Oma");
}
