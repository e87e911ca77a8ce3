//! Infrastructure layer: I/O boundary implementations
//!
//! This layer implements the snapshot store used by the application layer.

pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use traits::{
    default_snapshot_dir, resolve_snapshot_dir, FileSnapshotStore, MemorySnapshotStore,
    SnapshotStore,
};
